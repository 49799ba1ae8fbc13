use serde::Deserialize;
use serde_json::Value;

use crate::model::{FetchError, WeatherSummary};

#[derive(Debug, Deserialize)]
struct OwCondition {
    main: String,
    description: String,
}

/// Decode an OpenWeather response body into a [`WeatherSummary`].
///
/// The body must be a JSON object whose `weather` key holds a non-empty array
/// of objects, each with string `main` and `description` fields. The first
/// element wins. Anything else is reported as a `Malformed` error naming the
/// first mismatch found.
pub fn decode_summary(body: &str) -> Result<WeatherSummary, FetchError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| FetchError::malformed(format!("body is not valid JSON: {e}")))?;

    let root = value
        .as_object()
        .ok_or_else(|| FetchError::malformed("top-level JSON value is not an object"))?;

    let weather = root
        .get("weather")
        .ok_or_else(|| FetchError::malformed("missing `weather` key"))?
        .as_array()
        .ok_or_else(|| FetchError::malformed("`weather` is not an array"))?;

    let conditions = weather
        .iter()
        .enumerate()
        .map(|(idx, entry)| condition_at(idx, entry))
        .collect::<Result<Vec<_>, _>>()?;

    let first = conditions
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::malformed("`weather` array is empty"))?;

    Ok(WeatherSummary {
        main_condition: first.main,
        description: first.description,
        raw_body: body.to_string(),
    })
}

fn condition_at(idx: usize, entry: &Value) -> Result<OwCondition, FetchError> {
    // Structs also deserialize from sequences; only objects are accepted here.
    if !entry.is_object() {
        return Err(FetchError::malformed(format!("weather[{idx}] is not an object")));
    }

    OwCondition::deserialize(entry)
        .map_err(|e| FetchError::malformed(format!("weather[{idx}]: {e}")))
}

/// Server-supplied error message, if the body carries one (`{"cod":401,"message":"..."}`).
pub(crate) fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value.get("message")?.as_str().map(str::to_owned)
}
