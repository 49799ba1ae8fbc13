use reqwest::Url;
use serde::Serialize;
use std::fmt;

/// OpenWeather "current weather" endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Lincoln, UK.
pub const DEFAULT_LATITUDE: f64 = 53.230606408229466;
pub const DEFAULT_LONGITUDE: f64 = -0.5407005174034509;

/// Everything needed to issue one weather query.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestParameters {
    pub base_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub api_key: String,
}

impl RequestParameters {
    pub fn new(
        base_url: impl Into<String>,
        latitude: f64,
        longitude: f64,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            latitude,
            longitude,
            api_key: api_key.into(),
        }
    }

    /// Full request URL with `lat`, `lon` and `appid` appended.
    ///
    /// Values are percent-encoded (space becomes `%20`, not `+`). Coordinates
    /// are passed through as-is; range checking is left to the server.
    pub fn request_url(&self) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            FetchError::transport(format!("invalid base URL '{}': {e}", self.base_url))
        })?;

        let lat = self.latitude.to_string();
        let lon = self.longitude.to_string();
        let params = [
            ("lat", lat.as_str()),
            ("lon", lon.as_str()),
            ("appid", self.api_key.as_str()),
        ];

        let mut query = url.query().filter(|q| !q.is_empty()).map(str::to_owned);
        for (key, value) in params {
            let pair = format!("{key}={}", urlencoding::encode(value));
            query = Some(match query {
                Some(existing) => format!("{existing}&{pair}"),
                None => pair,
            });
        }
        url.set_query(query.as_deref());

        Ok(url)
    }
}

/// The three values shown to the user after a successful query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherSummary {
    /// `weather[0].main`, e.g. "Clouds".
    pub main_condition: String,
    /// `weather[0].description`, e.g. "overcast clouds".
    pub description: String,
    /// Response body exactly as received.
    pub raw_body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No complete response was obtained.
    Transport,
    /// A response arrived but its body did not have the expected shape.
    Malformed,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Malformed => "malformed",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} failure: {detail}")]
pub struct FetchError {
    kind: ErrorKind,
    detail: String,
}

impl FetchError {
    pub fn transport(detail: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Transport,
            detail: detail.into(),
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Malformed,
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// What went wrong, e.g. "missing `weather` key".
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// Outcome of a single fetch, delivered exactly once.
pub type FetchResult = Result<WeatherSummary, FetchError>;
