use std::fmt;

use weather_fetch_core::{FetchError, FetchResult};

/// The three text surfaces shown to the user.
///
/// Lives on the main thread and is only updated from the UI queue.
#[derive(Debug, Default)]
pub struct WeatherDisplay {
    pub condition: String,
    pub description: String,
    pub raw_json: String,
    pub last_error: Option<FetchError>,
}

impl WeatherDisplay {
    /// Apply a fetch outcome. Failures leave the surfaces as they were.
    pub fn apply(&mut self, result: FetchResult) {
        match result {
            Ok(summary) => {
                self.condition = summary.main_condition;
                self.description = summary.description;
                self.raw_json = summary.raw_body;
                self.last_error = None;
            }
            Err(err) => {
                tracing::warn!(kind = %err.kind(), "weather fetch failed: {}", err.detail());
                self.last_error = Some(err);
            }
        }
    }
}

impl fmt::Display for WeatherDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Condition:   {}", self.condition)?;
        writeln!(f, "Description: {}", self.description)?;
        writeln!(f)?;
        write!(f, "{}", self.raw_json)
    }
}
