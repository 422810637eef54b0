use serde::{Deserialize, Serialize};

/// A point-in-time weather observation for a single city.
///
/// Constructed fresh by whichever backend answers a query and handed to the
/// caller by value; nothing in this crate mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub city: String,
    pub temp: f64,
    pub condition: String,
    /// Percentage, 0–100 expected (not enforced here).
    pub humidity: u8,
}

/// Uniform outcome of any fetch operation: either a payload or an error
/// message, never both.
///
/// The only construction paths are [`FetchOutcome::ok`] and
/// [`FetchOutcome::fail`], so exactly one of the two fields is ever
/// populated. Backends return this instead of letting errors cross their
/// boundary.
#[derive(Debug, Clone, Serialize)]
pub struct FetchOutcome<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    success: bool,
}

impl<T> FetchOutcome<T> {
    /// Success envelope carrying `data`.
    pub fn ok(data: T) -> Self {
        Self { data: Some(data), error: None, success: true }
    }

    /// Failure envelope carrying `message`.
    pub fn fail(message: impl Into<String>) -> Self {
        Self { data: None, error: Some(message.into()), success: false }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Collapse the envelope into a plain `Result` for callers that prefer
    /// `?`-style handling over flag inspection.
    pub fn into_result(self) -> Result<T, String> {
        match self.data {
            Some(data) => Ok(data),
            None => Err(self.error.unwrap_or_else(|| "Unknown error".to_string())),
        }
    }
}
