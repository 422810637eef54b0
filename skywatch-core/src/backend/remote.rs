use async_trait::async_trait;

use crate::{
    backend::{MISSING_CITY_ERROR, WeatherBackend, normalized_city},
    model::{FetchOutcome, WeatherRecord},
    transport::{ApiClient, TransportError},
};

const WEATHER_PATH: &str = "/api/weather";

/// Backend that queries a remote weather origin over HTTP.
///
/// The trimmed city is passed through with its case preserved; any case
/// handling is the origin's business.
#[derive(Debug, Clone)]
pub struct RemoteBackend {
    api: ApiClient,
}

impl RemoteBackend {
    /// Build a backend against `base_url`, e.g. `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        Ok(Self { api: ApiClient::new(base_url)? })
    }
}

#[async_trait]
impl WeatherBackend for RemoteBackend {
    async fn fetch_by_city(&self, city: &str) -> FetchOutcome<WeatherRecord> {
        let Some(city) = normalized_city(city) else {
            return FetchOutcome::fail(MISSING_CITY_ERROR);
        };

        match self.api.get::<WeatherRecord>(WEATHER_PATH, &[("city", city)]).await {
            Ok(record) => FetchOutcome::ok(record),
            Err(e) => {
                tracing::debug!(city, error = %e, "remote weather request failed");

                let message = e.to_string();
                if message.is_empty() {
                    FetchOutcome::fail("Unknown error occurred")
                } else {
                    FetchOutcome::fail(message)
                }
            }
        }
    }
}
