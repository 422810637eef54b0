use crate::{
    Config, FetchOutcome, WeatherRecord,
    backend::{local::LocalBackend, remote::RemoteBackend},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod local;
pub mod remote;

/// Failure message returned for an empty or whitespace-only city, before any
/// lookup or network work happens.
pub const MISSING_CITY_ERROR: &str = "City name is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendId {
    Remote,
    Local,
}

impl BackendId {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendId::Remote => "remote",
            BackendId::Local => "local",
        }
    }

    pub const fn all() -> &'static [BackendId] {
        &[BackendId::Remote, BackendId::Local]
    }
}

impl std::fmt::Display for BackendId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for BackendId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "remote" => Ok(BackendId::Remote),
            "local" => Ok(BackendId::Local),
            _ => Err(anyhow::anyhow!(
                "Unknown backend '{value}'. Supported backends: remote, local."
            )),
        }
    }
}

/// A source of weather data keyed by city name.
///
/// Both implementations validate and trim the city identically, and report
/// every failure through the envelope rather than an error type, so the
/// retry orchestrator can wrap either without caring which one it holds.
#[async_trait]
pub trait WeatherBackend: Send + Sync + Debug {
    async fn fetch_by_city(&self, city: &str) -> FetchOutcome<WeatherRecord>;
}

/// Trim the city and reject empty/whitespace-only input.
pub(crate) fn normalized_city(city: &str) -> Option<&str> {
    let trimmed = city.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

/// Construct a backend from config and an explicit BackendId.
pub fn backend_from_config(id: BackendId, config: &Config) -> anyhow::Result<Box<dyn WeatherBackend>> {
    let boxed: Box<dyn WeatherBackend> = match id {
        BackendId::Remote => Box::new(RemoteBackend::new(config.remote_base_url())?),
        BackendId::Local => {
            let path = config.local_dataset_path().ok_or_else(|| {
                anyhow::anyhow!(
                    "No dataset path configured for the local backend.\n\
                     Hint: run `skywatch configure local` and enter the dataset file path."
                )
            })?;
            Box::new(LocalBackend::from_dataset_file(path)?)
        }
    };

    Ok(boxed)
}

/// Construct the default backend from config, using the `default_backend` field.
pub fn default_backend_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherBackend>> {
    let id = config.default_backend_id()?;
    backend_from_config(id, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_id_as_str_roundtrip() {
        for id in BackendId::all() {
            let s = id.as_str();
            let parsed = BackendId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn backend_id_parse_is_case_insensitive() {
        assert_eq!(BackendId::try_from("Remote").unwrap(), BackendId::Remote);
        assert_eq!(BackendId::try_from("LOCAL").unwrap(), BackendId::Local);
    }

    #[test]
    fn unknown_backend_error() {
        let err = BackendId::try_from("doesnotexist").unwrap_err();
        assert!(err.to_string().contains("Unknown backend"));
    }

    #[test]
    fn normalized_city_trims_whitespace() {
        assert_eq!(normalized_city("  Paris "), Some("Paris"));
    }

    #[test]
    fn normalized_city_rejects_blank_input() {
        assert_eq!(normalized_city(""), None);
        assert_eq!(normalized_city("   \t "), None);
    }

    #[test]
    fn backend_from_config_errors_when_dataset_path_missing() {
        let cfg = Config::default();
        let err = backend_from_config(BackendId::Local, &cfg).unwrap_err();
        assert!(err.to_string().contains("No dataset path configured"));
    }

    #[test]
    fn default_backend_from_config_errors_when_not_set() {
        let cfg = Config::default();
        let err = default_backend_from_config(&cfg).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No default backend configured"));
        assert!(msg.contains("Hint: run `skywatch configure"));
    }
}
