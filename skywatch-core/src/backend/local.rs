use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    backend::{MISSING_CITY_ERROR, WeatherBackend, normalized_city},
    model::{FetchOutcome, WeatherRecord},
};

/// On-disk dataset shape: `{ "cities": { "<lowercase name>": { ... } } }`.
#[derive(Debug, Deserialize)]
struct Dataset {
    cities: HashMap<String, WeatherRecord>,
}

/// Backend that answers from an in-memory dataset.
///
/// The dataset is loaded once and never mutated afterwards, so sharing a
/// backend across tasks needs no locking. Lookups are case-insensitive:
/// keys are lower-cased at load time and queries are lower-cased before
/// the lookup.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    cities: HashMap<String, WeatherRecord>,
}

impl LocalBackend {
    /// Build a backend from an already-loaded mapping. Keys are folded to
    /// lowercase so callers do not have to pre-normalize them.
    pub fn from_cities(cities: HashMap<String, WeatherRecord>) -> Self {
        let cities = cities.into_iter().map(|(k, v)| (k.to_lowercase(), v)).collect();
        Self { cities }
    }

    /// Load the dataset from a JSON file.
    pub fn from_dataset_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset file: {}", path.display()))?;

        let dataset: Dataset = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse dataset file: {}", path.display()))?;

        let backend = Self::from_cities(dataset.cities);
        tracing::debug!(path = %path.display(), cities = backend.len(), "loaded weather dataset");

        Ok(backend)
    }

    /// Number of cities in the dataset.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

#[async_trait]
impl WeatherBackend for LocalBackend {
    async fn fetch_by_city(&self, city: &str) -> FetchOutcome<WeatherRecord> {
        let Some(city) = normalized_city(city) else {
            return FetchOutcome::fail(MISSING_CITY_ERROR);
        };

        let key = city.to_lowercase();

        match self.cities.get(&key) {
            Some(record) => FetchOutcome::ok(record.clone()),
            None => {
                tracing::debug!(key, "city not present in local dataset");
                FetchOutcome::fail(format!("Weather data for \"{key}\" not found."))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_backend() -> LocalBackend {
        let mut cities = HashMap::new();
        cities.insert(
            "paris".to_string(),
            WeatherRecord {
                city: "Paris".to_string(),
                temp: 18.5,
                condition: "Partly cloudy".to_string(),
                humidity: 65,
            },
        );
        cities.insert(
            "london".to_string(),
            WeatherRecord {
                city: "London".to_string(),
                temp: 14.0,
                condition: "Rain".to_string(),
                humidity: 88,
            },
        );
        LocalBackend::from_cities(cities)
    }

    #[tokio::test]
    async fn blank_city_is_rejected_before_lookup() {
        let backend = sample_backend();

        for input in ["", "   ", "\t\n"] {
            let outcome = backend.fetch_by_city(input).await;
            assert_eq!(outcome.error(), Some(MISSING_CITY_ERROR), "input: {input:?}");
        }
    }

    #[tokio::test]
    async fn lookup_is_case_insensitive() {
        let backend = sample_backend();

        let upper = backend.fetch_by_city("Paris").await;
        let lower = backend.fetch_by_city("paris").await;

        assert_eq!(upper.data(), lower.data());
        assert!(upper.is_success());
    }

    #[tokio::test]
    async fn surrounding_whitespace_does_not_affect_the_result() {
        let backend = sample_backend();

        let outcome = backend.fetch_by_city("  London \t").await;

        assert!(outcome.is_success());
        assert_eq!(outcome.data().unwrap().city, "London");
    }

    #[tokio::test]
    async fn found_record_keeps_its_canonical_city_name() {
        let backend = sample_backend();

        let outcome = backend.fetch_by_city("PARIS").await;

        // Payload is the stored record, untouched by normalization.
        assert_eq!(outcome.data().unwrap().city, "Paris");
    }

    #[tokio::test]
    async fn miss_reports_the_normalized_key() {
        let backend = sample_backend();

        let outcome = backend.fetch_by_city("  Atlantis ").await;

        assert!(!outcome.is_success());
        assert_eq!(outcome.error(), Some("Weather data for \"atlantis\" not found."));
    }

    #[tokio::test]
    async fn mixed_case_dataset_keys_are_folded_at_load_time() {
        let mut cities = HashMap::new();
        cities.insert(
            "Tokyo".to_string(),
            WeatherRecord {
                city: "Tokyo".to_string(),
                temp: 27.0,
                condition: "Clear".to_string(),
                humidity: 55,
            },
        );

        let backend = LocalBackend::from_cities(cities);
        let outcome = backend.fetch_by_city("tokyo").await;

        assert!(outcome.is_success());
    }

    #[test]
    fn dataset_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("skywatch-dataset-{}.json", std::process::id()));
        fs::write(
            &path,
            r#"{ "cities": { "paris": { "city": "Paris", "temp": 18.5, "condition": "Partly cloudy", "humidity": 65 } } }"#,
        )
        .unwrap();

        let backend = LocalBackend::from_dataset_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn missing_dataset_file_errors_with_the_path() {
        let err = LocalBackend::from_dataset_file("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read dataset file"));
    }
}
