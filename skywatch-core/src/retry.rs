//! Bounded retry with exponential backoff around any [`WeatherBackend`].
//!
//! Attempts are strictly sequential; the only suspension point besides the
//! backend call itself is the timed backoff between failed attempts.

use std::time::Duration;

use crate::{
    backend::WeatherBackend,
    model::{FetchOutcome, WeatherRecord},
};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Delay inserted after failed attempt `attempt` (1-indexed): 2^attempt
/// seconds, so 2s, 4s, 8s, ... The schedule is deliberately uncapped; with
/// the default of 3 attempts the longest wait is 4 seconds.
pub fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(2u64.saturating_pow(attempt))
}

/// Call `backend.fetch_by_city(city)` up to `max_attempts` times, sleeping
/// between failures, and return the first success or a summary failure.
///
/// A `max_attempts` of 0 is treated as 1: at least one attempt is always
/// made. No delay ever follows the final attempt.
pub async fn fetch_with_retry(
    backend: &dyn WeatherBackend,
    city: &str,
    max_attempts: u32,
) -> FetchOutcome<WeatherRecord> {
    let max_attempts = max_attempts.max(1);
    let mut last_error = String::new();

    for attempt in 1..=max_attempts {
        let outcome = backend.fetch_by_city(city).await;

        if outcome.is_success() {
            if attempt > 1 {
                tracing::info!(attempt, "fetch succeeded after retrying");
            }
            return outcome;
        }

        last_error = outcome.error().unwrap_or("Unknown error").to_string();

        if attempt < max_attempts {
            let delay = backoff_delay(attempt);
            tracing::warn!(
                attempt,
                max_attempts,
                delay_secs = delay.as_secs(),
                error = %last_error,
                "fetch attempt failed, backing off"
            );
            tokio::time::sleep(delay).await;
        }
    }

    FetchOutcome::fail(format!("Failed after {max_attempts} attempts: {last_error}"))
}
