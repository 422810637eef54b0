//! Core library for the `skywatch` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - The result envelope and shared domain models
//! - Two interchangeable weather backends (remote HTTP, local dataset)
//! - Retry with exponential backoff over either backend
//!
//! It is used by `skywatch-cli`, but can also be reused by other binaries or services.

pub mod backend;
pub mod config;
pub mod model;
pub mod retry;
pub mod transport;

pub use backend::{BackendId, WeatherBackend};
pub use config::{Config, LocalConfig, RemoteConfig};
pub use model::{FetchOutcome, WeatherRecord};
pub use retry::{DEFAULT_MAX_ATTEMPTS, fetch_with_retry};
pub use transport::{ApiClient, TransportError};
