use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::backend::BackendId;

pub const DEFAULT_REMOTE_BASE_URL: &str = "http://localhost:8080";

/// Settings for the remote HTTP backend.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RemoteConfig {
    /// Origin of the weather service, e.g. "http://localhost:8080".
    pub base_url: Option<String>,
}

/// Settings for the local dataset backend.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocalConfig {
    /// Path to the JSON dataset file.
    pub dataset_path: Option<PathBuf>,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Optional default backend id, e.g. "remote" or "local".
    pub default_backend: Option<String>,

    /// Example TOML:
    /// [remote]
    /// base_url = "http://localhost:8080"
    #[serde(default)]
    pub remote: RemoteConfig,

    /// [local]
    /// dataset_path = "/path/to/weather_data.json"
    #[serde(default)]
    pub local: LocalConfig,
}

impl Config {
    /// Return the default backend as a strongly-typed BackendId.
    pub fn default_backend_id(&self) -> Result<BackendId> {
        let s = self.default_backend.as_ref().ok_or_else(|| {
            anyhow::anyhow!(
                "No default backend configured.\n\
                 Hint: run `skywatch configure <backend>` (e.g. `skywatch configure local`) first."
            )
        })?;

        BackendId::try_from(s.as_str())
    }

    /// Store default backend as string.
    pub fn set_default_backend(&mut self, id: BackendId) {
        self.default_backend = Some(id.as_str().to_string());
    }

    /// Base URL for the remote backend, falling back to the stock local origin.
    pub fn remote_base_url(&self) -> &str {
        self.remote.base_url.as_deref().unwrap_or(DEFAULT_REMOTE_BASE_URL)
    }

    pub fn local_dataset_path(&self) -> Option<&Path> {
        self.local.dataset_path.as_deref()
    }

    /// Set the remote base URL; also makes remote the default backend if no
    /// default was chosen yet.
    pub fn set_remote_base_url(&mut self, base_url: String) {
        self.remote.base_url = Some(base_url);

        if self.default_backend.is_none() {
            self.default_backend = Some(BackendId::Remote.to_string());
        }
    }

    /// Set the dataset path; also makes local the default backend if no
    /// default was chosen yet.
    pub fn set_local_dataset_path(&mut self, path: PathBuf) {
        self.local.dataset_path = Some(path);

        if self.default_backend.is_none() {
            self.default_backend = Some(BackendId::Local.to_string());
        }
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skywatch", "skywatch-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
