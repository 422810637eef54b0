use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::Text;

use skywatch_core::{
    BackendId, Config, DEFAULT_MAX_ATTEMPTS, FetchOutcome, WeatherRecord,
    backend::{backend_from_config, default_backend_from_config},
    fetch_with_retry,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skywatch", version, about = "Resilient city weather fetcher")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure a specific backend and make it the default.
    Configure {
        /// Backend short name, "remote" or "local".
        backend: String,
    },

    /// Show weather for a city.
    Show {
        /// City name.
        city: String,

        /// Backend to use; defaults to the configured default backend.
        #[arg(long)]
        backend: Option<String>,

        /// Maximum fetch attempts before giving up.
        #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
        attempts: u32,

        /// Print the raw result envelope as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { backend } => configure(&backend),
            Command::Show { city, backend, attempts, json } => {
                show(&city, backend.as_deref(), attempts, json).await
            }
        }
    }
}

fn configure(backend: &str) -> anyhow::Result<()> {
    let id = BackendId::try_from(backend)?;
    let mut config = Config::load()?;

    match id {
        BackendId::Remote => {
            let base_url = Text::new("Weather service base URL:")
                .with_default(config.remote_base_url())
                .prompt()
                .context("Failed to read base URL")?;
            config.set_remote_base_url(base_url);
        }
        BackendId::Local => {
            let path = Text::new("Path to the weather dataset JSON file:")
                .prompt()
                .context("Failed to read dataset path")?;
            config.set_local_dataset_path(PathBuf::from(path));
        }
    }

    config.set_default_backend(id);
    config.save()?;

    println!("Saved. Default backend is now '{id}'.");
    Ok(())
}

async fn show(city: &str, backend: Option<&str>, attempts: u32, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;

    let (id, resolver) = match backend {
        Some(name) => {
            let id = BackendId::try_from(name)?;
            (id, backend_from_config(id, &config)?)
        }
        None => (config.default_backend_id()?, default_backend_from_config(&config)?),
    };

    let outcome = fetch_with_retry(resolver.as_ref(), city, attempts).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        if !outcome.is_success() {
            std::process::exit(1);
        }
        return Ok(());
    }

    print_outcome(id, outcome)
}

fn print_outcome(id: BackendId, outcome: FetchOutcome<WeatherRecord>) -> anyhow::Result<()> {
    match outcome.into_result() {
        Ok(record) => {
            println!("Weather for {} (via {id} backend):", record.city);
            println!("  temperature: {:.1}", record.temp);
            println!("  condition:   {}", record.condition);
            println!("  humidity:    {}%", record.humidity);
            Ok(())
        }
        Err(message) => bail!(message),
    }
}
