//! Driver binary for the Eidos SDK.
//!
//! Wires the evolutionary store to a swarm of agents for one run and
//! prints the resulting summary as JSON.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `eidos-config.yaml` (or the path given as
//!    the first argument, or `EIDOS_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Seed and evolve the store, then run the consensus round
//! 4. Print the run summary

mod config;
mod error;
mod run;

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::RunnerConfig;
use crate::error::RunnerError;

/// Config file used when neither an argument nor `EIDOS_CONFIG` is given.
const DEFAULT_CONFIG_PATH: &str = "eidos-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the run fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = config_path();
    let (config, loaded) = load_config(&path)?;

    // Structured logging; RUST_LOG wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("eidos-runner starting");
    if loaded {
        info!(path = %path.display(), "configuration loaded");
    } else {
        warn!(path = %path.display(), "config file not found, using defaults");
    }
    info!(
        seed = config.run.seed,
        generations = config.run.generations,
        participant_count = config.swarm.participant_count,
        method = config.swarm.method,
        "run parameters"
    );

    let summary = run::run(&config)?;
    let json = serde_json::to_string_pretty(&summary).map_err(RunnerError::from)?;
    println!("{json}");
    Ok(())
}

fn config_path() -> PathBuf {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var("EIDOS_CONFIG").ok())
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Load the config file, falling back to defaults when it does not exist.
fn load_config(path: &Path) -> Result<(RunnerConfig, bool), RunnerError> {
    if path.exists() {
        Ok((RunnerConfig::from_file(path)?, true))
    } else {
        Ok((RunnerConfig::default(), false))
    }
}
