//! Error types for the runner binary.
//!
//! [`RunnerError`] wraps every failure mode of a run so that `main` can
//! propagate with `?`.

/// Top-level error for the runner.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: crate::config::ConfigError,
    },

    /// The evolutionary store rejected its configuration.
    #[error("memetic error: {source}")]
    Memetic {
        /// The underlying store error.
        #[from]
        source: eidos_memetic::MemeticError,
    },

    /// The consensus round could not run.
    #[error("swarm error: {source}")]
    Swarm {
        /// The underlying coordinator error.
        #[from]
        source: eidos_swarm::SwarmError,
    },

    /// The run summary could not be serialized.
    #[error("serde error: {source}")]
    Serde {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}
