//! Configuration loading and typed config structures for the runner.
//!
//! The canonical configuration lives in `eidos-config.yaml` at the project
//! root. Every field has a default, so a missing section (or an empty
//! file) yields a runnable configuration.

use std::path::Path;

use serde::Deserialize;

use eidos_memetic::EvolutionConfig;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level runner configuration, mirroring `eidos-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Seed, generation count and initial knowledge.
    pub run: RunConfig,

    /// Mutation, recombination and selection parameters.
    pub evolution: EvolutionConfig,

    /// Swarm size and consensus settings.
    pub swarm: SwarmConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl RunnerConfig {
    /// Load configuration from a YAML file at the given path.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string. Blank input yields defaults.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Parameters of a single run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Number of generations to evolve before voting.
    #[serde(default = "default_generations")]
    pub generations: u32,

    /// How many of the fittest units participants may draw beliefs from.
    #[serde(default = "default_retrieve_count")]
    pub retrieve_count: usize,

    /// Text ingested into the store before the first generation.
    #[serde(default = "default_seed_content")]
    pub seed_content: Vec<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            generations: default_generations(),
            retrieve_count: default_retrieve_count(),
            seed_content: default_seed_content(),
        }
    }
}

/// Swarm parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SwarmConfig {
    /// Label of the swarm.
    #[serde(default = "default_swarm_id")]
    pub swarm_id: String,

    /// Number of agents spawned for the vote.
    #[serde(default = "default_participant_count")]
    pub participant_count: usize,

    /// Topic voted on.
    #[serde(default = "default_topic")]
    pub topic: String,

    /// Consensus method name (`majority_vote` or `unanimous_vote`).
    #[serde(default = "default_method")]
    pub method: String,

    /// When the vote fails, synchronize everyone to the fittest unit.
    #[serde(default = "default_true")]
    pub synchronize_on_failure: bool,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            swarm_id: default_swarm_id(),
            participant_count: default_participant_count(),
            topic: default_topic(),
            method: default_method(),
            synchronize_on_failure: default_true(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

const fn default_seed() -> u64 {
    42
}

const fn default_generations() -> u32 {
    3
}

const fn default_retrieve_count() -> usize {
    2
}

fn default_seed_content() -> Vec<String> {
    vec![
        String::from("Foundational principles of ethical AI."),
        String::from("Optimized algorithm for agent communication."),
        String::from("Vision for decentralized AGI governance."),
        String::from("Historical data on past AI failures."),
    ]
}

fn default_swarm_id() -> String {
    String::from("eidos-swarm")
}

const fn default_participant_count() -> usize {
    5
}

fn default_topic() -> String {
    String::from("guiding principle")
}

fn default_method() -> String {
    String::from("majority_vote")
}

fn default_log_level() -> String {
    String::from("info")
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = RunnerConfig::default();
        assert_eq!(config.run.seed, 42);
        assert_eq!(config.run.generations, 3);
        assert_eq!(config.run.seed_content.len(), 4);
        assert_eq!(config.swarm.participant_count, 5);
        assert_eq!(config.swarm.method, "majority_vote");
        assert!(config.evolution.validate().is_ok());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
run:
  seed: 123
  generations: 10
  retrieve_count: 2
  seed_content:
    - "alpha"
    - "beta"

evolution:
  p_mutate: 0.3
  p_recombine: 0.5
  prune_threshold: 0.01
  decay_factor: 0.9
  mutation_fitness_factor: 0.8
  default_initial_fitness: 0.4

swarm:
  swarm_id: "test-swarm"
  participant_count: 7
  topic: "direction"
  method: "unanimous_vote"
  synchronize_on_failure: false

logging:
  level: "debug"
"#;

        let config = RunnerConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.run.seed, 123);
        assert_eq!(config.run.generations, 10);
        assert_eq!(config.run.seed_content, ["alpha", "beta"]);
        assert!((config.evolution.p_recombine - 0.5).abs() < f64::EPSILON);
        assert!((config.evolution.default_initial_fitness - 0.4).abs() < f64::EPSILON);
        assert_eq!(config.swarm.swarm_id, "test-swarm");
        assert_eq!(config.swarm.participant_count, 7);
        assert!(!config.swarm.synchronize_on_failure);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "run:\n  seed: 7\n";
        let config = RunnerConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        // Seed is overridden
        assert_eq!(config.run.seed, 7);
        // Everything else uses defaults
        assert_eq!(config.run.generations, 3);
        assert_eq!(config.swarm.participant_count, 5);
        assert!((config.evolution.p_mutate - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_empty_yaml() {
        let config = RunnerConfig::parse("");
        assert_eq!(config.ok(), Some(RunnerConfig::default()));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let config = RunnerConfig::parse("run: [unclosed");
        assert!(matches!(config, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("eidos-config.yaml");
        if path.exists() {
            let config = RunnerConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
