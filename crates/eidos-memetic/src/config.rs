//! Tunable parameters for one generation of memetic evolution.
//!
//! [`EvolutionConfig`] bundles every knob of the mutation, recombination and
//! selection passes so that callers (the runner, tests) can override the
//! defaults. It deserializes from the `evolution` section of
//! `eidos-config.yaml`; missing fields fall back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::error::MemeticError;

/// Configuration for an [`EvolutionaryStore`](crate::EvolutionaryStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Per-unit probability of mutation in each generation (default: 0.2).
    #[serde(default = "default_p_mutate")]
    pub p_mutate: f64,

    /// Probability that the sampled pair recombines (default: 0.1).
    #[serde(default = "default_p_recombine")]
    pub p_recombine: f64,

    /// Units with fitness at or below this value are pruned (default: 0.05).
    #[serde(default = "default_prune_threshold")]
    pub prune_threshold: f64,

    /// Multiplier applied to every survivor after pruning (default: 0.95).
    #[serde(default = "default_decay_factor")]
    pub decay_factor: f64,

    /// Multiplier applied to a unit's fitness when it mutates (default: 0.9).
    #[serde(default = "default_mutation_fitness_factor")]
    pub mutation_fitness_factor: f64,

    /// Fitness assigned by [`ingest_text`](crate::EvolutionaryStore::ingest_text)
    /// (default: 0.1).
    #[serde(default = "default_initial_fitness")]
    pub default_initial_fitness: f64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            p_mutate: default_p_mutate(),
            p_recombine: default_p_recombine(),
            prune_threshold: default_prune_threshold(),
            decay_factor: default_decay_factor(),
            mutation_fitness_factor: default_mutation_fitness_factor(),
            default_initial_fitness: default_initial_fitness(),
        }
    }
}

impl EvolutionConfig {
    /// Check every field against its permitted range.
    ///
    /// - probabilities must lie in `[0, 1]`
    /// - multiplicative factors must lie in `(0, 1]`
    /// - thresholds and the default fitness must be finite
    pub fn validate(&self) -> Result<(), MemeticError> {
        check_probability("p_mutate", self.p_mutate)?;
        check_probability("p_recombine", self.p_recombine)?;
        check_factor("decay_factor", self.decay_factor)?;
        check_factor("mutation_fitness_factor", self.mutation_fitness_factor)?;
        check_finite("prune_threshold", self.prune_threshold)?;
        check_finite("default_initial_fitness", self.default_initial_fitness)?;
        Ok(())
    }
}

fn check_probability(field: &'static str, value: f64) -> Result<(), MemeticError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(MemeticError::InvalidConfiguration {
            field,
            reason: format!("must be a probability in [0, 1], got {value}"),
        })
    }
}

fn check_factor(field: &'static str, value: f64) -> Result<(), MemeticError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(MemeticError::InvalidConfiguration {
            field,
            reason: format!("must be in (0, 1], got {value}"),
        })
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), MemeticError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MemeticError::InvalidConfiguration {
            field,
            reason: format!("must be finite, got {value}"),
        })
    }
}

const fn default_p_mutate() -> f64 {
    0.2
}

const fn default_p_recombine() -> f64 {
    0.1
}

const fn default_prune_threshold() -> f64 {
    0.05
}

const fn default_decay_factor() -> f64 {
    0.95
}

const fn default_mutation_fitness_factor() -> f64 {
    0.9
}

const fn default_initial_fitness() -> f64 {
    0.1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EvolutionConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_negative_probability() {
        let config = EvolutionConfig {
            p_mutate: -0.1,
            ..EvolutionConfig::default()
        };
        let err = config.validate();
        assert!(matches!(
            err,
            Err(MemeticError::InvalidConfiguration { field: "p_mutate", .. })
        ));
    }

    #[test]
    fn rejects_nan_probability() {
        let config = EvolutionConfig {
            p_recombine: f64::NAN,
            ..EvolutionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_decay() {
        let config = EvolutionConfig {
            decay_factor: 0.0,
            ..EvolutionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(MemeticError::InvalidConfiguration { field: "decay_factor", .. })
        ));
    }

    #[test]
    fn rejects_infinite_threshold() {
        let config = EvolutionConfig {
            prune_threshold: f64::INFINITY,
            ..EvolutionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn boundary_probabilities_are_accepted() {
        let config = EvolutionConfig {
            p_mutate: 0.0,
            p_recombine: 1.0,
            ..EvolutionConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let parsed: Result<EvolutionConfig, _> = serde_yml::from_str("p_mutate: 0.5\n");
        assert!(parsed.is_ok());
        let config = parsed.unwrap_or_default();
        assert!((config.p_mutate - 0.5).abs() < f64::EPSILON);
        assert!((config.decay_factor - 0.95).abs() < f64::EPSILON);
        assert!((config.prune_threshold - 0.05).abs() < f64::EPSILON);
    }
}
