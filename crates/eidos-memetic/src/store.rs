//! The evolutionary store (memetic kernel).
//!
//! Owns a population of [`KnowledgeUnit`]s and drives it one generation at
//! a time:
//!
//! 1. **Mutation** -- every unit present at the start of the generation
//!    independently mutates with probability `p_mutate`.
//! 2. **Recombination** -- when at least two units exist, one unordered
//!    pair is drawn uniformly and recombines with probability
//!    `p_recombine`. The child joins the population at the end of the
//!    generation and is not decayed in it. A child whose fitness is at or
//!    below `prune_threshold` is discarded and counted as pruned.
//! 3. **Selection** -- units whose fitness is at or below
//!    `prune_threshold` are removed, then every survivor decays by
//!    `decay_factor`. Pruning looks at pre-decay fitness.
//!
//! Randomness is always supplied by the caller, so a seeded generator makes
//! a run reproducible.
//!
//! Retrieval never hands out references into the population: results are
//! copies, ranked by fitness or by age and optionally filtered by a
//! case-insensitive substring of the content.

use core::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use eidos_types::{Content, KernelId, UnitId};

use crate::config::EvolutionConfig;
use crate::error::MemeticError;
use crate::unit::{Context, KnowledgeUnit};

/// Number of content characters kept in an ingestion history entry.
const HISTORY_PREVIEW_CHARS: usize = 50;

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// One entry of the store's audit history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HistoryEntry {
    /// A unit was ingested.
    Ingested {
        /// The new unit.
        unit_id: UnitId,
        /// Leading characters of the unit's content.
        preview: String,
    },
    /// A generation completed.
    Evolved {
        /// Generation number, starting at 1.
        generation: u64,
        /// Population size after the generation.
        population_size: usize,
    },
}

/// Summary of what one call to [`EvolutionaryStore::evolve`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Generation number, starting at 1.
    pub generation: u64,
    /// Number of units mutated in the mutation pass.
    pub mutated: usize,
    /// Id of the child produced by recombination, if it was kept.
    pub recombined: Option<UnitId>,
    /// Number of units removed by selection, including a discarded child.
    pub pruned: usize,
    /// Population size once the generation completed.
    pub population_size: usize,
}

// ---------------------------------------------------------------------------
// Retrieval
// ---------------------------------------------------------------------------

/// Ordering applied to retrieval results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Highest fitness first.
    #[default]
    Fitness,
    /// Oldest first.
    Age,
}

impl FromStr for SortBy {
    type Err = MemeticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fitness" => Ok(Self::Fitness),
            "age" => Ok(Self::Age),
            other => Err(MemeticError::UnsupportedSortKey(String::from(other))),
        }
    }
}

/// Parameters for [`EvolutionaryStore::retrieve`].
///
/// The default query returns the single fittest unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalQuery {
    /// Case-insensitive substring the content must contain.
    #[serde(default)]
    pub text: Option<String>,
    /// Maximum number of results.
    #[serde(default = "default_count")]
    pub count: usize,
    /// Result ordering.
    #[serde(default)]
    pub sort_by: SortBy,
}

impl Default for RetrievalQuery {
    fn default() -> Self {
        Self {
            text: None,
            count: default_count(),
            sort_by: SortBy::Fitness,
        }
    }
}

impl RetrievalQuery {
    /// The default query: one result, ranked by fitness, no filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only units whose content contains `text`, ignoring case.
    #[must_use]
    pub fn matching(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Return at most `count` units.
    #[must_use]
    pub const fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Order results by `sort_by`.
    #[must_use]
    pub const fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }
}

const fn default_count() -> usize {
    1
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Point-in-time summary of a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreStatus {
    /// Identifier of the store instance.
    pub kernel_id: KernelId,
    /// Number of units in the population.
    pub population_size: usize,
    /// Mean fitness of the population, 0 when empty.
    pub average_fitness: f64,
    /// Number of audit history entries.
    pub history_length: usize,
}

// ---------------------------------------------------------------------------
// EvolutionaryStore
// ---------------------------------------------------------------------------

/// An evolving population of knowledge units.
///
/// # Lifecycle
///
/// 1. Units enter through [`ingest`](Self::ingest) (or are born from
///    recombination during [`evolve`](Self::evolve)).
/// 2. Each [`evolve`](Self::evolve) call mutates, recombines, prunes and
///    decays.
/// 3. [`retrieve`](Self::retrieve) answers ranked, filtered queries with
///    copies of the current units.
#[derive(Debug, Clone)]
pub struct EvolutionaryStore {
    kernel_id: KernelId,
    population: Vec<KnowledgeUnit>,
    history: Vec<HistoryEntry>,
    config: EvolutionConfig,
    generation: u64,
}

impl EvolutionaryStore {
    /// Create an empty store.
    ///
    /// Fails with [`MemeticError::InvalidConfiguration`] if any parameter
    /// is out of range.
    pub fn new(config: EvolutionConfig) -> Result<Self, MemeticError> {
        config.validate()?;
        Ok(Self {
            kernel_id: KernelId::new(),
            population: Vec::new(),
            history: Vec::new(),
            config,
            generation: 0,
        })
    }

    /// Identifier of this store instance.
    pub const fn kernel_id(&self) -> KernelId {
        self.kernel_id
    }

    /// The configuration in effect.
    pub const fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Number of generations run so far.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of units in the population.
    pub const fn len(&self) -> usize {
        self.population.len()
    }

    /// Whether the population is empty.
    pub const fn is_empty(&self) -> bool {
        self.population.is_empty()
    }

    /// Read-only view of the population, in insertion order.
    pub fn units(&self) -> &[KnowledgeUnit] {
        &self.population
    }

    /// Look up a unit by id.
    pub fn get(&self, id: UnitId) -> Option<&KnowledgeUnit> {
        self.population.iter().find(|u| u.id() == id)
    }

    /// The audit history, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Create a unit and add it to the population.
    ///
    /// There is no uniqueness constraint on content. Returns a copy of the
    /// inserted unit.
    pub fn ingest(
        &mut self,
        content: impl Into<Content>,
        context: Context,
        initial_fitness: f64,
    ) -> KnowledgeUnit {
        let unit = KnowledgeUnit::new(content.into(), context, initial_fitness);
        let preview: String = unit
            .content()
            .to_string()
            .chars()
            .take(HISTORY_PREVIEW_CHARS)
            .collect();
        tracing::trace!(
            kernel_id = %self.kernel_id,
            unit_id = %unit.id(),
            fitness = initial_fitness,
            "ingested unit: {preview}"
        );
        self.history.push(HistoryEntry::Ingested {
            unit_id: unit.id(),
            preview,
        });
        self.population.push(unit.clone());
        unit
    }

    /// Ingest text with no context and the configured default fitness.
    pub fn ingest_text(&mut self, text: &str) -> KnowledgeUnit {
        let fitness = self.config.default_initial_fitness;
        self.ingest(text, Context::new(), fitness)
    }

    /// Run one generation: mutation, recombination, then selection.
    pub fn evolve(&mut self, rng: &mut impl Rng) -> GenerationReport {
        let generation = self.generation.saturating_add(1);

        // Mutation pass over the units present at the start of the generation.
        let mut mutated: usize = 0;
        for unit in &mut self.population {
            if rng.random_bool(self.config.p_mutate) {
                unit.mutate(self.config.mutation_fitness_factor);
                mutated = mutated.saturating_add(1);
            }
        }

        // Recombination pass; the child is held back until selection is done.
        let child = self.sample_pair(rng).and_then(|(a, b)| {
            rng.random_bool(self.config.p_recombine)
                .then(|| a.recombine(b))
        });

        // Selection pass: prune on pre-decay fitness, then decay survivors.
        let before = self.population.len();
        let threshold = self.config.prune_threshold;
        self.population.retain(|u| u.fitness() > threshold);
        let mut pruned = before.saturating_sub(self.population.len());
        for unit in &mut self.population {
            unit.decay(self.config.decay_factor);
        }

        // A child born at or below the threshold is discarded, not decayed.
        let child = child.filter(|c| {
            let keep = c.fitness() > threshold;
            if !keep {
                pruned = pruned.saturating_add(1);
            }
            keep
        });
        let recombined = child.as_ref().map(KnowledgeUnit::id);
        if let Some(child) = child {
            self.population.push(child);
        }

        self.generation = generation;
        let population_size = self.population.len();
        self.history.push(HistoryEntry::Evolved {
            generation,
            population_size,
        });

        tracing::debug!(
            kernel_id = %self.kernel_id,
            generation,
            mutated,
            recombined = recombined.is_some(),
            pruned,
            population_size,
            "evolution step complete"
        );

        GenerationReport {
            generation,
            mutated,
            recombined,
            pruned,
            population_size,
        }
    }

    /// Draw one unordered pair of distinct units uniformly at random.
    ///
    /// Returns `None` when fewer than two units exist.
    fn sample_pair(&self, rng: &mut impl Rng) -> Option<(&KnowledgeUnit, &KnowledgeUnit)> {
        let len = self.population.len();
        if len < 2 {
            return None;
        }
        let first = rng.random_range(0..len);
        // Draw from the remaining len - 1 slots and skip over `first`.
        let mut second = rng.random_range(0..len.saturating_sub(1));
        if second >= first {
            second = second.saturating_add(1);
        }
        Some((self.population.get(first)?, self.population.get(second)?))
    }

    /// Answer a retrieval query with copies of matching units.
    ///
    /// Never fails: an empty population or a filter with no matches yields
    /// an empty vector. Sorting is stable, so units with equal keys keep
    /// insertion order.
    pub fn retrieve(&self, query: &RetrievalQuery) -> Vec<KnowledgeUnit> {
        let mut results: Vec<&KnowledgeUnit> = match query.text.as_deref() {
            Some(needle) => self
                .population
                .iter()
                .filter(|u| u.content().contains_ignore_case(needle))
                .collect(),
            None => self.population.iter().collect(),
        };

        match query.sort_by {
            SortBy::Fitness => results.sort_by(|a, b| b.fitness().total_cmp(&a.fitness())),
            SortBy::Age => results.sort_by_key(|u| u.created_at()),
        }

        results.into_iter().take(query.count).cloned().collect()
    }

    /// Summarize the store without modifying it.
    pub fn status(&self) -> StoreStatus {
        StoreStatus {
            kernel_id: self.kernel_id,
            population_size: self.population.len(),
            average_fitness: self.average_fitness(),
            history_length: self.history.len(),
        }
    }

    fn average_fitness(&self) -> f64 {
        if self.population.is_empty() {
            return 0.0;
        }
        let total: f64 = self.population.iter().map(KnowledgeUnit::fitness).sum();
        // Population sizes stay far below 2^52.
        #[allow(clippy::cast_precision_loss)]
        let count = self.population.len() as f64;
        total / count
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
