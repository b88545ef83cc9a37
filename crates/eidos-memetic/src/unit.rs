//! The knowledge unit: a single versioned piece of content with a fitness
//! score and a provenance trail.
//!
//! Identity, content annotation (`context`) and creation time are fixed at
//! construction. Fitness changes through mutation and decay; the lineage
//! only ever grows. Fields are private so these rules hold for every
//! holder of a unit, including copies returned from retrieval.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eidos_types::{Content, UnitId};

/// Read-only metadata attached to a unit at ingestion.
pub type Context = BTreeMap<String, serde_json::Value>;

/// Suffix appended to the textual content of a mutated unit.
pub const MUTATION_MARKER: &str = "_mutated";

/// A single unit of knowledge in an evolutionary population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeUnit {
    id: UnitId,
    content: Content,
    context: Context,
    fitness: f64,
    lineage: Vec<String>,
    created_at: DateTime<Utc>,
}

impl KnowledgeUnit {
    /// Create a new unit with a fresh id, an empty lineage, and the current
    /// time as its creation timestamp.
    pub fn new(content: Content, context: Context, initial_fitness: f64) -> Self {
        Self {
            id: UnitId::new(),
            content,
            context,
            fitness: initial_fitness,
            lineage: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Unique identifier assigned at creation.
    pub const fn id(&self) -> UnitId {
        self.id
    }

    /// Current payload.
    pub const fn content(&self) -> &Content {
        &self.content
    }

    /// Metadata supplied at ingestion.
    pub const fn context(&self) -> &Context {
        &self.context
    }

    /// Current fitness score.
    pub const fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Provenance markers, oldest first.
    pub fn lineage(&self) -> &[String] {
        &self.lineage
    }

    /// Creation timestamp.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Mutate this unit in place.
    ///
    /// The content becomes its textual form with [`MUTATION_MARKER`]
    /// appended, fitness is multiplied by `fitness_factor`, and a
    /// `mutated_at_step_{n}` marker is recorded, where `n` is the lineage
    /// length before the append.
    pub fn mutate(&mut self, fitness_factor: f64) {
        let step = self.lineage.len();
        self.content = Content::Text(format!("{}{MUTATION_MARKER}", self.content));
        self.fitness *= fitness_factor;
        self.lineage.push(format!("mutated_at_step_{step}"));
    }

    /// Produce a child from this unit and `other`.
    ///
    /// The child's content is `({self} & {other})`, its fitness is the mean
    /// of both parents, and its lineage records one marker per parent: the
    /// parent's latest lineage marker, or its content when it has none.
    /// Neither parent is modified.
    pub fn recombine(&self, other: &Self) -> Self {
        let content = Content::Text(format!("({} & {})", self.content, other.content));
        let fitness = f64::midpoint(self.fitness, other.fitness);
        let mut child = Self::new(content, Context::new(), fitness);
        child.lineage.push(format!("recombined_from_{}", self.provenance_tag()));
        child.lineage.push(format!("recombined_from_{}", other.provenance_tag()));
        child
    }

    /// Apply multiplicative decay to fitness.
    pub(crate) fn decay(&mut self, factor: f64) {
        self.fitness *= factor;
    }

    fn provenance_tag(&self) -> String {
        self.lineage
            .last()
            .cloned()
            .unwrap_or_else(|| self.content.to_string())
    }
}

impl core::fmt::Display for KnowledgeUnit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let preview: String = self.content.to_string().chars().take(20).collect();
        write!(f, "KnowledgeUnit(content='{preview}...', fitness={:.2})", self.fitness)
    }
}
