//! Evolutionary knowledge store (the memetic kernel) for the Eidos SDK.
//!
//! This crate holds a population of [`KnowledgeUnit`]s and evolves it one
//! generation at a time through mutation, recombination and selection.
//! It performs no I/O and never touches global randomness: every call
//! that needs random draws takes a caller-supplied [`rand::Rng`].
//!
//! # Modules
//!
//! - [`config`] -- Tunable evolution parameters ([`EvolutionConfig`])
//! - [`error`] -- Error types ([`MemeticError`])
//! - [`store`] -- The population, generation step, retrieval and status ([`EvolutionaryStore`])
//! - [`unit`] -- A single knowledge unit and its mutation/recombination ([`KnowledgeUnit`])

pub mod config;
pub mod error;
pub mod store;
pub mod unit;

pub use config::EvolutionConfig;
pub use error::MemeticError;
pub use store::{
    EvolutionaryStore, GenerationReport, HistoryEntry, RetrievalQuery, SortBy, StoreStatus,
};
pub use unit::{Context, KnowledgeUnit, MUTATION_MARKER};
