//! Shared type definitions for the Eidos memetic kernel and swarm protocol.
//!
//! Both the evolutionary store (`eidos-memetic`) and the consensus
//! coordinator (`eidos-swarm`) depend on this crate; neither depends on the
//! other.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for all entity identifiers
//! - [`content`] -- The [`Content`] payload carried by knowledge units

pub mod content;
pub mod ids;

pub use content::Content;
pub use ids::{KernelId, ParticipantId, RecordId, UnitId};
