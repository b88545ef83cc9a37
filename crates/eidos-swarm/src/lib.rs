//! Swarm consensus coordinator for the Eidos SDK.
//!
//! A [`SwarmCoordinator`] borrows a list of [`Participant`]s, collects
//! their beliefs, applies a [`ConsensusMethod`], pushes the agreed value
//! back to every participant and keeps an append-only history of
//! [`ConsensusRecord`]s. It knows nothing about the evolutionary store;
//! callers that want retrieved knowledge to shape beliefs seed those
//! beliefs themselves.
//!
//! # Modules
//!
//! - [`consensus`] -- Methods, tallying rules and records
//! - [`coordinator`] -- The coordinator and its status
//! - [`error`] -- Error types ([`SwarmError`])
//! - [`message`] -- Broadcast messages ([`SwarmMessage`])
//! - [`participant`] -- The participant capability and a minimal [`Agent`]

pub mod consensus;
pub mod coordinator;
pub mod error;
pub mod message;
pub mod participant;

pub use consensus::{
    ConsensusMethod, ConsensusOutcome, ConsensusRecord, majority_vote, unanimous_vote,
};
pub use coordinator::{SwarmCoordinator, SwarmStatus};
pub use error::SwarmError;
pub use message::SwarmMessage;
pub use participant::{Agent, Participant};
