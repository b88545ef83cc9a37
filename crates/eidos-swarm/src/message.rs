//! Messages broadcast from one participant to the rest of the swarm.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eidos_types::ParticipantId;

/// A message delivered in-process to swarm participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwarmMessage {
    /// The participant that sent the message.
    pub sender: ParticipantId,
    /// Free-form message type, e.g. `"proposal"`.
    pub kind: String,
    /// Message body.
    pub payload: serde_json::Value,
    /// When the message was built.
    pub timestamp: DateTime<Utc>,
}

impl SwarmMessage {
    /// Build a message stamped with the current time.
    pub fn new(sender: ParticipantId, kind: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            sender,
            kind: kind.into(),
            payload,
            timestamp: Utc::now(),
        }
    }
}
