//! The swarm coordinator: one-shot consensus rounds over a fixed list of
//! participants, plus synchronization and broadcast.
//!
//! A coordinator borrows its participants for its whole lifetime and never
//! owns them. Each consensus round moves through:
//!
//! ```text
//! collecting beliefs -> tallying -> consensus reached -> broadcasting update -> done
//!                                \-> no consensus -------------------------> done
//! ```
//!
//! Rounds are independent; the only state carried between them is the
//! consensus history and whatever beliefs a previous broadcast wrote.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use eidos_types::{ParticipantId, RecordId};

use crate::consensus::{ConsensusMethod, ConsensusOutcome, ConsensusRecord};
use crate::error::SwarmError;
use crate::message::SwarmMessage;
use crate::participant::Participant;

/// Point-in-time summary of a coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwarmStatus {
    /// Label of the swarm.
    pub swarm_id: String,
    /// Number of participants, voting or not.
    pub participant_count: usize,
    /// Number of consensus attempts recorded.
    pub consensus_record_count: usize,
}

/// Drives consensus over a borrowed slice of participants.
#[derive(Debug)]
pub struct SwarmCoordinator<'a, P: Participant> {
    swarm_id: String,
    participants: &'a mut [P],
    history: Vec<ConsensusRecord<P::Belief>>,
}

impl<'a, P: Participant> SwarmCoordinator<'a, P> {
    /// Create a coordinator for `participants`.
    pub fn new(swarm_id: impl Into<String>, participants: &'a mut [P]) -> Self {
        let swarm_id = swarm_id.into();
        tracing::debug!(
            swarm_id,
            participant_count = participants.len(),
            "swarm coordinator initialized"
        );
        Self {
            swarm_id,
            participants,
            history: Vec::new(),
        }
    }

    /// Label of the swarm.
    pub fn swarm_id(&self) -> &str {
        &self.swarm_id
    }

    /// Read-only view of the participants.
    pub fn participants(&self) -> &[P] {
        self.participants
    }

    /// Every consensus attempt so far, oldest first.
    pub fn history(&self) -> &[ConsensusRecord<P::Belief>] {
        &self.history
    }

    /// Run one consensus round on `topic`.
    ///
    /// Participants without a belief abstain. When consensus is reached,
    /// every participant -- abstainers included -- adopts the agreed value.
    /// A record is appended whatever the outcome, including when nobody
    /// voted.
    pub fn achieve_consensus(
        &mut self,
        topic: &str,
        method: ConsensusMethod,
    ) -> ConsensusOutcome<P::Belief> {
        let beliefs: Vec<P::Belief> = self
            .participants
            .iter()
            .filter_map(|p| p.belief().cloned())
            .collect();

        let participant_count = self.participants.len();
        let outcome = method
            .decide(&beliefs, participant_count)
            .map_or_else(ConsensusOutcome::failed, ConsensusOutcome::reached);

        if let Some(agreed) = &outcome.agreed_value {
            tracing::info!(
                swarm_id = %self.swarm_id,
                topic,
                %method,
                votes = beliefs.len(),
                participant_count,
                "consensus reached: {agreed:?}"
            );
            for participant in self.participants.iter_mut() {
                participant.set_belief(agreed.clone());
            }
        } else {
            tracing::debug!(
                swarm_id = %self.swarm_id,
                topic,
                %method,
                votes = beliefs.len(),
                participant_count,
                "no consensus reached"
            );
        }

        self.history.push(ConsensusRecord {
            id: RecordId::new(),
            topic: String::from(topic),
            method,
            beliefs,
            agreed_value: outcome.agreed_value.clone(),
            reached: outcome.reached,
            timestamp: Utc::now(),
        });

        outcome
    }

    /// Run a consensus round with the method given by name.
    ///
    /// Unknown names fail with [`SwarmError::UnsupportedMethod`] before any
    /// belief is read or any record is written.
    pub fn achieve_consensus_by_name(
        &mut self,
        topic: &str,
        method: &str,
    ) -> Result<ConsensusOutcome<P::Belief>, SwarmError> {
        let method = method.parse::<ConsensusMethod>()?;
        Ok(self.achieve_consensus(topic, method))
    }

    /// Set every participant's belief to `value`.
    ///
    /// Does not consult or append to the consensus history.
    pub fn synchronize(&mut self, value: &P::Belief) {
        tracing::debug!(
            swarm_id = %self.swarm_id,
            participant_count = self.participants.len(),
            "synchronizing participants to {value:?}"
        );
        for participant in self.participants.iter_mut() {
            participant.set_belief(value.clone());
        }
    }

    /// Deliver a message from `sender` to every other participant.
    ///
    /// Returns the number of recipients.
    pub fn broadcast(
        &mut self,
        sender: ParticipantId,
        kind: &str,
        payload: serde_json::Value,
    ) -> usize {
        let message = SwarmMessage::new(sender, kind, payload);
        let mut delivered: usize = 0;
        for participant in self.participants.iter_mut().filter(|p| p.id() != sender) {
            participant.receive(&message);
            delivered = delivered.saturating_add(1);
        }
        tracing::debug!(
            swarm_id = %self.swarm_id,
            sender = %sender,
            kind,
            delivered,
            "message broadcast"
        );
        delivered
    }

    /// Summarize the coordinator without modifying it.
    pub fn status(&self) -> SwarmStatus {
        SwarmStatus {
            swarm_id: self.swarm_id.clone(),
            participant_count: self.participants.len(),
            consensus_record_count: self.history.len(),
        }
    }
}
