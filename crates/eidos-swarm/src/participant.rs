//! The capability a coordinator needs from a swarm member, and a minimal
//! agent that provides it.
//!
//! The coordinator only reads and writes a participant's belief (and
//! optionally hands it broadcast messages). Where a belief comes from --
//! a knowledge retrieval, a manual seed, a previous round -- is the
//! caller's business.

use eidos_types::ParticipantId;

use crate::message::SwarmMessage;

/// A member of a swarm that holds a belief.
pub trait Participant {
    /// The belief value voted on. Compared by equality when tallying.
    type Belief: Clone + PartialEq + core::fmt::Debug;

    /// Stable identifier of this participant.
    fn id(&self) -> ParticipantId;

    /// The current belief, or `None` to abstain.
    fn belief(&self) -> Option<&Self::Belief>;

    /// Replace the current belief.
    fn set_belief(&mut self, belief: Self::Belief);

    /// Deliver a broadcast message. Ignored by default.
    fn receive(&mut self, message: &SwarmMessage) {
        let _ = message;
    }
}

/// A minimal agent: identity, a display name, a belief slot and an inbox.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent<B> {
    id: ParticipantId,
    name: String,
    belief: Option<B>,
    inbox: Vec<SwarmMessage>,
}

impl<B> Agent<B> {
    /// Create an agent with no belief.
    ///
    /// Without a name, the agent is called `Agent-xxxx` after the first
    /// four hex characters of its id.
    pub fn new(name: Option<&str>) -> Self {
        let id = ParticipantId::new();
        let name = name.map_or_else(|| format!("Agent-{}", id.short(4)), String::from);
        Self {
            id,
            name,
            belief: None,
            inbox: Vec::new(),
        }
    }

    /// Builder-style initial belief.
    #[must_use]
    pub fn with_belief(mut self, belief: B) -> Self {
        self.belief = Some(belief);
        self
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Messages received so far, oldest first.
    pub fn inbox(&self) -> &[SwarmMessage] {
        &self.inbox
    }
}

impl<B: Clone + PartialEq + core::fmt::Debug> Participant for Agent<B> {
    type Belief = B;

    fn id(&self) -> ParticipantId {
        self.id
    }

    fn belief(&self) -> Option<&B> {
        self.belief.as_ref()
    }

    fn set_belief(&mut self, belief: B) {
        self.belief = Some(belief);
    }

    fn receive(&mut self, message: &SwarmMessage) {
        self.inbox.push(message.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_name_uses_id_prefix() {
        let agent: Agent<u8> = Agent::new(None);
        assert_eq!(agent.name(), format!("Agent-{}", agent.id().short(4)));
    }

    #[test]
    fn explicit_name_is_kept() {
        let agent: Agent<u8> = Agent::new(Some("Scout"));
        assert_eq!(agent.name(), "Scout");
        assert_eq!(agent.belief(), None);
    }

    #[test]
    fn set_belief_replaces_value() {
        let mut agent = Agent::new(None).with_belief("a");
        agent.set_belief("b");
        assert_eq!(agent.belief(), Some(&"b"));
    }

    #[test]
    fn receive_fills_inbox() {
        let mut agent: Agent<u8> = Agent::new(None);
        let message = SwarmMessage::new(ParticipantId::new(), "ping", serde_json::json!(1));
        agent.receive(&message);
        assert_eq!(agent.inbox(), [message]);
    }
}
