//! Consensus methods, tallying rules and the consensus record.
//!
//! # Majority vote
//!
//! Beliefs are tallied by equality in the order they were collected. The
//! most frequent value wins; when several values share the top count, the
//! one collected first wins. Consensus is reached only when the winner's
//! count is strictly greater than half of *all* participants, so
//! abstaining participants count against a majority.
//!
//! A coordinator never collects more beliefs than it has participants, and
//! two values tied at the top cannot both exceed half of them. The
//! tie-break therefore never changes the outcome of a coordinator round; it
//! only matters when [`majority_vote`] is called directly with fewer
//! participants than beliefs.
//!
//! # Unanimous vote
//!
//! Consensus is reached when every collected belief equals the first one.
//! Abstentions do not break unanimity.

use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eidos_types::RecordId;

use crate::error::SwarmError;

/// The agreement rule applied to collected beliefs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsensusMethod {
    /// Strict majority of all participants.
    MajorityVote,
    /// Every voter holds the same belief.
    UnanimousVote,
}

impl ConsensusMethod {
    /// Canonical name, as accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MajorityVote => "majority_vote",
            Self::UnanimousVote => "unanimous_vote",
        }
    }

    /// Apply this rule to `beliefs` collected from a swarm of
    /// `participant_count` members. Returns the agreed value, if any.
    pub fn decide<B: Clone + PartialEq>(self, beliefs: &[B], participant_count: usize) -> Option<B> {
        match self {
            Self::MajorityVote => majority_vote(beliefs, participant_count),
            Self::UnanimousVote => unanimous_vote(beliefs),
        }
    }
}

impl core::fmt::Display for ConsensusMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsensusMethod {
    type Err = SwarmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "majority_vote" => Ok(Self::MajorityVote),
            "unanimous_vote" => Ok(Self::UnanimousVote),
            other => Err(SwarmError::UnsupportedMethod(String::from(other))),
        }
    }
}

/// Most frequent belief, if it is held by more than half of
/// `participant_count`. Ties go to the value collected first.
pub fn majority_vote<B: Clone + PartialEq>(beliefs: &[B], participant_count: usize) -> Option<B> {
    let mut tally: Vec<(&B, usize)> = Vec::new();
    for belief in beliefs {
        if let Some(entry) = tally.iter_mut().find(|entry| entry.0 == belief) {
            entry.1 = entry.1.saturating_add(1);
        } else {
            tally.push((belief, 1));
        }
    }

    // Strictly-greater comparison keeps the earliest value among ties.
    let mut winner: Option<(&B, usize)> = None;
    for (value, count) in tally {
        if winner.is_none_or(|(_, best)| count > best) {
            winner = Some((value, count));
        }
    }

    winner
        .filter(|&(_, count)| count.saturating_mul(2) > participant_count)
        .map(|(value, _)| value.clone())
}

/// The shared belief, if every collected belief equals the first.
pub fn unanimous_vote<B: Clone + PartialEq>(beliefs: &[B]) -> Option<B> {
    let (first, rest) = beliefs.split_first()?;
    rest.iter().all(|b| b == first).then(|| first.clone())
}

/// Result of one consensus round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusOutcome<B> {
    /// The value agreed on, when consensus was reached.
    pub agreed_value: Option<B>,
    /// Whether consensus was reached.
    pub reached: bool,
}

impl<B> ConsensusOutcome<B> {
    /// Outcome for a value that was agreed on.
    pub const fn reached(value: B) -> Self {
        Self {
            agreed_value: Some(value),
            reached: true,
        }
    }

    /// Outcome for a round without agreement.
    pub const fn failed() -> Self {
        Self {
            agreed_value: None,
            reached: false,
        }
    }

    /// `(agreed_value, reached)` pair.
    pub fn into_tuple(self) -> (Option<B>, bool) {
        (self.agreed_value, self.reached)
    }
}

/// Append-only record of one consensus attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusRecord<B> {
    /// Unique id of the record.
    pub id: RecordId,
    /// What the swarm was asked to agree on.
    pub topic: String,
    /// Rule applied.
    pub method: ConsensusMethod,
    /// Beliefs collected for the vote, in participant order.
    pub beliefs: Vec<B>,
    /// Agreed value, `None` when consensus failed.
    pub agreed_value: Option<B>,
    /// Whether consensus was reached.
    pub reached: bool,
    /// When the attempt finished.
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn majority_with_three_of_four() {
        assert_eq!(majority_vote(&["A", "A", "B", "A"], 4), Some("A"));
    }

    #[test]
    fn all_distinct_has_no_majority() {
        assert_eq!(majority_vote(&["A", "B", "C", "D"], 4), None);
    }

    #[test]
    fn exactly_half_is_not_a_majority() {
        assert_eq!(majority_vote(&["A", "A", "B", "B"], 4), None);
        assert_eq!(majority_vote(&["A", "A"], 4), None);
    }

    #[test]
    fn abstentions_count_against_majority() {
        // Two of two voters agree, but the swarm has five members.
        assert_eq!(majority_vote(&["A", "A"], 5), None);
        // Three of five is enough even with two abstentions.
        assert_eq!(majority_vote(&["A", "A", "A"], 5), Some("A"));
    }

    #[test]
    fn tie_goes_to_first_collected() {
        // B and A tie at two; B was collected first. A majority of a
        // three-member swarm would need only two, so the tie-break decides.
        assert_eq!(majority_vote(&["B", "A", "A", "B"], 3), Some("B"));
        assert_eq!(majority_vote(&["A", "B", "B", "A"], 3), Some("A"));
        // With one belief per participant the same tie is never a majority.
        assert_eq!(majority_vote(&["B", "A", "A", "B"], 4), None);
    }

    #[test]
    fn later_value_wins_when_strictly_ahead() {
        assert_eq!(majority_vote(&["B", "A", "A", "A"], 4), Some("A"));
    }

    #[test]
    fn majority_of_nothing_is_none() {
        let empty: [&str; 0] = [];
        assert_eq!(majority_vote(&empty, 0), None);
        assert_eq!(majority_vote(&empty, 3), None);
    }

    #[test]
    fn unanimous_requires_all_equal() {
        assert_eq!(unanimous_vote(&["A", "A", "B", "A"]), None);
        assert_eq!(unanimous_vote(&["A", "A", "A", "A"]), Some("A"));
        let empty: [&str; 0] = [];
        assert_eq!(unanimous_vote(&empty), None);
    }

    #[test]
    fn method_names_round_trip() {
        for method in [ConsensusMethod::MajorityVote, ConsensusMethod::UnanimousVote] {
            assert_eq!(method.as_str().parse::<ConsensusMethod>(), Ok(method));
            assert_eq!(method.to_string(), method.as_str());
        }
    }

    #[test]
    fn unknown_method_is_rejected() {
        assert_eq!(
            "plurality".parse::<ConsensusMethod>(),
            Err(SwarmError::UnsupportedMethod(String::from("plurality")))
        );
    }

    #[test]
    fn decide_dispatches_on_method() {
        let beliefs = [1, 1, 2];
        assert_eq!(ConsensusMethod::MajorityVote.decide(&beliefs, 3), Some(1));
        assert_eq!(ConsensusMethod::UnanimousVote.decide(&beliefs, 3), None);
    }
}
