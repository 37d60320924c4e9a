//! Draft session phase and read-only snapshot types.

use serde::{Deserialize, Serialize};

use super::participant::{Participant, ParticipantId};

/// Lifecycle phase of the draft. Transitions only move forward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DraftPhase {
    /// Fewer than two participants have joined.
    AwaitingPlayers,
    /// Both participants joined; rounds remain.
    Drafting,
    /// Every round has been played.
    Complete,
}

/// Consistent copy of the session state taken under the coordinator lock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct SessionSnapshot {
    /// Current lifecycle phase.
    pub phase: DraftPhase,
    /// 1-based round counter; `rounds + 1` once complete.
    pub round: u32,
    /// Rounds configured for this draft.
    pub rounds: u32,
    /// Participant on the clock; `None` unless drafting.
    pub current_turn: Option<ParticipantId>,
    /// Joined participants in join order.
    pub participants: Vec<Participant>,
}

impl SessionSnapshot {
    /// Picks made by `id`, or an empty slice if that seat is unfilled.
    #[must_use]
    pub fn picks_for(&self, id: ParticipantId) -> &[String] {
        match self.participants.iter().find(|p| p.id == id) {
            Some(participant) => &participant.picks,
            None => &[],
        }
    }
}
