//! Participant model.

use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of participant slots in a session.
pub const PARTICIPANT_COUNT: usize = 2;

/// Seat assigned at join time: `0` for the first participant, `1` for the second.
///
/// Serialized as the bare index; deserializing anything outside the
/// session's slots fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct ParticipantId(usize);

impl ParticipantId {
    /// The participant who joins first and picks first in every round.
    pub const FIRST: Self = Self(0);
    /// The participant who joins second.
    pub const SECOND: Self = Self(1);

    /// Convert a slot index into an id, rejecting out-of-range values.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        (index < PARTICIPANT_COUNT).then_some(Self(index))
    }

    /// Slot index into the session's participant array.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }

    /// The opposing participant.
    #[must_use]
    pub fn other(self) -> Self {
        Self(1 - self.0)
    }
}

impl TryFrom<usize> for ParticipantId {
    type Error = String;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::from_index(index)
            .ok_or_else(|| format!("participant id {index} out of range 0..{PARTICIPANT_COUNT}"))
    }
}

impl From<ParticipantId> for usize {
    fn from(id: ParticipantId) -> Self {
        id.0
    }
}

impl Display for ParticipantId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One joined connection and the picks it has made so far.
///
/// The connection itself is not stored here; it stays with the handler
/// task that owns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Participant {
    /// Seat assigned at join time; immutable.
    pub id: ParticipantId,
    /// Remote address of the connection, when known.
    pub peer: Option<SocketAddr>,
    /// Join timestamp.
    pub joined_at: DateTime<Utc>,
    /// Selections in the order they were made, one per round.
    pub picks: Vec<String>,
}

impl Participant {
    /// Construct a freshly joined participant with no picks.
    #[must_use]
    pub fn new(id: ParticipantId, peer: Option<SocketAddr>) -> Self {
        Self {
            id,
            peer,
            joined_at: Utc::now(),
            picks: Vec::new(),
        }
    }
}
