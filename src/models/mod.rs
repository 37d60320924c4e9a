//! Domain model module declarations.

pub mod participant;
pub mod session;

pub use participant::{Participant, ParticipantId, PARTICIPANT_COUNT};
pub use session::{DraftPhase, SessionSnapshot};
