//! Shared draft session and its turn state machine.
//!
//! A [`SessionCoordinator`] owns every session field behind one
//! `std::sync::Mutex`. Each operation takes the lock for a short critical
//! section and releases it before returning, so callers never hold it
//! across network I/O.
//!
//! Every mutation also publishes a [`TurnSignal`] on a `watch` channel
//! while the lock is still held. Handlers await that channel through
//! [`SessionCoordinator::wait_until_ready`] and
//! [`SessionCoordinator::wait_for_turn`] instead of polling, and wake with
//! the snapshot that was current when the state changed.
//!
//! Phases move strictly forward:
//!
//! ```text
//! AwaitingPlayers --(2nd join)--> Drafting --(last pick of last round)--> Complete
//! ```

use std::net::SocketAddr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info};

use crate::models::{DraftPhase, Participant, ParticipantId, SessionSnapshot, PARTICIPANT_COUNT};
use crate::{AppError, Result};

/// Rounds played when no explicit count is configured.
pub const DEFAULT_ROUNDS: u32 = 6;

/// Turn-relevant view of the session, republished after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnSignal {
    /// Participants joined so far.
    pub joined: usize,
    /// Participant on the clock.
    pub current_turn: ParticipantId,
    /// 1-based round counter.
    pub round: u32,
    /// Whether every round has been played.
    pub complete: bool,
}

impl TurnSignal {
    /// Both seats are filled.
    #[must_use]
    pub fn ready(&self) -> bool {
        self.joined >= PARTICIPANT_COUNT
    }
}

/// Result of waiting for a participant's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStatus {
    /// The participant is on the clock in `round`.
    OnTheClock {
        /// 1-based round the pick belongs to.
        round: u32,
    },
    /// The draft finished; no more picks will be accepted.
    Complete,
}

/// What a successful [`SessionCoordinator::submit_choice`] changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Round the recorded pick belongs to.
    pub round: u32,
    /// Participant now on the clock.
    pub next_turn: ParticipantId,
    /// Whether this pick closed out the round.
    pub round_advanced: bool,
    /// Whether this pick was the last of the draft.
    pub complete: bool,
}

struct SessionState {
    participants: [Option<Participant>; PARTICIPANT_COUNT],
    next_participant_id: usize,
    current_turn: ParticipantId,
    round: u32,
    rounds: u32,
}

impl SessionState {
    fn new(rounds: u32) -> Self {
        Self {
            participants: std::array::from_fn(|_| None),
            next_participant_id: 0,
            current_turn: ParticipantId::FIRST,
            round: 1,
            rounds,
        }
    }

    fn is_ready(&self) -> bool {
        self.next_participant_id >= PARTICIPANT_COUNT
    }

    fn is_complete(&self) -> bool {
        self.round > self.rounds
    }

    fn phase(&self) -> DraftPhase {
        if self.is_complete() {
            DraftPhase::Complete
        } else if self.is_ready() {
            DraftPhase::Drafting
        } else {
            DraftPhase::AwaitingPlayers
        }
    }

    fn signal(&self) -> TurnSignal {
        TurnSignal {
            joined: self.next_participant_id,
            current_turn: self.current_turn,
            round: self.round,
            complete: self.is_complete(),
        }
    }
}

/// Lock-guarded owner of the single draft session.
pub struct SessionCoordinator {
    state: Mutex<SessionState>,
    signal: watch::Sender<TurnSignal>,
}

impl Default for SessionCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_ROUNDS)
    }
}

impl SessionCoordinator {
    /// Create an empty session that completes after `rounds` rounds.
    ///
    /// A `rounds` of zero is treated as one.
    #[must_use]
    pub fn new(rounds: u32) -> Self {
        let state = SessionState::new(rounds.max(1));
        let (signal, _) = watch::channel(state.signal());
        Self {
            state: Mutex::new(state),
            signal,
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Must be called with the lock held so waiters see a consistent view.
    fn publish(&self, state: &SessionState) {
        self.signal.send_replace(state.signal());
    }

    /// Claim the next free seat.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Capacity` when both seats are taken. The session
    /// is left untouched in that case.
    pub fn try_join(&self, peer: Option<SocketAddr>) -> Result<ParticipantId> {
        let mut state = self.lock();
        let Some(id) = ParticipantId::from_index(state.next_participant_id) else {
            return Err(AppError::Capacity(format!(
                "session already has {PARTICIPANT_COUNT} participants"
            )));
        };

        state.participants[id.index()] = Some(Participant::new(id, peer));
        state.next_participant_id += 1;
        self.publish(&state);
        let ready = state.is_ready();
        drop(state);

        info!(participant = %id, ?peer, "participant joined");
        if ready {
            info!("session full, draft can begin");
        }
        Ok(id)
    }

    /// Both seats are taken; further joins will be rejected.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.lock().next_participant_id >= PARTICIPANT_COUNT
    }

    /// Participants joined so far.
    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.lock().next_participant_id
    }

    /// Exactly two participants have joined.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.lock().is_ready()
    }

    /// Every round has been played.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.lock().is_complete()
    }

    /// `id` is on the clock and the draft is still running.
    #[must_use]
    pub fn is_my_turn(&self, id: ParticipantId) -> bool {
        let state = self.lock();
        state.current_turn == id && !state.is_complete()
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> DraftPhase {
        self.lock().phase()
    }

    /// Current 1-based round.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.lock().round
    }

    /// Rounds this draft runs for.
    #[must_use]
    pub fn rounds(&self) -> u32 {
        self.lock().rounds
    }

    /// Participant whose turn it is.
    #[must_use]
    pub fn current_turn(&self) -> ParticipantId {
        self.lock().current_turn
    }

    /// Picks made so far by `id`; empty if that seat is unfilled.
    #[must_use]
    pub fn picks(&self, id: ParticipantId) -> Vec<String> {
        self.lock().participants[id.index()]
            .as_ref()
            .map_or_else(Vec::new, |p| p.picks.clone())
    }

    /// Copy of the whole session taken in one critical section.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.lock();
        let phase = state.phase();
        SessionSnapshot {
            phase,
            round: state.round,
            rounds: state.rounds,
            current_turn: (phase == DraftPhase::Drafting).then_some(state.current_turn),
            participants: state.participants.iter().flatten().cloned().collect(),
        }
    }

    /// Record `choice` for `id` and hand the turn to the other participant.
    ///
    /// The turn check and the mutation happen in the same critical section,
    /// so a stale "is it my turn" answer can never commit a pick.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Turn` if the draft has not started, has already
    /// completed, or `id` is not on the clock. Nothing is mutated on error.
    pub fn submit_choice(
        &self,
        id: ParticipantId,
        choice: impl Into<String>,
    ) -> Result<SubmitOutcome> {
        let choice = choice.into();
        let mut state = self.lock();

        if state.is_complete() {
            return Err(AppError::Turn("draft is already complete".into()));
        }
        if !state.is_ready() {
            return Err(AppError::Turn("draft has not started".into()));
        }
        if state.current_turn != id {
            return Err(AppError::Turn(format!(
                "participant {id} is not on the clock, participant {} is",
                state.current_turn
            )));
        }

        let round = state.round;
        let Some(participant) = state.participants[id.index()].as_mut() else {
            return Err(AppError::Turn(format!("participant {id} has not joined")));
        };
        debug!(participant = %id, round, pick = %choice, "recording pick");
        participant.picks.push(choice);

        state.current_turn = id.other();
        let round_advanced = state.current_turn == ParticipantId::FIRST;
        if round_advanced {
            state.round += 1;
        }

        let outcome = SubmitOutcome {
            round,
            next_turn: state.current_turn,
            round_advanced,
            complete: state.is_complete(),
        };
        self.publish(&state);
        drop(state);

        if outcome.complete {
            info!(rounds = round, "draft complete");
        } else if outcome.round_advanced {
            info!(round = round + 1, "round advanced");
        }
        Ok(outcome)
    }

    /// Resolve once both participants have joined.
    pub async fn wait_until_ready(&self) {
        let mut rx = self.signal.subscribe();
        if rx.wait_for(TurnSignal::ready).await.is_err() {
            debug!("turn signal closed while waiting for participants");
        }
    }

    /// Resolve once `id` is on the clock in a running draft, or the draft
    /// has completed.
    pub async fn wait_for_turn(&self, id: ParticipantId) -> TurnStatus {
        let mut rx = self.signal.subscribe();
        let signal = match rx
            .wait_for(|s| s.complete || (s.ready() && s.current_turn == id))
            .await
        {
            Ok(signal) => *signal,
            // The sender lives inside `self`, so this only happens on teardown.
            Err(_) => return TurnStatus::Complete,
        };

        if signal.complete {
            TurnStatus::Complete
        } else {
            TurnStatus::OnTheClock {
                round: signal.round,
            }
        }
    }
}
