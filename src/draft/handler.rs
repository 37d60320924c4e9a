//! Per-connection turn loop.
//!
//! One [`run_participant`] call drives one participant from welcome to
//! completion. It never touches session fields directly: every read and
//! write goes through the [`SessionCoordinator`](super::coordinator::SessionCoordinator),
//! and the lock is never held while this loop is sending or reading.
//!
//! If the connection fails, the loop stops and the error is returned to the
//! caller. The session keeps whatever was already recorded; the other
//! participant waits for a turn that will not come unless a turn timeout is
//! configured.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::coordinator::TurnStatus;
use super::{messages, PlayerChannel};
use crate::models::ParticipantId;
use crate::state::AppState;
use crate::{AppError, Result};

/// How a handler that did not fail came to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerExit {
    /// The draft finished and the completion notice was delivered.
    Completed,
    /// The server is shutting down.
    Shutdown,
}

/// What came back after prompting the participant on the clock.
enum Reply {
    Text(String),
    TimedOut,
}

/// Drive one participant through the draft.
///
/// # Errors
///
/// Returns `AppError::Transport` when the connection fails or the
/// participant disconnects, and `AppError::Turn` if the coordinator
/// refuses a pick.
pub async fn run_participant<C>(
    state: &AppState,
    id: ParticipantId,
    channel: &mut C,
) -> Result<HandlerExit>
where
    C: PlayerChannel + ?Sized,
{
    channel.send_text(messages::WELCOME.into()).await?;

    if wait_while_idle(state, channel, state.coordinator.wait_until_ready())
        .await?
        .is_none()
    {
        return Ok(shutdown(channel).await);
    }
    debug!(participant = %id, "both participants present");
    channel.send_text(messages::BEGIN.into()).await?;

    loop {
        let Some(status) =
            wait_while_idle(state, channel, state.coordinator.wait_for_turn(id)).await?
        else {
            return Ok(shutdown(channel).await);
        };

        let round = match status {
            TurnStatus::OnTheClock { round } => round,
            TurnStatus::Complete => {
                info!(participant = %id, "rounds have ended");
                channel.send_text(messages::DRAFT_COMPLETE.into()).await?;
                return Ok(HandlerExit::Completed);
            }
        };

        let option = state.options.draw();
        info!(participant = %id, round, %option, "turn offered");
        channel.send_text(messages::turn_prompt(round, &option)).await?;

        match read_reply(state, channel).await? {
            Some(Reply::Text(text)) => {
                let pick = text.trim().to_owned();
                info!(participant = %id, round, %pick, "participant picked");
                state.coordinator.submit_choice(id, pick)?;
            }
            Some(Reply::TimedOut) => {
                warn!(
                    participant = %id,
                    round,
                    %option,
                    "turn timed out, drafting offered option"
                );
                state.coordinator.submit_choice(id, option.as_str())?;
                channel.send_text(messages::auto_pick(&option)).await?;
            }
            None => return Ok(shutdown(channel).await),
        }
    }
}

/// Await `wait` while draining anything the participant sends in the
/// meantime. Returns `None` if the server shuts down first.
async fn wait_while_idle<C, F>(
    state: &AppState,
    channel: &mut C,
    wait: F,
) -> Result<Option<F::Output>>
where
    C: PlayerChannel + ?Sized,
    F: Future,
{
    tokio::pin!(wait);

    loop {
        tokio::select! {
            biased;
            () = state.shutdown.cancelled() => return Ok(None),
            output = &mut wait => return Ok(Some(output)),
            incoming = channel.recv_text() => match incoming? {
                Some(text) => {
                    debug!(ignored = %text.trim(), "message received out of turn");
                    channel.send_text(messages::WAIT_FOR_TURN.into()).await?;
                }
                None => return Err(disconnected()),
            },
        }
    }
}

/// Read the on-the-clock participant's answer, honouring the turn timeout
/// and server shutdown. Returns `None` on shutdown.
async fn read_reply<C>(state: &AppState, channel: &mut C) -> Result<Option<Reply>>
where
    C: PlayerChannel + ?Sized,
{
    let limit = state.config.turn_timeout();
    tokio::select! {
        biased;
        () = state.shutdown.cancelled() => Ok(None),
        reply = recv_within(channel, limit) => reply.map(Some),
    }
}

async fn recv_within<C>(channel: &mut C, limit: Option<Duration>) -> Result<Reply>
where
    C: PlayerChannel + ?Sized,
{
    let received = match limit {
        Some(limit) => match tokio::time::timeout(limit, channel.recv_text()).await {
            Ok(received) => received?,
            Err(_) => return Ok(Reply::TimedOut),
        },
        None => channel.recv_text().await?,
    };
    received.map(Reply::Text).ok_or_else(disconnected)
}

async fn shutdown<C>(channel: &mut C) -> HandlerExit
where
    C: PlayerChannel + ?Sized,
{
    if let Err(err) = channel.send_text(messages::SHUTTING_DOWN.into()).await {
        debug!(%err, "could not deliver shutdown notice");
    }
    HandlerExit::Shutdown
}

fn disconnected() -> AppError {
    AppError::Transport("connection closed by participant".into())
}
