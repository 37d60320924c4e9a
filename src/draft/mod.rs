//! Draft coordination: shared session state and the per-connection turn loop.
//!
//! The [`PlayerChannel`] trait decouples the turn loop from the transport
//! that carries participant messages, so the loop can be driven by a
//! WebSocket in production and by in-memory channels in tests.

pub mod coordinator;
pub mod handler;
pub mod messages;

use std::future::Future;
use std::pin::Pin;

use crate::Result;

/// Bidirectional text connection to one participant.
///
/// Owned exclusively by that participant's handler task.
pub trait PlayerChannel: Send {
    /// Send one text message.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Transport`](crate::AppError::Transport) if the write fails.
    fn send_text(&mut self, text: String) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;

    /// Receive the next text message, or `None` once the participant has
    /// closed the connection.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Transport`](crate::AppError::Transport) if the read fails.
    fn recv_text(
        &mut self,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>>> + Send + '_>>;

    /// Close the connection. Called once when the handler exits.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Transport`](crate::AppError::Transport) if the close
    /// frame cannot be written.
    fn close(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}
