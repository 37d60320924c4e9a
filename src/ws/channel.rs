//! [`PlayerChannel`] backed by an upgraded axum WebSocket.

use std::future::Future;
use std::pin::Pin;

use axum::extract::ws::{Message, WebSocket};

use crate::draft::PlayerChannel;
use crate::{AppError, Result};

/// One participant's WebSocket, owned by its handler task.
pub struct WsChannel {
    socket: WebSocket,
}

impl WsChannel {
    /// Wrap an upgraded socket.
    #[must_use]
    pub fn new(socket: WebSocket) -> Self {
        Self { socket }
    }
}

impl PlayerChannel for WsChannel {
    fn send_text(&mut self, text: String) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            self.socket
                .send(Message::Text(text.into()))
                .await
                .map_err(|err| AppError::Transport(format!("send failed: {err}")))
        })
    }

    fn recv_text(
        &mut self,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>>> + Send + '_>> {
        Box::pin(async move {
            loop {
                match self.socket.recv().await {
                    None | Some(Ok(Message::Close(_))) => return Ok(None),
                    Some(Ok(Message::Text(text))) => return Ok(Some(text.as_str().to_owned())),
                    Some(Ok(Message::Binary(bytes))) => {
                        return Ok(Some(String::from_utf8_lossy(&bytes).into_owned()));
                    }
                    // Pongs are queued by the protocol layer on the next write.
                    Some(Ok(Message::Ping(_) | Message::Pong(_))) => {}
                    Some(Err(err)) => {
                        return Err(AppError::Transport(format!("receive failed: {err}")));
                    }
                }
            }
        })
    }

    fn close(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            self.socket
                .send(Message::Close(None))
                .await
                .map_err(|err| AppError::Transport(format!("close failed: {err}")))
        })
    }
}
