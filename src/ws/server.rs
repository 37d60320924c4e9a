//! HTTP/WebSocket server for draft participants.
//!
//! Routes:
//!
//! - `GET {ws_path}` upgrades to a WebSocket and seats the caller, or
//!   answers `503 Service Unavailable` once both seats are taken.
//! - `GET /health` returns `ok`.
//! - `GET /status` returns the current [`SessionSnapshot`] as JSON.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::ws::{WebSocket, WebSocketUpgrade};
use axum::extract::{ConnectInfo, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tracing::{debug, info, info_span, warn, Instrument};

use super::channel::WsChannel;
use crate::draft::handler::run_participant;
use crate::draft::PlayerChannel;
use crate::models::{ParticipantId, SessionSnapshot};
use crate::state::AppState;
use crate::{AppError, Result};

/// Handler for `GET /health`.
async fn health() -> &'static str {
    "ok"
}

/// Handler for `GET /status`.
async fn status(State(state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
    Json(state.coordinator.snapshot())
}

fn draft_full() -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, "draft is full").into_response()
}

/// Handler for the WebSocket upgrade route.
///
/// Capacity is checked before the upgrade request is inspected so a full
/// session always answers 503. The seat itself is claimed atomically by
/// `try_join`, which also covers two callers racing for the last seat.
async fn join(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    upgrade: std::result::Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    if state.coordinator.is_full() {
        warn!(%peer, "draft is full, rejecting connection");
        return draft_full();
    }

    let upgrade = match upgrade {
        Ok(upgrade) => upgrade,
        Err(rejection) => {
            warn!(%peer, %rejection, "invalid websocket upgrade request");
            return rejection.into_response();
        }
    };

    let id = match state.coordinator.try_join(Some(peer)) {
        Ok(id) => id,
        Err(err) => {
            warn!(%peer, %err, "join rejected");
            return draft_full();
        }
    };

    upgrade
        .on_failed_upgrade(move |err| {
            warn!(participant = %id, %err, "websocket upgrade failed after seat was claimed");
        })
        .on_upgrade(move |socket| participant_task(state, id, socket))
}

/// Run one participant's handler on its upgraded socket and close the
/// socket however the handler ends.
async fn participant_task(state: Arc<AppState>, id: ParticipantId, socket: WebSocket) {
    let span = info_span!("participant", id = %id);
    async move {
        let mut channel = WsChannel::new(socket);
        match run_participant(&state, id, &mut channel).await {
            Ok(exit) => info!(?exit, "participant handler finished"),
            Err(err) => warn!(%err, "participant handler stopped"),
        }
        if let Err(err) = channel.close().await {
            debug!(%err, "connection already closed");
        }
    }
    .instrument(span)
    .await;
}

/// Build the router for the draft server.
#[must_use]
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(&state.config.ws_path, get(join))
        .route("/health", get(health))
        .route("/status", get(status))
        .with_state(state)
}

/// Bind `config.host:config.http_port` and serve until `state.shutdown`
/// is cancelled.
///
/// # Errors
///
/// Returns `AppError::Config` if the address cannot be bound, or
/// `AppError::Io` if the server fails while running.
pub async fn serve(state: Arc<AppState>) -> Result<()> {
    let bind = state.config.bind_addr();
    let listener = TcpListener::bind(&bind)
        .await
        .map_err(|err| AppError::Config(format!("failed to bind {bind}: {err}")))?;
    serve_with_listener(listener, state).await
}

/// Serve on an already-bound listener until `state.shutdown` is cancelled.
///
/// # Errors
///
/// Returns `AppError::Io` if the listener address cannot be read or the
/// server fails while running.
pub async fn serve_with_listener(listener: TcpListener, state: Arc<AppState>) -> Result<()> {
    let local = listener.local_addr()?;
    info!(%local, ws_path = %state.config.ws_path, "starting draft server");

    let ct = state.shutdown.clone();
    let app = router(state).into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { ct.cancelled().await })
        .await
        .map_err(|err| AppError::Io(format!("draft server error: {err}")))?;

    info!("draft server shut down");
    Ok(())
}
