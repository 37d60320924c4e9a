//! WebSocket transport for participant connections.
//!
//! Mounts the upgrade route, a liveness probe, and a session status
//! endpoint behind an axum router.

pub mod channel;
pub mod server;
