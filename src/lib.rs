#![forbid(unsafe_code)]

//! Two-participant draft server.
//!
//! Participants connect over WebSockets, take alternating turns picking
//! from randomized options, and the session runs a fixed number of
//! rounds before completing.

pub mod catalog;
pub mod config;
pub mod draft;
pub mod errors;
pub mod models;
pub mod state;
pub mod ws;

pub use config::GlobalConfig;
pub use errors::{AppError, Result};
