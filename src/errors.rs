//! Error types shared across the application.

use std::fmt::{Display, Formatter};

/// Shared application result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error enumeration covering all domain failure modes.
#[derive(Debug)]
pub enum AppError {
    /// Configuration parsing or validation failure.
    Config(String),
    /// Option catalog missing, unreadable, or empty. Fatal at startup.
    Startup(String),
    /// Session already holds both participants.
    Capacity(String),
    /// Send or receive failure on a participant connection.
    Transport(String),
    /// Choice submitted out of turn or after the draft completed.
    Turn(String),
    /// File-system or I/O operation failure.
    Io(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Startup(msg) => write!(f, "startup: {msg}"),
            Self::Capacity(msg) => write!(f, "capacity: {msg}"),
            Self::Transport(msg) => write!(f, "transport: {msg}"),
            Self::Turn(msg) => write!(f, "turn: {msg}"),
            Self::Io(msg) => write!(f, "io: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
