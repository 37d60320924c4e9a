//! Global configuration parsing and validation.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::{AppError, Result};

/// Configurable timeout values (seconds) for blocking turn interactions.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct TimeoutConfig {
    /// Per-turn reply timeout; 0 means the participant on the clock may
    /// take as long as they like.
    #[serde(default)]
    pub turn_seconds: u64,
}

fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_http_port() -> u16 {
    8080
}

fn default_ws_path() -> String {
    "/ws".into()
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("nfl_teams.txt")
}

fn default_rounds() -> u32 {
    6
}

/// Global configuration parsed from an optional `config.toml`.
///
/// Every field carries a default so the server can start without a file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GlobalConfig {
    /// Interface the HTTP listener binds to.
    #[serde(default = "default_host")]
    pub host: String,
    /// HTTP port for the WebSocket transport; 0 picks an ephemeral port.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Route that accepts WebSocket upgrades.
    #[serde(default = "default_ws_path")]
    pub ws_path: String,
    /// Newline-delimited option catalog loaded at startup.
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,
    /// Rounds per draft. Each participant picks once per round.
    #[serde(default = "default_rounds")]
    pub rounds: u32,
    /// Timeout configuration for blocking flows.
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
            ws_path: default_ws_path(),
            catalog_path: default_catalog_path(),
            rounds: default_rounds(),
            timeouts: TimeoutConfig::default(),
        }
    }
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// `host:port` string suitable for `TcpListener::bind`.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// Per-turn reply timeout, or `None` when disabled.
    #[must_use]
    pub fn turn_timeout(&self) -> Option<Duration> {
        match self.timeouts.turn_seconds {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Check invariants that serde defaults cannot express.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` describing the first violated rule.
    pub fn validate(&self) -> Result<()> {
        if self.rounds == 0 {
            return Err(AppError::Config("rounds must be greater than zero".into()));
        }

        if !self.ws_path.starts_with('/') {
            return Err(AppError::Config(format!(
                "ws_path must start with '/': {}",
                self.ws_path
            )));
        }

        if self.ws_path == "/health" || self.ws_path == "/status" {
            return Err(AppError::Config(format!(
                "ws_path collides with a built-in route: {}",
                self.ws_path
            )));
        }

        if self.catalog_path.as_os_str().is_empty() {
            return Err(AppError::Config("catalog_path must not be empty".into()));
        }

        Ok(())
    }
}
