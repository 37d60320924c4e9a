//! Shared application state handed to every connection handler.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::catalog::OptionProvider;
use crate::config::GlobalConfig;
use crate::draft::coordinator::SessionCoordinator;

/// Process-wide state: configuration, the single draft session, and the
/// option catalog.
pub struct AppState {
    /// Global configuration.
    pub config: Arc<GlobalConfig>,
    /// The one session this process coordinates.
    pub coordinator: Arc<SessionCoordinator>,
    /// Source of options offered on each turn.
    pub options: Arc<dyn OptionProvider>,
    /// Cancelled when the server shuts down.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Build state with a fresh session sized from `config.rounds`.
    #[must_use]
    pub fn new(config: GlobalConfig, options: Arc<dyn OptionProvider>) -> Self {
        let coordinator = Arc::new(SessionCoordinator::new(config.rounds));
        Self {
            config: Arc::new(config),
            coordinator,
            options,
            shutdown: CancellationToken::new(),
        }
    }
}
