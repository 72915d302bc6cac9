//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::notify::Notifier;

/// Application state shared across all handlers.
///
/// Both fields are read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Outbound chat channel.
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// Creates a new AppState.
    pub fn new(config: ServerConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            config: Arc::new(config),
            notifier,
        }
    }
}
