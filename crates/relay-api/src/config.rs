//! Server configuration.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A chat that notifications are delivered to.
///
/// Telegram addresses chats either by numeric id or, for public channels,
/// by `@username`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Destination {
    /// Numeric chat id (negative for groups and channels).
    Id(i64),
    /// Public channel username, including the leading `@`.
    Username(String),
}

/// Error returned when a destination string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DestinationError {
    #[error("destination chat must not be empty")]
    Empty,

    #[error("destination chat must be a numeric id or an @username, got {0:?}")]
    Invalid(String),
}

impl FromStr for Destination {
    type Err = DestinationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DestinationError::Empty);
        }
        if let Ok(id) = s.parse::<i64>() {
            return Ok(Destination::Id(id));
        }
        if s.len() > 1 && s.starts_with('@') {
            return Ok(Destination::Username(s.to_string()));
        }
        Err(DestinationError::Invalid(s.to_string()))
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Id(id) => write!(f, "{}", id),
            Destination::Username(name) => f.write_str(name),
        }
    }
}

/// HTTP server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Chat that receives `/delivery` and `/order` notifications.
    pub bot_chat: Destination,
    /// Verbose per-request logging.
    pub debug: bool,
    /// Allowed CORS origins.
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Creates a new configuration with the given host, port and destination chat.
    pub fn new(host: impl Into<String>, port: u16, bot_chat: Destination) -> Self {
        Self {
            host: host.into(),
            port,
            bot_chat,
            debug: false,
            cors_origins: vec!["*".to_string()],
        }
    }

    /// Enables or disables request logging.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Sets the CORS origins.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    /// Returns the bind address.
    pub fn bind_address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}
