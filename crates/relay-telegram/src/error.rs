//! Error types for the Telegram transport.

use thiserror::Error;

/// Errors that can stop the relay from starting or running.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// Webhook mode without a public URL.
    #[error("BOT_WEBHOOK must be set in webhook mode")]
    MissingWebhookUrl,

    /// Webhook mode without a secret token.
    #[error("BOT_WEBHOOK_SECRET must be set in webhook mode")]
    MissingWebhookSecret,

    /// The webhook URL does not parse.
    #[error("Invalid webhook URL: {0}")]
    InvalidWebhookUrl(String),

    /// The webhook secret contains characters Telegram rejects.
    #[error("Webhook secret must be 1-256 characters of A-Z, a-z, 0-9, _ and -")]
    InvalidWebhookSecret,

    /// Webhook registration failed.
    #[error("Failed to register webhook: {0}")]
    WebhookFailed(String),

    /// Failed to start the bot.
    #[error("Failed to start bot: {0}")]
    BotStartFailed(String),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for Telegram operations.
pub type Result<T> = std::result::Result<T, TelegramError>;

impl From<url::ParseError> for TelegramError {
    fn from(e: url::ParseError) -> Self {
        TelegramError::InvalidWebhookUrl(e.to_string())
    }
}
