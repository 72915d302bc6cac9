//! Update delivery configuration.

use url::Url;

use crate::error::{Result, TelegramError};

/// Path Telegram posts updates to in webhook mode.
pub const WEBHOOK_PATH: &str = "/webhook";

/// How the bot receives updates from Telegram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum BotMode {
    /// Long polling; no public endpoint needed.
    #[default]
    Polling,
    /// Telegram pushes updates to `POST /webhook` on the relay's listener.
    Webhook,
}

/// Validated update delivery settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateDelivery {
    Polling,
    Webhook { url: Url, secret: String },
}

impl UpdateDelivery {
    /// Validates the raw settings for `mode`.
    ///
    /// Webhook settings are ignored in polling mode.
    pub fn from_parts(
        mode: BotMode,
        webhook: Option<&str>,
        secret: Option<&str>,
    ) -> Result<Self> {
        match mode {
            BotMode::Polling => Ok(UpdateDelivery::Polling),
            BotMode::Webhook => {
                let url = webhook
                    .filter(|u| !u.trim().is_empty())
                    .ok_or(TelegramError::MissingWebhookUrl)?;
                let url = Url::parse(url.trim())?;
                if url.path() != WEBHOOK_PATH {
                    return Err(TelegramError::InvalidWebhookUrl(format!(
                        "path must be {}, got {}",
                        WEBHOOK_PATH,
                        url.path()
                    )));
                }

                let secret = secret
                    .filter(|s| !s.is_empty())
                    .ok_or(TelegramError::MissingWebhookSecret)?;
                if !is_valid_secret(secret) {
                    return Err(TelegramError::InvalidWebhookSecret);
                }

                Ok(UpdateDelivery::Webhook {
                    url,
                    secret: secret.to_string(),
                })
            }
        }
    }

    pub fn mode(&self) -> BotMode {
        match self {
            UpdateDelivery::Polling => BotMode::Polling,
            UpdateDelivery::Webhook { .. } => BotMode::Webhook,
        }
    }
}

fn is_valid_secret(secret: &str) -> bool {
    (1..=256).contains(&secret.len())
        && secret
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Default log filter for the given verbosity.
///
/// `debug` implies at least one level of verbosity so that request logs show up.
pub fn log_filter(verbose: u8, debug: bool) -> &'static str {
    match verbose.max(u8::from(debug)) {
        0 => "relay_api=info,relay_telegram=info,teloxide=warn",
        1 => "relay_api=debug,relay_telegram=debug,tower_http=debug,teloxide=info",
        2 => "relay_api=trace,relay_telegram=trace,tower_http=trace,teloxide=debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polling_ignores_webhook_settings() {
        let delivery = UpdateDelivery::from_parts(BotMode::Polling, Some("not a url"), None).unwrap();
        assert_eq!(delivery, UpdateDelivery::Polling);
        assert_eq!(delivery.mode(), BotMode::Polling);
    }

    #[test]
    fn test_webhook_requires_url_and_secret() {
        assert!(matches!(
            UpdateDelivery::from_parts(BotMode::Webhook, None, Some("s3cret")),
            Err(TelegramError::MissingWebhookUrl)
        ));
        assert!(matches!(
            UpdateDelivery::from_parts(BotMode::Webhook, Some("https://relay.example.com/webhook"), None),
            Err(TelegramError::MissingWebhookSecret)
        ));
    }

    #[test]
    fn test_webhook_url_must_target_webhook_path() {
        assert!(matches!(
            UpdateDelivery::from_parts(BotMode::Webhook, Some("https://relay.example.com/hook"), Some("s")),
            Err(TelegramError::InvalidWebhookUrl(_))
        ));
        assert!(matches!(
            UpdateDelivery::from_parts(BotMode::Webhook, Some("relay.example.com"), Some("s")),
            Err(TelegramError::InvalidWebhookUrl(_))
        ));
    }

    #[test]
    fn test_webhook_secret_charset() {
        assert!(is_valid_secret("abc_DEF-123"));
        assert!(!is_valid_secret("with space"));
        assert!(!is_valid_secret("ключ"));
        assert!(!is_valid_secret(&"a".repeat(257)));
    }

    #[test]
    fn test_webhook_delivery() {
        let delivery = UpdateDelivery::from_parts(
            BotMode::Webhook,
            Some("https://relay.example.com/webhook"),
            Some("s3cret"),
        )
        .unwrap();

        match delivery {
            UpdateDelivery::Webhook { url, secret } => {
                assert_eq!(url.as_str(), "https://relay.example.com/webhook");
                assert_eq!(secret, "s3cret");
            }
            other => panic!("expected webhook delivery, got {:?}", other),
        }
    }

    #[test]
    fn test_log_filter() {
        assert_eq!(log_filter(0, false), "relay_api=info,relay_telegram=info,teloxide=warn");
        assert_eq!(log_filter(0, true), log_filter(1, false));
        assert_eq!(log_filter(2, true), log_filter(2, false));
        assert_eq!(log_filter(9, false), "trace");
    }
}
