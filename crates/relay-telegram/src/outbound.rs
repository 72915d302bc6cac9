//! Sending relay notifications through the Bot API.

use futures::future::BoxFuture;
use futures::FutureExt;
use relay_api::{Destination, Dialect, DispatchError, Notification, Notifier};
use teloxide::prelude::*;
use teloxide::types::{ChatId, ParseMode, Recipient};

/// [`Notifier`] backed by a teloxide [`Bot`].
///
/// `Bot` is a cheap handle around a shared HTTP client, so each send clones it
/// and runs independently.
#[derive(Clone)]
pub struct TelegramNotifier {
    bot: Bot,
}

impl TelegramNotifier {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

impl Notifier for TelegramNotifier {
    fn send(
        &self,
        destination: &Destination,
        notification: &Notification,
    ) -> BoxFuture<'static, Result<(), DispatchError>> {
        let request = self
            .bot
            .send_message(recipient(destination), notification.text.clone())
            .parse_mode(parse_mode(notification.dialect));
        let destination = destination.clone();

        async move {
            request
                .await
                .map(|_| ())
                .map_err(|e| DispatchError::SendFailed {
                    destination,
                    reason: e.to_string(),
                })
        }
        .boxed()
    }
}

pub fn recipient(destination: &Destination) -> Recipient {
    match destination {
        Destination::Id(id) => Recipient::Id(ChatId(*id)),
        Destination::Username(name) => Recipient::ChannelUsername(name.clone()),
    }
}

pub fn parse_mode(dialect: Dialect) -> ParseMode {
    match dialect {
        Dialect::MarkdownV2 => ParseMode::MarkdownV2,
        Dialect::Html => ParseMode::Html,
    }
}
