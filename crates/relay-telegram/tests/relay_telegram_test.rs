//! Integration tests for the Telegram side of the relay.

use relay_telegram::{reply_for, BotMode, Command, Conversation, TelegramError, UpdateDelivery};
use teloxide::types::ChatId;

#[test]
fn test_id_command_private_chat() {
    let conversation = Conversation {
        id: ChatId(12345),
        private: true,
    };
    let reply = reply_for(&Command::Id, &conversation).expect("private chats get a reply");
    assert!(reply.contains("12345"));
}

#[test]
fn test_id_command_group_chat() {
    let conversation = Conversation {
        id: ChatId(12345),
        private: false,
    };
    assert!(reply_for(&Command::Id, &conversation).is_none());
}

#[test]
fn test_webhook_mode_needs_configuration() {
    let err = UpdateDelivery::from_parts(BotMode::Webhook, None, None).unwrap_err();
    assert!(matches!(err, TelegramError::MissingWebhookUrl));
    assert_eq!(err.to_string(), "BOT_WEBHOOK must be set in webhook mode");

    let delivery = UpdateDelivery::from_parts(
        BotMode::Webhook,
        Some("https://relay.example.com/webhook"),
        Some("secret_token-1"),
    )
    .unwrap();
    assert_eq!(delivery.mode(), BotMode::Webhook);
}

#[test]
fn test_polling_is_default_mode() {
    assert_eq!(BotMode::default(), BotMode::Polling);
    assert_eq!(
        UpdateDelivery::from_parts(BotMode::default(), None, None).unwrap(),
        UpdateDelivery::Polling
    );
}
