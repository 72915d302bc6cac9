//! Telegram transport for the delivery relay.
//!
//! This crate connects [`relay_api`] to Telegram:
//! - sends rendered notifications through the Bot API
//! - answers the `/id` command in private chats with the chat id
//! - receives updates by long polling or through a webhook served on the
//!   same HTTP listener as the relay routes
//!
//! # Environment Variables
//!
//! Required:
//! - `BOT_TOKEN`: Bot token from @BotFather
//! - `BOT_CHAT`: Chat id or `@channel` that receives deliveries and orders
//!
//! Optional:
//! - `BOT_MODE`: `polling` (default) or `webhook`
//! - `BOT_WEBHOOK`: Public webhook URL ending in `/webhook` (webhook mode)
//! - `BOT_WEBHOOK_SECRET`: Secret token Telegram sends with every update (webhook mode)
//! - `SERVER_HOST`, `SERVER_PORT`: HTTP bind address (default `0.0.0.0:80`)
//! - `CORS_ORIGIN`: Comma-separated allowed origins (default `*`)
//! - `DEBUG`: Log every HTTP request
//!
//! # Commands
//!
//! - `/id` - Reply with the id of the current private chat

pub mod bot;
pub mod commands;
pub mod config;
pub mod error;
pub mod outbound;

pub use bot::RelayBot;
pub use commands::{reply_for, Command, Conversation};
pub use config::{log_filter, BotMode, UpdateDelivery, WEBHOOK_PATH};
pub use error::{Result, TelegramError};
pub use outbound::TelegramNotifier;
