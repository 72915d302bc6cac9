//! HTTP surface of the delivery relay.
//!
//! This crate turns inbound HTTP submissions into chat notifications:
//! - `GET /` - liveness check
//! - `POST /test` - delivery request rendered as MarkdownV2 to a fixed chat
//! - `POST /delivery` - delivery request rendered as HTML to the configured chat
//! - `POST /order` - order with line items rendered as HTML to the configured chat
//!
//! Sending is fire-and-forget: handlers acknowledge as soon as the body parses
//! and the message is rendered. The chat transport itself is abstracted behind
//! [`Notifier`] so this crate never talks to a chat API directly.
//!
//! # Example
//!
//! ```ignore
//! use relay_api::{bind, create_router, serve, AppState, Destination, ServerConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::new("0.0.0.0", 8080, Destination::Id(-100123));
//!     let state = AppState::new(config.clone(), Arc::new(/* notifier */));
//!
//!     let listener = bind(&config).await?;
//!     serve(listener, create_router(state), std::future::pending()).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod handlers;
pub mod notify;
pub mod router;
pub mod state;
pub mod types;

pub use config::{Destination, DestinationError, ServerConfig};
pub use error::{error_envelope, FormatError, RelayError, Result, GENERIC_ERROR_MESSAGE};
pub use format::{format, Dialect, Notification, NotificationKind};
pub use notify::{dispatch, DispatchError, Notifier};
pub use router::{bind, create_router, create_router_with_webhook, serve, server_url};
pub use state::AppState;
pub use types::Submission;

#[cfg(test)]
pub(crate) mod test_support;
