//! Relay process: bot, HTTP server and update delivery.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use relay_api::{AppState, Notifier, ServerConfig};
use teloxide::dispatching::ShutdownToken;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks;
use teloxide::utils::command::BotCommands;
use tokio::signal;
use tokio::time::{sleep, Instant};
use tracing::{debug, error, info, warn};

use crate::commands::{self, Command};
use crate::config::UpdateDelivery;
use crate::error::{Result, TelegramError};
use crate::outbound::TelegramNotifier;

/// How long to wait for Telegram to forget the webhook on shutdown.
const WEBHOOK_TEARDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// How long to keep asking a dispatcher that has not started yet to stop.
const DISPATCHER_STOP_TIMEOUT: Duration = Duration::from_secs(5);
const DISPATCHER_STOP_RETRY: Duration = Duration::from_millis(100);

/// The relay bot.
pub struct RelayBot {
    /// The teloxide bot instance.
    bot: Bot,
    /// How updates reach the bot.
    delivery: UpdateDelivery,
}

impl RelayBot {
    /// Create a new RelayBot for `token`.
    pub fn new(token: impl Into<String>, delivery: UpdateDelivery) -> Self {
        Self {
            bot: Bot::new(token),
            delivery,
        }
    }

    /// Outbound channel for relay notifications.
    pub fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::new(TelegramNotifier::new(self.bot.clone()))
    }

    /// Get the bot's username.
    pub async fn get_me(&self) -> Result<String> {
        let me = self
            .bot
            .get_me()
            .await
            .map_err(|e| TelegramError::BotStartFailed(e.to_string()))?;
        Ok(me.username().to_string())
    }

    /// Run until Ctrl+C or SIGTERM.
    pub async fn run(self, config: ServerConfig) -> Result<()> {
        self.run_until(config, shutdown_signal()).await
    }

    /// Run the HTTP server and the update dispatcher until `shutdown` resolves.
    ///
    /// The server stops accepting connections first, then the dispatcher is
    /// asked to stop. The dispatcher is also stopped when the server fails,
    /// and the server's error is returned. Notifications already handed off
    /// are not waited for.
    pub async fn run_until<F>(self, config: ServerConfig, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.register_commands().await;

        let state = AppState::new(config.clone(), self.notifier());
        let listener = relay_api::bind(&config).await?;
        let address = listener.local_addr()?;

        let mut dispatcher = Dispatcher::builder(self.bot.clone(), commands::schema())
            .default_handler(|upd| async move {
                debug!(update = ?upd.id, "Unhandled update");
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .build();
        let token = dispatcher.shutdown_token();

        match self.delivery {
            UpdateDelivery::Polling => {
                info!("Receiving updates by long polling");
                let router = relay_api::create_router(state);
                let (served, ()) = tokio::join!(
                    serve_then_stop(relay_api::serve(listener, router, shutdown), token),
                    dispatcher.dispatch(),
                );
                served?;
            }
            UpdateDelivery::Webhook { url, secret } => {
                info!(url = %url, "Registering webhook");
                let options = webhooks::Options::new(address, url).secret_token(secret);
                let (update_listener, stop_flag, webhook) =
                    webhooks::axum_to_router(self.bot.clone(), options)
                        .await
                        .map_err(|e| TelegramError::WebhookFailed(e.to_string()))?;

                let router = relay_api::create_router_with_webhook(state, webhook);
                let (served, ()) = tokio::join!(
                    serve_then_stop(relay_api::serve(listener, router, shutdown), token),
                    dispatcher.dispatch_with_listener(
                        update_listener,
                        LoggingErrorHandler::with_custom_text("An error from the update listener"),
                    ),
                );

                if tokio::time::timeout(WEBHOOK_TEARDOWN_TIMEOUT, stop_flag)
                    .await
                    .is_err()
                {
                    warn!("Timed out removing the webhook");
                }
                served?;
            }
        }

        info!("Relay stopped");
        Ok(())
    }

    /// Publish the command list so clients can autocomplete it.
    async fn register_commands(&self) {
        if let Err(e) = self.bot.set_my_commands(Command::bot_commands()).await {
            warn!(error = %e, "Failed to register bot commands");
        }
    }
}

/// Drives `server` to completion, then stops the dispatcher behind `token`,
/// whether the server returned on shutdown or failed.
async fn serve_then_stop<S>(server: S, token: ShutdownToken) -> std::io::Result<()>
where
    S: Future<Output = std::io::Result<()>>,
{
    let served = server.await;
    if let Err(e) = &served {
        error!(error = %e, "HTTP server failed");
    }
    stop_dispatcher(&token).await;
    served
}

async fn stop_dispatcher(token: &ShutdownToken) {
    info!("Stopping update dispatcher");
    // A dispatcher that is still fetching the bot's identity reports idle.
    let deadline = Instant::now() + DISPATCHER_STOP_TIMEOUT;
    loop {
        match token.shutdown() {
            Ok(stopped) => return stopped.await,
            Err(_) if Instant::now() < deadline => sleep(DISPATCHER_STOP_RETRY).await,
            Err(_) => {
                warn!("Update dispatcher was not running");
                return;
            }
        }
    }
}

/// Waits for Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        }
    }
}
