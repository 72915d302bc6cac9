//! Delivery relay binary.
//!
//! Start the relay with:
//! ```bash
//! BOT_TOKEN=xxx BOT_CHAT=-100123 cargo run -p relay-telegram
//! ```

use clap::Parser;
use relay_api::{Destination, ServerConfig};
use relay_telegram::{log_filter, BotMode, RelayBot, UpdateDelivery};
use tracing_subscriber::EnvFilter;

/// Relay delivery and order submissions from HTTP to a Telegram chat
#[derive(Parser, Debug)]
#[command(name = "relay-telegram")]
#[command(about = "Relay delivery and order submissions from HTTP to a Telegram chat")]
struct Args {
    /// Bot token from @BotFather
    #[arg(long, env = "BOT_TOKEN", hide_env_values = true)]
    bot_token: String,

    /// How the bot receives updates
    #[arg(long, env = "BOT_MODE", value_enum, default_value_t = BotMode::Polling)]
    bot_mode: BotMode,

    /// Public webhook URL, ending in /webhook (webhook mode)
    #[arg(long, env = "BOT_WEBHOOK")]
    bot_webhook: Option<String>,

    /// Secret token Telegram sends with webhook updates (webhook mode)
    #[arg(long, env = "BOT_WEBHOOK_SECRET", hide_env_values = true)]
    bot_webhook_secret: Option<String>,

    /// Chat id or @channel that receives deliveries and orders
    #[arg(long, env = "BOT_CHAT", allow_hyphen_values = true)]
    bot_chat: Destination,

    /// HTTP bind host
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    server_host: String,

    /// HTTP bind port
    #[arg(long, env = "SERVER_PORT", default_value = "80")]
    server_port: u16,

    /// Allowed CORS origins, comma separated ("*" allows any)
    #[arg(
        long = "cors-origin",
        env = "CORS_ORIGIN",
        value_delimiter = ',',
        default_value = "*"
    )]
    cors_origins: Vec<String>,

    /// Log every HTTP request
    #[arg(long, env = "DEBUG")]
    debug: bool,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Local overrides first; dotenvy never replaces variables already set
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_filter(args.verbose, args.debug)))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let delivery = UpdateDelivery::from_parts(
        args.bot_mode,
        args.bot_webhook.as_deref(),
        args.bot_webhook_secret.as_deref(),
    )?;

    let config = ServerConfig::new(args.server_host, args.server_port, args.bot_chat)
        .with_debug(args.debug)
        .with_cors_origins(args.cors_origins);

    let bot = RelayBot::new(args.bot_token, delivery);

    match bot.get_me().await {
        Ok(username) => {
            tracing::info!(
                username = %username,
                mode = ?args.bot_mode,
                destination = %config.bot_chat,
                "Bot initialized successfully"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to get bot info");
            return Err(e.into());
        }
    }

    bot.run(config).await?;

    Ok(())
}
