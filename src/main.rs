//! Warden - Telegram group moderation bot
//!
//! Inspects messages and membership events in group chats, applies content
//! and behavior rules, and takes moderation actions with an audit log.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `gates` - Pure decision components (flood, content, join)
//! - `permissions` - Command authorization and cached admin lookups
//! - `audit` - Best-effort log chat sink
//! - `bot` - Dispatcher and supervised runtime (with Throttle for API rate limiting)
//! - `plugins` - Command handlers
//! - `events` - Message and membership event handlers
//! - `utils` - Utility functions

mod audit;
mod bot;
mod config;
mod error;
mod events;
mod gates;
mod permissions;
mod plugins;
mod utils;

use std::sync::Arc;

use teloxide::adaptors::throttle::Limits;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bot::dispatcher::AppState;
use config::Config;
use gates::FloodGate;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warden=info,teloxide=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Warden bot...");

    let config = Arc::new(Config::from_env());
    info!("Configuration loaded successfully");

    if config.admin_ids.is_empty() {
        info!("No admin IDs configured (ADMIN_IDS is empty)");
    } else {
        info!("Bot admins: {:?}", config.admin_ids);
    }
    info!(
        "Flood limit: {} messages per {}s",
        config.max_messages, config.flood_seconds
    );

    // Throttle respects Telegram's rate limits on outgoing API calls
    let bot = Bot::new(&config.bot_token).throttle(Limits::default());

    let me = bot.get_me().await?;
    info!("Bot username: @{}", me.username());

    let state = AppState::new(bot.clone(), config.clone());
    let flood = FloodGate::from_config(&config);

    bot::run(bot, state, flood).await;

    Ok(())
}
