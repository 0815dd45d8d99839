//! Trackpin - Last.fm status bot for Telegram
//!
//! Polls a Last.fm account's recent listening activity and top artists,
//! formats an HTML status message, and keeps a fixed pinned message up to
//! date by editing it on an interval.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `strings` - Message label catalog
//! - `lastfm` - Last.fm API client
//! - `message` - Pure text builders
//! - `bot` - Core bot functionality (with Throttle for API rate limiting)
//! - `plugins` - Command handlers (extensible)

mod bot;
mod config;
mod lastfm;
mod message;
mod plugins;
mod strings;

use std::sync::Arc;

use anyhow::Context;
use teloxide::adaptors::throttle::Limits;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bot::dispatcher::AppState;
use config::Config;
use lastfm::LastFmClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // Initialize logging with sensible defaults
    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("trackpin=info,teloxide=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting trackpin bot...");

    // Load configuration; the bot must not run with a partial one.
    let config = Arc::new(Config::from_env().context("configuration is incomplete")?);
    info!("Configuration loaded successfully");
    info!(
        "Tracking Last.fm user {} every {} minutes",
        config.user, config.update_interval
    );

    // Load the label catalog once; shared read-only after this point.
    strings::init().context("string catalog failed to load")?;
    info!("String catalog loaded");

    // Last.fm client with request timeout and configured user agent
    let lastfm = Arc::new(LastFmClient::new(
        config.api_key.clone(),
        &config.user_agent,
        None,
    )?);
    info!("Last.fm client initialized");

    // Initialize bot with Throttle for automatic rate limiting
    let bot = Bot::new(&config.bot_token).throttle(Limits::default());
    info!("Bot initialized with rate limiting (Throttle)");

    // Get bot info
    let me = bot.get_me().await?;
    info!("Bot username: @{}", me.username());

    let state = AppState::new(config, lastfm, strings::catalog());

    // Background status updater; first refresh runs immediately
    bot::updater::spawn(bot.clone(), state.clone());

    // Build dispatcher
    let dispatcher = bot::build_dispatcher(bot, state);

    // Run the bot
    bot::run(dispatcher).await;

    Ok(())
}
