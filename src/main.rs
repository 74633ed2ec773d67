//! boxrelay - TeraBox to Telegram relay bot
//!
//! Accepts a TeraBox share link (or raw video ID), resolves it through an
//! upstream API into a direct download URL, and streams the video back into
//! the chat.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `database` - MongoDB integration (user store)
//! - `membership` - Required-channel membership gate
//! - `resolver` - Upstream link-resolution client
//! - `relay` - Streaming video relay
//! - `bot` - Core bot functionality (with Throttle for API rate limiting)
//! - `handlers` - Message handlers
//! - `utils` - Utility functions

mod bot;
mod config;
mod database;
mod handlers;
mod membership;
mod relay;
mod resolver;
mod utils;

use std::sync::Arc;

use teloxide::adaptors::throttle::Limits;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use database::Database;
use resolver::ResolverClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // Initialize logging with sensible defaults
    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("boxrelay=info,teloxide=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    info!("Starting boxrelay bot...");

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded successfully");
    info!("Resolver schema: {:?}", config.resolver_schema);
    info!("Required channel: {}", config.required_channel);

    // Connect to MongoDB before accepting any updates; a bot that cannot
    // record users should not come up at all
    info!("Connecting to MongoDB...");
    let db = Database::connect(&config.mongodb_uri, &config.mongodb_database).await?;
    let db = Arc::new(db);
    info!("Database connected");

    // Shared HTTP client: keep-alive pool for the resolver and the relay,
    // capped at 10 idle sockets per host
    let http = reqwest::Client::builder()
        .pool_max_idle_per_host(10)
        .build()?;

    let resolver = Arc::new(ResolverClient::new(
        http.clone(),
        config.resolver_base_url.clone(),
        config.resolver_schema,
    ));

    // Initialize bot with Throttle for automatic rate limiting
    let bot = Bot::new(&config.bot_token).throttle(Limits::default());
    info!("Bot initialized with rate limiting (Throttle)");

    // Get bot info
    let me = bot.get_me().await?;
    info!("Bot username: @{}", me.username());

    // Build dispatcher
    let dispatcher = bot::build_dispatcher(bot, db, http, resolver, &config);

    // Run the bot
    bot::run(dispatcher).await;

    Ok(())
}
