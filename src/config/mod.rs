//! Configuration module for the boxrelay bot.
//!
//! Loads configuration from environment variables.

use std::env;

use url::Url;

use crate::resolver::ResolverSchema;

/// Default upstream endpoint (alphaapis v3 download resolver).
const DEFAULT_RESOLVER_URL: &str = "https://alphaapis.org/terabox/v3/dl";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub bot_token: String,

    /// Channel the user must have joined before the bot serves them,
    /// stored with the leading `@`.
    pub required_channel: String,

    // MongoDB
    pub mongodb_uri: String,
    pub mongodb_database: String,

    // Upstream resolver
    pub resolver_base_url: Url,
    pub resolver_schema: ResolverSchema,

    /// Treat unrecognized text as a raw video ID and forward it upstream.
    /// Off by default: arbitrary text reaching the resolver is an abuse
    /// surface, so it has to be opted into explicitly.
    pub accept_raw_ids: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if required environment variables are not set or malformed.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        // Normalize the channel to @username form
        let required_channel = env::var("REQUIRED_CHANNEL")
            .unwrap_or_else(|_| "@awt_bots".to_string());
        let required_channel = format!("@{}", required_channel.trim_start_matches('@'));

        let resolver_base_url = env::var("RESOLVER_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_RESOLVER_URL.to_string());
        let resolver_base_url =
            Url::parse(&resolver_base_url).expect("RESOLVER_BASE_URL must be a valid URL");

        let resolver_schema = match env::var("RESOLVER_SCHEMA")
            .unwrap_or_else(|_| "alpha".to_string())
            .to_lowercase()
            .as_str()
        {
            "teradl" => ResolverSchema::TeraDl,
            _ => ResolverSchema::Alpha,
        };

        let accept_raw_ids = env::var("ACCEPT_RAW_IDS")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            bot_token: env::var("BOT_TOKEN").expect("BOT_TOKEN must be set"),
            required_channel,
            mongodb_uri: env::var("MONGODB_URI").expect("MONGODB_URI must be set"),
            mongodb_database: env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| "boxrelay".to_string()),
            resolver_base_url,
            resolver_schema,
            accept_raw_ids,
        }
    }
}
