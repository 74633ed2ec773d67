//! Message dispatcher setup.
//!
//! Builds the dispatcher and the shared application state injected into
//! every handler.

use std::sync::Arc;

use teloxide::adaptors::Throttle;
use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;

use crate::config::Config;
use crate::database::{Database, UserRepo};
use crate::handlers;
use crate::membership::MembershipGate;
use crate::relay::StreamRelay;
use crate::resolver::ResolverClient;

/// Bot type with Throttle adaptor for automatic rate limiting.
pub type ThrottledBot = Throttle<Bot>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// User store (write-only).
    pub users: Arc<UserRepo>,

    /// Required-channel membership gate.
    pub gate: MembershipGate,

    /// Upstream resolver client.
    pub resolver: Arc<ResolverClient>,

    /// Streaming relay over the shared HTTP pool.
    pub relay: StreamRelay,

    /// Channel shown in the "must join" reply.
    pub required_channel: String,

    /// Forward unrecognized text upstream as a raw ID.
    pub accept_raw_ids: bool,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        bot: ThrottledBot,
        db: Arc<Database>,
        http: reqwest::Client,
        resolver: Arc<ResolverClient>,
        config: &Config,
    ) -> Self {
        // Note: the gate needs the inner Bot for API calls
        let gate = MembershipGate::new(bot.inner().clone(), config.required_channel.clone());

        Self {
            users: Arc::new(UserRepo::new(&db)),
            gate,
            resolver,
            relay: StreamRelay::new(http),
            required_channel: config.required_channel.clone(),
            accept_raw_ids: config.accept_raw_ids,
        }
    }
}

/// Build the dispatcher with all handlers.
pub fn build_dispatcher(
    bot: ThrottledBot,
    db: Arc<Database>,
    http: reqwest::Client,
    resolver: Arc<ResolverClient>,
    config: &Config,
) -> Dispatcher<ThrottledBot, anyhow::Error, teloxide::dispatching::DefaultKey> {
    let state = AppState::new(bot.clone(), db, http, resolver, config);

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
}

/// Build the handler schema: commands first, then the download pipeline.
fn schema() -> UpdateHandler<anyhow::Error> {
    Update::filter_message()
        .branch(handlers::command_handler())
        .branch(handlers::message_handler())
}
