//! Bot runtime.
//!
//! The bot is a plain long-polling listener; there are no subcommands, no
//! flags, and no webhook surface.

use teloxide::prelude::*;
use tracing::info;

use super::dispatcher::ThrottledBot;

/// Run the dispatcher until shutdown (Ctrl-C).
pub async fn run(
    mut dispatcher: Dispatcher<ThrottledBot, anyhow::Error, teloxide::dispatching::DefaultKey>,
) {
    info!("Starting bot in polling mode...");
    dispatcher.dispatch().await;
}
