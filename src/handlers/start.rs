//! /start command handler.

use teloxide::prelude::*;

use crate::bot::dispatcher::ThrottledBot;

/// Handle the /start command.
pub async fn start_handler(bot: ThrottledBot, msg: Message) -> anyhow::Result<()> {
    bot.send_message(
        msg.chat.id,
        "Send me a TeraBox link or Video ID, and I'll download it for you!",
    )
    .await?;

    Ok(())
}
