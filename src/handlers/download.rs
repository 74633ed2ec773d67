//! The download pipeline.
//!
//! Strictly linear per message: membership gate, user store, link parsing,
//! resolution, ceiling check, streamed relay. Each stage either advances or
//! replies and stops; no retries.

use teloxide::prelude::*;
use tracing::{error, info, warn};

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::relay::exceeds_ceiling;
use crate::utils::extract_id_with_fallback;

/// Handle a plain-text message as a download request.
pub async fn download_handler(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
) -> anyhow::Result<()> {
    let chat_id = msg.chat.id;
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        return Ok(());
    };

    // Gate first: blocked users leave no trace in the store
    if !state.gate.is_member(user.id).await {
        bot.send_message(
            chat_id,
            format!("❌ You must join {} to use this bot.", state.required_channel),
        )
        .await?;
        return Ok(());
    }

    // A failed write must not take the whole pipeline down
    if let Err(e) = state.users.upsert(user.id.0).await {
        warn!("Failed to record user {}: {}", user.id, e);
    }

    let Some(video_id) = extract_id_with_fallback(text, state.accept_raw_ids) else {
        bot.send_message(
            chat_id,
            "❌ Invalid TeraBox link. Please send a correct link or ID.",
        )
        .await?;
        return Ok(());
    };

    info!("Extracted video ID: {}", video_id);
    let status = bot.send_message(chat_id, "⏳ Fetching video link...").await?;

    let resolution = match state.resolver.resolve(&video_id).await {
        Ok(resolution) => resolution,
        Err(e) => {
            warn!("Resolution failed for {}: {}", video_id, e);
            bot.send_message(chat_id, e.user_message()).await?;
            return Ok(());
        }
    };

    if exceeds_ceiling(resolution.size_bytes) {
        bot.send_message(
            chat_id,
            format!(
                "🚨 Video is too large for Telegram! Download manually: {}",
                resolution.download_url
            ),
        )
        .await?;
        return Ok(());
    }

    bot.send_message(chat_id, "✅ Video found! 🔄 Downloading...").await?;

    match state.relay.send_video(&bot, chat_id, &resolution).await {
        Ok(()) => {
            bot.delete_message(chat_id, status.id).await?;
        }
        Err(e) => {
            error!("Relay failed for {}: {}", video_id, e);
            bot.send_message(chat_id, "❌ Something went wrong. Try again later.")
                .await?;
        }
    }

    Ok(())
}
