//! Message handlers.
//!
//! One command (`/start`) and one text pipeline (everything else), wired
//! into the dispatcher by `command_handler` and `message_handler`.

pub mod download;
pub mod start;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

/// All bot commands.
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Start the bot")]
    Start,
}

/// Build the command handler.
pub fn command_handler() -> UpdateHandler<anyhow::Error> {
    use dptree::case;

    teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(start::start_handler))
}

/// Build the plain-text handler: non-command text in private chats goes
/// through the download pipeline. Group chatter is ignored.
pub fn message_handler() -> UpdateHandler<anyhow::Error> {
    dptree::filter(|msg: Message| wants_download(msg.chat.is_private(), msg.text()))
        .endpoint(download::download_handler)
}

/// Whether a message should enter the download pipeline.
fn wants_download(is_private: bool, text: Option<&str>) -> bool {
    is_private
        && text.is_some_and(|t| !t.trim().is_empty() && !t.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_text_enters_pipeline() {
        assert!(wants_download(true, Some("https://terabox.com/s/abc123")));
    }

    #[test]
    fn test_group_messages_are_ignored() {
        assert!(!wants_download(false, Some("https://terabox.com/s/abc123")));
    }

    #[test]
    fn test_commands_and_empty_text_skip_pipeline() {
        assert!(!wants_download(true, Some("/start")));
        assert!(!wants_download(true, Some("   ")));
        assert!(!wants_download(true, None));
    }
}
