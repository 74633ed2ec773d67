//! Required-channel membership gate.
//!
//! Every inbound request is checked against a fixed channel before any other
//! work happens. The check fails closed: if Telegram cannot tell us the
//! member status, the user is treated as not joined.

use teloxide::prelude::*;
use teloxide::types::{ChatMemberKind, Recipient, UserId};
use tracing::warn;

/// Whether a member status grants access to the bot.
///
/// Joined means member, administrator, or owner. Restricted, left, and
/// banned users are turned away.
pub fn status_allows(kind: &ChatMemberKind) -> bool {
    kind.is_member() || kind.is_administrator() || kind.is_owner()
}

/// Membership checker bound to one channel.
#[derive(Clone)]
pub struct MembershipGate {
    bot: Bot,
    channel: String,
}

impl MembershipGate {
    /// Create a gate for the given `@channel`.
    pub fn new(bot: Bot, channel: String) -> Self {
        Self { bot, channel }
    }

    /// Check whether a user has joined the required channel.
    ///
    /// Fails closed: any transport error is logged and reported as "not a
    /// member". The caller tells the user to join and stops there.
    pub async fn is_member(&self, user_id: UserId) -> bool {
        let chat = Recipient::ChannelUsername(self.channel.clone());

        match self.bot.get_chat_member(chat, user_id).await {
            Ok(member) => status_allows(&member.kind),
            Err(e) => {
                warn!("Membership check failed for user {}: {}", user_id, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::Owner;

    #[test]
    fn test_member_statuses_allowed() {
        assert!(status_allows(&ChatMemberKind::Member));
        assert!(status_allows(&ChatMemberKind::Owner(Owner {
            custom_title: None,
            is_anonymous: false,
        })));
    }

    #[test]
    fn test_left_is_blocked() {
        assert!(!status_allows(&ChatMemberKind::Left));
    }
}
