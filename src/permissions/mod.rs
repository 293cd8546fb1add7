//! Permission checking.
//!
//! Two separate concerns live here: command authorization against the
//! configured admin-ID set, and chat-admin status resolved through the
//! Telegram API with a short-lived cache.

use std::time::Duration;

use moka::sync::Cache;
use teloxide::prelude::*;
use teloxide::types::{ChatId, ChatMemberKind, UserId};
use tracing::debug;

use crate::error::ModerationError;

/// Result of an explicit command-authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Granted,
    Denied,
}

impl Authorization {
    pub fn is_granted(self) -> bool {
        self == Self::Granted
    }
}

/// Cache key for chat-admin lookups.
type AdminCacheKey = (i64, u64); // (chat_id, user_id)

/// Permission checker with cached chat-admin lookups.
#[derive(Clone)]
pub struct Permissions {
    bot: Bot,
    cache: Cache<AdminCacheKey, bool>,
    /// Configured bot admin IDs; only these users may run commands.
    admin_ids: Vec<u64>,
}

impl Permissions {
    pub fn new(bot: Bot, admin_ids: Vec<u64>) -> Self {
        let cache = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(Duration::from_secs(300))
            .build();

        Self {
            bot,
            cache,
            admin_ids,
        }
    }

    /// Authorize a moderation command against the configured admin set.
    ///
    /// Denied commands are dropped silently by the callers; the explicit
    /// result type keeps that policy visible at the call site.
    pub fn authorize_command(&self, user_id: UserId) -> Authorization {
        if self.admin_ids.contains(&user_id.0) {
            Authorization::Granted
        } else {
            debug!("Command from non-admin {} denied", user_id);
            Authorization::Denied
        }
    }

    /// Check whether a user is an administrator or owner of the chat.
    ///
    /// Results are cached for a few minutes. A failed lookup is returned as
    /// `ModerationError::Lookup`; callers treat it as "not an admin".
    pub async fn is_chat_admin(
        &self,
        chat_id: ChatId,
        user_id: UserId,
    ) -> Result<bool, ModerationError> {
        let key = (chat_id.0, user_id.0);

        if let Some(cached) = self.cache.get(&key) {
            debug!("Admin cache hit for user {} in chat {}", user_id, chat_id);
            return Ok(cached);
        }

        let member = self
            .bot
            .get_chat_member(chat_id, user_id)
            .await
            .map_err(ModerationError::Lookup)?;

        let is_admin = matches!(
            member.kind,
            ChatMemberKind::Owner(_) | ChatMemberKind::Administrator(_)
        );

        self.cache.insert(key, is_admin);
        Ok(is_admin)
    }
}
