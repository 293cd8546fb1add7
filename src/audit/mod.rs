//! Audit log sink.
//!
//! Mirrors moderation actions into a configured log chat. Strictly
//! best-effort: a missing log chat or a failed send never affects the
//! moderation pipeline.

use teloxide::prelude::*;
use teloxide::types::ChatId;
use tracing::debug;

use crate::bot::dispatcher::ThrottledBot;

#[derive(Clone)]
pub struct AuditLog {
    bot: ThrottledBot,
    log_chat: Option<ChatId>,
}

impl AuditLog {
    pub fn new(bot: ThrottledBot, log_chat_id: Option<i64>) -> Self {
        Self {
            bot,
            log_chat: log_chat_id.map(ChatId),
        }
    }

    /// Send a line to the log chat, if one is configured.
    pub async fn record(&self, text: impl Into<String>) {
        let Some(chat) = self.log_chat else {
            return;
        };

        if let Err(e) = self.bot.send_message(chat, text.into()).await {
            debug!("Audit log send failed: {}", e);
        }
    }
}
