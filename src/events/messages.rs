//! Message moderation pipeline.
//!
//! Every group message first passes the flood gate; a flood mute
//! short-circuits the content checks for that message. Messages that pass
//! then go through the content filter.

use std::time::Instant;

use teloxide::prelude::*;
use teloxide::types::{ChatPermissions, ReplyParameters};
use tracing::{debug, info, warn};

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::error::ModerationError;
use crate::gates::{ContentDecision, FloodDecision, FloodGate};
use crate::utils::format_duration;

pub async fn check_message(
    bot: &ThrottledBot,
    msg: &Message,
    state: &AppState,
    flood: &FloodGate,
) -> anyhow::Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    // Commands are routed separately and don't count toward the flood window.
    if text.starts_with('/') {
        return Ok(());
    }

    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    if user.is_bot {
        return Ok(());
    }

    let chat_id = msg.chat.id;

    match flood.observe(user.id.0, Instant::now()) {
        FloodDecision::Mute(duration) => {
            info!("Flood mute for user {} in chat {}", user.id, chat_id);

            let until =
                chrono::Utc::now() + chrono::Duration::seconds(duration.as_secs() as i64);
            if let Err(e) = bot
                .restrict_chat_member(chat_id, user.id, ChatPermissions::empty())
                .until_date(until)
                .await
            {
                warn!("Flood mute failed: {}", ModerationError::Action(e));
            }

            bot.send_message(chat_id, "⛔ Flood! User has been temporarily muted.")
                .reply_parameters(ReplyParameters::new(msg.id))
                .await?;
            state
                .audit
                .record(format!(
                    "Flood mute: {} ({})",
                    user.full_name(),
                    format_duration(duration)
                ))
                .await;

            // Deliberate ordering: a flood mute skips the content checks.
            return Ok(());
        }
        FloodDecision::Allow => {}
    }

    // Unknown admin status degrades to non-admin, so the link rule still
    // applies when the lookup fails.
    let is_admin = match state.permissions.is_chat_admin(chat_id, user.id).await {
        Ok(admin) => admin,
        Err(e) => {
            debug!("Admin lookup failed, treating as non-admin: {}", e);
            false
        }
    };

    match state.content.evaluate(text, is_admin) {
        ContentDecision::Delete(reason) => {
            if let Err(e) = bot.delete_message(chat_id, msg.id).await {
                warn!("Message delete failed: {}", ModerationError::Action(e));
            }
            state
                .audit
                .record(format!(
                    "Deleted message from {}: {}",
                    user.full_name(),
                    reason
                ))
                .await;
        }
        ContentDecision::Allow => {}
    }

    Ok(())
}
