//! Ban and kick commands.

use teloxide::prelude::*;
use teloxide::types::{ParseMode, ReplyParameters};
use tracing::warn;

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::error::ModerationError;
use crate::utils::html_escape;

use super::resolve_target;

const KICK_USAGE: &str = "Usage: /kick @username, /kick <id>, or reply to the offender.";
const BAN_USAGE: &str = "Usage: /ban @username, /ban <id>, or reply to the offender.";

/// Handle /ban command.
pub async fn ban_command(bot: ThrottledBot, msg: Message, state: AppState) -> anyhow::Result<()> {
    moderate(bot, msg, state, Removal::Ban).await
}

/// Handle /kick command.
pub async fn kick_command(bot: ThrottledBot, msg: Message, state: AppState) -> anyhow::Result<()> {
    moderate(bot, msg, state, Removal::Kick).await
}

#[derive(Clone, Copy, PartialEq)]
enum Removal {
    /// Permanent ban.
    Ban,
    /// Ban then unban, so the user can rejoin.
    Kick,
}

async fn moderate(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
    mode: Removal,
) -> anyhow::Result<()> {
    let chat_id = msg.chat.id;
    let Some(caller) = msg.from.as_ref() else {
        return Ok(());
    };

    if !state.permissions.authorize_command(caller.id).is_granted() {
        return Ok(());
    }

    let usage = match mode {
        Removal::Ban => BAN_USAGE,
        Removal::Kick => KICK_USAGE,
    };

    let (target_id, target_name, _) = match resolve_target(&bot, &msg, usage).await {
        Ok(t) => t,
        Err(ModerationError::MalformedInput(hint)) => {
            bot.send_message(chat_id, hint)
                .reply_parameters(ReplyParameters::new(msg.id))
                .await?;
            return Ok(());
        }
        Err(e) => {
            bot.send_message(chat_id, "Could not find that user.")
                .reply_parameters(ReplyParameters::new(msg.id))
                .await?;
            warn!("Target resolution failed: {}", e);
            return Ok(());
        }
    };

    match bot.ban_chat_member(chat_id, target_id).await {
        Ok(_) => {
            if mode == Removal::Kick {
                // Already-removed users make this a no-op; that still counts
                // as a successful kick.
                let _ = bot.unban_chat_member(chat_id, target_id).await;
            }

            let (verb, log_prefix) = match mode {
                Removal::Ban => ("banned", "Ban"),
                Removal::Kick => ("kicked", "Kick"),
            };

            bot.send_message(
                chat_id,
                format!("User {} has been {}.", html_escape(&target_name), verb),
            )
            .parse_mode(ParseMode::Html)
            .reply_parameters(ReplyParameters::new(msg.id))
            .await?;

            state
                .audit
                .record(format!("{}: {}", log_prefix, target_name))
                .await;
        }
        Err(e) => {
            warn!("Removal failed: {}", ModerationError::Action(e));
            bot.send_message(chat_id, "Could not remove that user.")
                .reply_parameters(ReplyParameters::new(msg.id))
                .await?;
        }
    }

    Ok(())
}
