//! Mute command.

use teloxide::prelude::*;
use teloxide::types::{ChatPermissions, ParseMode, ReplyParameters};
use tracing::warn;

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::error::ModerationError;
use crate::utils::{html_escape, parse_duration};

use super::resolve_target;

const MUTE_USAGE: &str = "Usage: /mute @username 5m, or /mute 10m as a reply.";

/// Handle /mute command: mute the target for a parsed duration.
pub async fn mute_command(bot: ThrottledBot, msg: Message, state: AppState) -> anyhow::Result<()> {
    let chat_id = msg.chat.id;
    let Some(caller) = msg.from.as_ref() else {
        return Ok(());
    };

    if !state.permissions.authorize_command(caller.id).is_granted() {
        return Ok(());
    }

    let (target_id, target_name, consumed) = match resolve_target(&bot, &msg, MUTE_USAGE).await {
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

    let args: Vec<&str> = msg
        .text()
        .unwrap_or("")
        .split_whitespace()
        .skip(1)
        .collect();

    let duration = match args.get(consumed).and_then(|arg| parse_duration(arg)) {
        Some(d) => d,
        None => {
            bot.send_message(chat_id, "Invalid duration. Examples: 10s, 5m, 1h")
                .reply_parameters(ReplyParameters::new(msg.id))
                .await?;
            return Ok(());
        }
    };

    let until = chrono::Utc::now() + chrono::Duration::seconds(duration.as_secs() as i64);

    match bot
        .restrict_chat_member(chat_id, target_id, ChatPermissions::empty())
        .until_date(until)
        .await
    {
        Ok(_) => {
            let shown = args[consumed];
            bot.send_message(
                chat_id,
                format!(
                    "User {} has been muted for {}.",
                    html_escape(&target_name),
                    shown
                ),
            )
            .parse_mode(ParseMode::Html)
            .reply_parameters(ReplyParameters::new(msg.id))
            .await?;

            state
                .audit
                .record(format!("Mute: {} for {}", target_name, shown))
                .await;
        }
        Err(e) => {
            warn!("Mute failed: {}", ModerationError::Action(e));
            bot.send_message(chat_id, "Could not mute that user.")
                .reply_parameters(ReplyParameters::new(msg.id))
                .await?;
        }
    }

    Ok(())
}
