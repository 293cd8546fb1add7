//! Settings command.

use teloxide::prelude::*;
use teloxide::types::ReplyParameters;

use crate::bot::dispatcher::{AppState, ThrottledBot};

/// Handle /settings command: show the active moderation configuration.
pub async fn settings_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
) -> anyhow::Result<()> {
    let Some(caller) = msg.from.as_ref() else {
        return Ok(());
    };

    if !state.permissions.authorize_command(caller.id).is_granted() {
        return Ok(());
    }

    let config = &state.config;
    let text = format!(
        "Profanity filter: ON ({} words)\n\
         Links forbidden: {}\n\
         Flood limit: {} messages per {}s ({}s mute)",
        config.banned_words.len(),
        if config.allow_links { "No" } else { "Yes" },
        config.max_messages,
        config.flood_seconds,
        config.flood_mute_secs,
    );

    bot.send_message(msg.chat.id, text)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;

    Ok(())
}
