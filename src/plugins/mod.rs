//! Command plugins.
//!
//! Admin-gated moderation commands. Authorization is a single check against
//! the configured admin-ID set; denied commands are dropped silently.

pub mod ban;
pub mod mute;
pub mod rules;
pub mod settings;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::UserId;
use teloxide::utils::command::BotCommands;

use crate::bot::dispatcher::ThrottledBot;
use crate::error::ModerationError;

/// All bot commands.
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Ban a user")]
    Ban,

    #[command(description = "Kick a user")]
    Kick,

    #[command(description = "Mute a user for a duration")]
    Mute,

    #[command(description = "Show the group rules")]
    Rules,

    #[command(description = "Show moderation settings")]
    Settings,
}

/// Build the combined command handler.
pub fn command_handler() -> UpdateHandler<anyhow::Error> {
    use dptree::case;

    teloxide::filter_command::<Command, _>()
        .branch(case![Command::Ban].endpoint(ban::ban_command))
        .branch(case![Command::Kick].endpoint(ban::kick_command))
        .branch(case![Command::Mute].endpoint(mute::mute_command))
        .branch(case![Command::Rules].endpoint(rules::rules_command))
        .branch(case![Command::Settings].endpoint(settings::settings_command))
}

/// Build the callback query handler (welcome-message "Rules" button).
pub fn callback_handler() -> UpdateHandler<anyhow::Error> {
    Update::filter_callback_query()
        .branch(
            dptree::filter(|q: CallbackQuery| q.data.as_deref() == Some("show_rules"))
                .endpoint(rules::show_rules_callback),
        )
}

/// Resolve the target user of a moderation command.
///
/// Resolution order: reply message, numeric ID argument, `@username` via
/// `get_chat`. Returns (user_id, display name, args consumed after the
/// command). `usage` becomes the `MalformedInput` message when no target
/// was given.
pub async fn resolve_target(
    bot: &ThrottledBot,
    msg: &Message,
    usage: &str,
) -> Result<(UserId, String, usize), ModerationError> {
    if let Some(reply) = msg.reply_to_message() {
        if let Some(user) = &reply.from {
            return Ok((user.id, user.full_name(), 0));
        }
    }

    let args: Vec<&str> = msg
        .text()
        .unwrap_or("")
        .split_whitespace()
        .skip(1)
        .collect();

    if let Some(arg) = args.first() {
        if let Ok(id) = arg.parse::<u64>() {
            return Ok((UserId(id), format!("User {}", id), 1));
        }

        if arg.starts_with('@') {
            let chat = bot
                .get_chat(arg.to_string())
                .await
                .map_err(ModerationError::Lookup)?;
            if chat.is_private() {
                let name = chat.first_name().unwrap_or("User").to_string();
                return Ok((UserId(chat.id.0 as u64), name, 1));
            }
        }
    }

    Err(ModerationError::MalformedInput(usage.to_string()))
}
