//! Join event handler.
//!
//! Resolves the fallible profile-photo lookup first, then runs the pure
//! join gate and executes its decision.

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{
    ChatMemberUpdated, ChatPermissions, InlineKeyboardButton, InlineKeyboardMarkup, ParseMode,
};
use tracing::{debug, info, warn};

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::error::ModerationError;
use crate::gates::{AvatarCount, JoinCandidate, JoinDecision};
use crate::utils::fill_username;

/// Returns the handler for membership updates.
pub fn handler() -> UpdateHandler<anyhow::Error> {
    dptree::filter(is_becoming_member).endpoint(join_handler)
}

/// Only transitions whose new status is exactly "member" are evaluated.
fn is_becoming_member(update: ChatMemberUpdated) -> bool {
    update.new_chat_member.kind.is_member()
}

async fn join_handler(
    bot: ThrottledBot,
    update: ChatMemberUpdated,
    state: AppState,
) -> anyhow::Result<()> {
    let chat_id = update.chat.id;
    let user = &update.new_chat_member.user;

    debug!("New member {} in chat {}", user.id, chat_id);

    // Fallible lookup, resolved before the pure gate runs. A failure is an
    // explicit variant so rule 2 is skipped instead of kicking.
    let avatars = match bot.get_user_profile_photos(user.id).await {
        Ok(photos) => AvatarCount::Count(photos.total_count),
        Err(e) => {
            debug!("Avatar lookup skipped: {}", ModerationError::Lookup(e));
            AvatarCount::LookupFailed
        }
    };

    let candidate = JoinCandidate::new(&user.full_name(), user.username.as_deref(), avatars);

    match state.join.evaluate(&candidate) {
        JoinDecision::Kick(reason) => {
            info!("Kicking {} on join: {}", user.id, reason);

            // Ban then unban so the user can rejoin later. Failures (user
            // already gone, missing rights) are logged and dropped.
            match bot.ban_chat_member(chat_id, user.id).await {
                Ok(_) => {
                    let _ = bot.unban_chat_member(chat_id, user.id).await;
                }
                Err(e) => warn!("Join kick failed: {}", ModerationError::Action(e)),
            }

            state
                .audit
                .record(format!("🚫 Kicked on join ({}): {}", reason, user.full_name()))
                .await;
        }
        JoinDecision::Mute(duration) => {
            info!("Muting suspicious new member {}", user.id);

            let until =
                chrono::Utc::now() + chrono::Duration::seconds(duration.as_secs() as i64);
            if let Err(e) = bot
                .restrict_chat_member(chat_id, user.id, ChatPermissions::empty())
                .until_date(until)
                .await
            {
                warn!("Join mute failed: {}", ModerationError::Action(e));
            }

            state
                .audit
                .record(format!(
                    "🤐 Muted on join (bot-like account): {}",
                    user.full_name()
                ))
                .await;
        }
        JoinDecision::Welcome => {
            let text = fill_username(&state.config.welcome_message, &user.full_name());
            let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
                "📜 Rules",
                "show_rules",
            )]]);

            bot.send_message(chat_id, text)
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboard)
                .await?;

            info!("Welcomed {} to chat {}", user.full_name(), chat_id);
        }
    }

    Ok(())
}
