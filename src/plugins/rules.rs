//! Rules command and welcome-button callback.

use teloxide::prelude::*;

use crate::bot::dispatcher::{AppState, ThrottledBot};

/// Handle /rules command.
pub async fn rules_command(bot: ThrottledBot, msg: Message, state: AppState) -> anyhow::Result<()> {
    let Some(caller) = msg.from.as_ref() else {
        return Ok(());
    };

    if !state.permissions.authorize_command(caller.id).is_granted() {
        return Ok(());
    }

    bot.send_message(msg.chat.id, state.config.rules_text.clone())
        .await?;

    Ok(())
}

/// Handle the "show_rules" callback from the welcome keyboard.
///
/// Open to everyone: new members are exactly who the button is for.
pub async fn show_rules_callback(
    bot: ThrottledBot,
    q: CallbackQuery,
    state: AppState,
) -> anyhow::Result<()> {
    if let Some(message) = q.message.as_ref() {
        bot.send_message(message.chat().id, state.config.rules_text.clone())
            .await?;
    }

    bot.answer_callback_query(q.id).await?;

    Ok(())
}
