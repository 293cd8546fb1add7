//! Event handler system.
//!
//! Wires externally delivered updates (messages, membership changes) into
//! the moderation gates and executes the resulting decisions.

pub mod joins;
pub mod messages;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use tracing::error;

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::gates::FloodGate;

/// Handler for chat member updates (join gate).
pub fn member_event_handler() -> UpdateHandler<anyhow::Error> {
    joins::handler()
}

/// Handler for group messages (flood gate, then content filter).
pub fn message_event_handler() -> UpdateHandler<anyhow::Error> {
    dptree::filter(|msg: Message| msg.chat.is_group() || msg.chat.is_supergroup())
        .endpoint(moderate_message)
}

/// A fault while processing one event is logged and must not take down the
/// event loop; the dispatcher moves on to the next update.
async fn moderate_message(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
    flood: FloodGate,
) -> anyhow::Result<()> {
    if let Err(e) = messages::check_message(&bot, &msg, &state, &flood).await {
        error!("Message moderation error: {}", e);
    }
    Ok(())
}
