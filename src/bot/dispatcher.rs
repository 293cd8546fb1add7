//! Message dispatcher setup.
//!
//! Builds the dispatcher with the command handlers and event handlers.

use std::sync::Arc;

use teloxide::adaptors::Throttle;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

use crate::audit::AuditLog;
use crate::config::Config;
use crate::events;
use crate::gates::{ContentFilter, FloodGate, JoinGate};
use crate::permissions::Permissions;
use crate::plugins;

/// Bot type with Throttle adaptor for automatic API rate limiting.
pub type ThrottledBot = Throttle<Bot>;

/// Shared application state.
///
/// Everything in here is immutable after startup; the only mutable
/// moderation state is the `FloodGate`, injected as its own dependency.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide configuration, loaded once.
    pub config: Arc<Config>,

    /// Command authorization and cached chat-admin lookups.
    pub permissions: Permissions,

    /// Best-effort log chat sink.
    pub audit: AuditLog,

    /// Stateless message content rules.
    pub content: ContentFilter,

    /// Stateless join heuristics.
    pub join: JoinGate,
}

impl AppState {
    pub fn new(bot: ThrottledBot, config: Arc<Config>) -> Self {
        // Permissions needs the inner Bot for API calls
        let permissions = Permissions::new(bot.inner().clone(), config.admin_ids.clone());
        let audit = AuditLog::new(bot.clone(), config.log_chat_id);
        let content = ContentFilter::from_config(&config);
        let join = JoinGate::from_config(&config);

        Self {
            config,
            permissions,
            audit,
            content,
            join,
        }
    }
}

/// Build the dispatcher with all handlers.
pub fn build_dispatcher(
    bot: ThrottledBot,
    state: AppState,
    flood: FloodGate,
) -> Dispatcher<ThrottledBot, anyhow::Error, teloxide::dispatching::DefaultKey> {
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state, flood])
        .build()
}

/// Build the handler schema.
fn schema() -> UpdateHandler<anyhow::Error> {
    use teloxide::dispatching::UpdateFilterExt;

    // Commands first; everything else goes through the moderation pipeline.
    let message_handler = Update::filter_message()
        .branch(plugins::command_handler())
        .branch(events::message_event_handler());

    // Membership updates (join gate)
    let member_handler = Update::filter_chat_member().branch(events::member_event_handler());

    // Callback queries (welcome "Rules" button)
    let callback_handler = plugins::callback_handler();

    dptree::entry()
        .branch(message_handler)
        .branch(member_handler)
        .branch(callback_handler)
}
