//! Moderation error taxonomy.
//!
//! Distinguishes the three failure channels the event pipeline cares about:
//! lookups (degrade to "rule not triggered"), actions (log and move on), and
//! malformed admin input (answer with a usage hint).

use teloxide::RequestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModerationError {
    /// A profile or membership query failed. Never escalated to a
    /// moderation action.
    #[error("lookup failed: {0}")]
    Lookup(#[source] RequestError),

    /// The Telegram API rejected a moderation action (missing permission,
    /// user already gone). Logged, not retried.
    #[error("action failed: {0}")]
    Action(#[source] RequestError),

    /// Unparsable command arguments; the usage hint is shown to the caller.
    #[error("malformed input: {0}")]
    MalformedInput(String),
}
