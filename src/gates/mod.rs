//! Moderation gates.
//!
//! Pure decision components: given current state plus an event they produce a
//! decision, and the event layer executes it. No gate performs network I/O.

pub mod content;
pub mod flood;
pub mod join;

pub use content::{ContentDecision, ContentFilter, DeleteReason};
pub use flood::{FloodDecision, FloodGate};
pub use join::{AvatarCount, JoinCandidate, JoinDecision, JoinGate, KickReason};
