//! Flood gate.
//!
//! Per-user sliding window of message timestamps. The window is rolling,
//! recomputed relative to "now" on every observation, so no reset task is
//! needed.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::debug;

use crate::config::Config;

/// Outcome of observing one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloodDecision {
    Allow,
    /// Mute the sender for the given duration.
    Mute(Duration),
}

/// In-memory flood tracker shared across handlers.
///
/// Entries are created on a user's first message and cleared after a mute.
/// The map itself is never pruned; it lives for the process lifetime.
#[derive(Clone)]
pub struct FloodGate {
    /// Message timestamps per user. The DashMap entry guard serializes
    /// read-modify-write for a single user; different users proceed in
    /// parallel on separate shards.
    windows: Arc<DashMap<u64, Vec<Instant>>>,
    max_messages: usize,
    window: Duration,
    mute_duration: Duration,
}

impl FloodGate {
    pub fn new(max_messages: u32, window_secs: u64, mute_secs: u64) -> Self {
        Self {
            windows: Arc::new(DashMap::new()),
            max_messages: max_messages as usize,
            window: Duration::from_secs(window_secs),
            mute_duration: Duration::from_secs(mute_secs),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.max_messages,
            config.flood_seconds,
            config.flood_mute_secs,
        )
    }

    /// Record a message from `user_id` at `now` and decide.
    ///
    /// Timestamps older than the window are purged, then `now` is appended.
    /// Strictly more than `max_messages` entries triggers a mute and clears
    /// the window, so the count restarts at zero afterwards.
    pub fn observe(&self, user_id: u64, now: Instant) -> FloodDecision {
        let mut entry = self.windows.entry(user_id).or_default();

        entry.retain(|&t| now.duration_since(t) < self.window);
        entry.push(now);

        debug!(
            user_id,
            count = entry.len(),
            window_secs = self.window.as_secs(),
            "flood window updated"
        );

        if entry.len() > self.max_messages {
            entry.clear();
            FloodDecision::Mute(self.mute_duration)
        } else {
            FloodDecision::Allow
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> FloodGate {
        // 3 messages per 10s, 60s mute
        FloodGate::new(3, 10, 60)
    }

    #[test]
    fn under_limit_always_allows() {
        let gate = gate();
        let base = Instant::now();

        for i in 0..3 {
            let now = base + Duration::from_secs(i);
            assert_eq!(gate.observe(1, now), FloodDecision::Allow);
        }
    }

    #[test]
    fn exceeding_limit_mutes_once_and_resets() {
        let gate = gate();
        let base = Instant::now();

        for i in 0..3 {
            assert_eq!(
                gate.observe(1, base + Duration::from_secs(i)),
                FloodDecision::Allow
            );
        }

        // Fourth message inside the window trips the gate.
        assert_eq!(
            gate.observe(1, base + Duration::from_secs(3)),
            FloodDecision::Mute(Duration::from_secs(60))
        );

        // Window was cleared, so the next message counts as the first again.
        assert_eq!(
            gate.observe(1, base + Duration::from_secs(4)),
            FloodDecision::Allow
        );
    }

    #[test]
    fn spaced_messages_never_accumulate() {
        let gate = gate();
        let base = Instant::now();

        for i in 0..4 {
            let now = base + Duration::from_secs(i * 11);
            assert_eq!(gate.observe(1, now), FloodDecision::Allow);
        }
    }

    #[test]
    fn boundary_aged_entry_is_purged() {
        let gate = gate();
        let base = Instant::now();

        assert_eq!(gate.observe(1, base), FloodDecision::Allow);
        // Exactly window seconds later the first entry no longer counts.
        let later = base + Duration::from_secs(10);
        assert_eq!(gate.observe(1, later), FloodDecision::Allow);
        assert_eq!(gate.observe(1, later), FloodDecision::Allow);
        assert_eq!(gate.observe(1, later), FloodDecision::Allow);
        assert!(matches!(gate.observe(1, later), FloodDecision::Mute(_)));
    }

    #[test]
    fn users_are_tracked_independently() {
        let gate = gate();
        let base = Instant::now();

        for i in 0..3 {
            let now = base + Duration::from_secs(i);
            assert_eq!(gate.observe(1, now), FloodDecision::Allow);
            assert_eq!(gate.observe(2, now), FloodDecision::Allow);
        }

        assert!(matches!(
            gate.observe(1, base + Duration::from_secs(3)),
            FloodDecision::Mute(_)
        ));
        // User 2 still has headroom after user 1 was muted.
        assert!(matches!(
            gate.observe(2, base + Duration::from_secs(4)),
            FloodDecision::Mute(_)
        ));
    }
}
