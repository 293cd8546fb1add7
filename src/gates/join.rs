//! Join gate.
//!
//! Ordered heuristics applied to a newly joined member, cheapest and most
//! certain first. Each rule is independent and short-circuits, so a later
//! rule never compounds a false positive from an earlier one.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;

/// Mute applied to accounts that only look bot-like (rule 5).
const SUSPICIOUS_MUTE_SECS: u64 = 30 * 60;

/// Result of the profile-photo lookup.
///
/// The lookup is fallible and performed by the caller; a failed lookup must
/// never cause a kick, so "unknown" is its own variant rather than a default
/// count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarCount {
    Count(u32),
    LookupFailed,
}

/// A joining member, normalized for rule evaluation. Transient: built per
/// join event and dropped after the decision.
#[derive(Debug, Clone)]
pub struct JoinCandidate {
    /// Display name, trimmed and lowercased.
    pub display_name: String,
    /// Username without `@`, lowercased; `None` when unset.
    pub username: Option<String>,
    pub avatars: AvatarCount,
}

impl JoinCandidate {
    pub fn new(display_name: &str, username: Option<&str>, avatars: AvatarCount) -> Self {
        Self {
            display_name: display_name.trim().to_lowercase(),
            username: username.map(|u| u.to_lowercase()),
            avatars,
        }
    }
}

/// Why a joining member was kicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KickReason {
    EmptyName,
    NoAvatar,
    ProfaneName,
    BotLikeName,
}

impl fmt::Display for KickReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "empty name"),
            Self::NoAvatar => write!(f, "no avatar"),
            Self::ProfaneName => write!(f, "profane name"),
            Self::BotLikeName => write!(f, "bot-like name"),
        }
    }
}

/// Outcome of evaluating one join event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinDecision {
    Kick(KickReason),
    /// Temporary mute for bot-like but not certainly fake accounts.
    Mute(Duration),
    Welcome,
}

/// Stateless join heuristics.
#[derive(Clone)]
pub struct JoinGate {
    banned_words: Arc<Vec<String>>,
}

impl JoinGate {
    pub fn new(banned_words: Arc<Vec<String>>) -> Self {
        Self { banned_words }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.banned_words.clone())
    }

    /// Run the ordered rule chain; first match wins.
    pub fn evaluate(&self, candidate: &JoinCandidate) -> JoinDecision {
        let name = candidate.display_name.as_str();

        // 1. Empty display name.
        if name.is_empty() {
            return JoinDecision::Kick(KickReason::EmptyName);
        }

        // 2. No profile photo. Skipped entirely when the lookup failed.
        if candidate.avatars == AvatarCount::Count(0) {
            return JoinDecision::Kick(KickReason::NoAvatar);
        }

        // 3. Banned word in the display name.
        if self.banned_words.iter().any(|w| name.contains(w.as_str())) {
            return JoinDecision::Kick(KickReason::ProfaneName);
        }

        // 4. "bot" in name or username.
        let username = candidate.username.as_deref().unwrap_or("");
        if name.contains("bot") || username.contains("bot") {
            return JoinDecision::Kick(KickReason::BotLikeName);
        }

        // 5. No username and a digit in the name: mute, don't kick.
        if candidate.username.is_none() && name.chars().any(|c| c.is_numeric()) {
            return JoinDecision::Mute(Duration::from_secs(SUSPICIOUS_MUTE_SECS));
        }

        JoinDecision::Welcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> JoinGate {
        JoinGate::new(Arc::new(vec!["badword".to_string()]))
    }

    #[test]
    fn empty_name_wins_over_no_avatar() {
        let c = JoinCandidate::new("   ", None, AvatarCount::Count(0));
        assert_eq!(
            gate().evaluate(&c),
            JoinDecision::Kick(KickReason::EmptyName)
        );
    }

    #[test]
    fn zero_avatars_kicks() {
        let c = JoinCandidate::new("Anna", Some("anna"), AvatarCount::Count(0));
        assert_eq!(gate().evaluate(&c), JoinDecision::Kick(KickReason::NoAvatar));
    }

    #[test]
    fn failed_avatar_lookup_never_kicks_on_rule_two() {
        let c = JoinCandidate::new("Anna", Some("anna"), AvatarCount::LookupFailed);
        assert_eq!(gate().evaluate(&c), JoinDecision::Welcome);
    }

    #[test]
    fn failed_avatar_lookup_still_reaches_later_rules() {
        let c = JoinCandidate::new("RoBot", Some("anna"), AvatarCount::LookupFailed);
        assert_eq!(
            gate().evaluate(&c),
            JoinDecision::Kick(KickReason::BotLikeName)
        );
    }

    #[test]
    fn profane_name_kicks() {
        let c = JoinCandidate::new("BadWord Joe", Some("joe"), AvatarCount::Count(2));
        assert_eq!(
            gate().evaluate(&c),
            JoinDecision::Kick(KickReason::ProfaneName)
        );
    }

    #[test]
    fn bot_substring_in_username_kicks() {
        let c = JoinCandidate::new("Joe", Some("spamBOT42"), AvatarCount::Count(2));
        assert_eq!(
            gate().evaluate(&c),
            JoinDecision::Kick(KickReason::BotLikeName)
        );
    }

    #[test]
    fn no_username_with_digit_mutes() {
        let c = JoinCandidate::new("anna92", None, AvatarCount::Count(1));
        assert_eq!(
            gate().evaluate(&c),
            JoinDecision::Mute(Duration::from_secs(30 * 60))
        );
    }

    #[test]
    fn digit_with_username_is_welcomed() {
        let c = JoinCandidate::new("anna92", Some("anna"), AvatarCount::Count(1));
        assert_eq!(gate().evaluate(&c), JoinDecision::Welcome);
    }

    #[test]
    fn clean_candidate_is_welcomed() {
        let c = JoinCandidate::new("Anna", Some("anna"), AvatarCount::Count(3));
        assert_eq!(gate().evaluate(&c), JoinDecision::Welcome);
    }
}
