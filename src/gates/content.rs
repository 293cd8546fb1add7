//! Content filter.
//!
//! Stateless text rules applied to messages that passed the flood gate.
//! First match wins: profanity, then links, then allow.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Config;

/// `https?://`, `t.me/`, a bare `@handle` token, or `www.`
static LINK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(https?://|t\.me/|@\w+|www\.)").unwrap());

/// Why a message was deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteReason {
    Profanity,
    Link,
}

impl fmt::Display for DeleteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Profanity => write!(f, "profanity"),
            Self::Link => write!(f, "link"),
        }
    }
}

/// Outcome of evaluating one message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentDecision {
    Allow,
    Delete(DeleteReason),
}

/// Stateless content rules. Admin status is resolved by the caller and
/// passed in; the filter itself never does lookups.
#[derive(Clone)]
pub struct ContentFilter {
    /// Lowercase banned words, matched as substrings.
    banned_words: Arc<Vec<String>>,
    allow_links: bool,
}

impl ContentFilter {
    pub fn new(banned_words: Arc<Vec<String>>, allow_links: bool) -> Self {
        Self {
            banned_words,
            allow_links,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.banned_words.clone(), config.allow_links)
    }

    /// Case-insensitive substring match against the banned-word set.
    pub fn has_profanity(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.banned_words.iter().any(|w| lower.contains(w.as_str()))
    }

    pub fn has_link(&self, text: &str) -> bool {
        LINK_PATTERN.is_match(text)
    }

    /// Evaluate rules in order. Profanity is deleted regardless of admin
    /// status; links are deleted only for non-admins and only when links
    /// are not allowed chat-wide.
    pub fn evaluate(&self, text: &str, is_author_admin: bool) -> ContentDecision {
        if self.has_profanity(text) {
            return ContentDecision::Delete(DeleteReason::Profanity);
        }

        if !self.allow_links && !is_author_admin && self.has_link(text) {
            return ContentDecision::Delete(DeleteReason::Link);
        }

        ContentDecision::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(allow_links: bool) -> ContentFilter {
        ContentFilter::new(
            Arc::new(vec!["badword".to_string(), "slur".to_string()]),
            allow_links,
        )
    }

    #[test]
    fn profanity_deleted_regardless_of_admin() {
        let f = filter(false);
        assert_eq!(
            f.evaluate("what a BadWord indeed", false),
            ContentDecision::Delete(DeleteReason::Profanity)
        );
        assert_eq!(
            f.evaluate("what a BadWord indeed", true),
            ContentDecision::Delete(DeleteReason::Profanity)
        );
    }

    #[test]
    fn profanity_checked_before_links() {
        let f = filter(false);
        assert_eq!(
            f.evaluate("badword at http://x.com", false),
            ContentDecision::Delete(DeleteReason::Profanity)
        );
    }

    #[test]
    fn link_deleted_for_non_admin_only() {
        let f = filter(false);
        assert_eq!(
            f.evaluate("see http://x.com", false),
            ContentDecision::Delete(DeleteReason::Link)
        );
        assert_eq!(f.evaluate("see http://x.com", true), ContentDecision::Allow);
    }

    #[test]
    fn link_pattern_variants() {
        let f = filter(false);
        for text in [
            "https://example.com",
            "join t.me/somegroup",
            "ping @someone",
            "visit www.example.com",
        ] {
            assert_eq!(
                f.evaluate(text, false),
                ContentDecision::Delete(DeleteReason::Link),
                "expected link match for {text:?}"
            );
        }
    }

    #[test]
    fn allow_links_flag_disables_link_rule() {
        let f = filter(true);
        assert_eq!(
            f.evaluate("see http://x.com", false),
            ContentDecision::Allow
        );
    }

    #[test]
    fn clean_text_allowed() {
        let f = filter(false);
        assert_eq!(f.evaluate("hello there", false), ContentDecision::Allow);
    }
}
