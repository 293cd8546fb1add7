//! Configuration module for the Warden bot.
//!
//! Loads configuration from environment variables once at startup; the
//! resulting `Config` is immutable and shared behind an `Arc`.

use std::env;
use std::fs;
use std::sync::Arc;

use tracing::warn;

const DEFAULT_WELCOME: &str =
    "Hi, {username}! Welcome aboard. Please have a look at the group rules: /rules";

const DEFAULT_RULES: &str = "1. Be respectful.\n2. No spam, no ads.\n3. No links.";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,

    /// User IDs allowed to run moderation commands.
    pub admin_ids: Vec<u64>,

    /// Chat that receives the moderation audit log, if any.
    pub log_chat_id: Option<i64>,

    /// Messages allowed inside the flood window before a mute.
    pub max_messages: u32,

    /// Flood window length in seconds.
    pub flood_seconds: u64,

    /// How long a flood mute lasts, in seconds.
    pub flood_mute_secs: u64,

    /// When set, the link filter is disabled for everyone.
    pub allow_links: bool,

    /// Lowercase banned words, matched as substrings in messages and names.
    pub banned_words: Arc<Vec<String>>,

    /// Welcome template; `{username}` is replaced with the member's name.
    pub welcome_message: String,

    /// Group rules text, read from `RULES_FILE` at startup.
    pub rules_text: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if `BOT_TOKEN` is not set.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let admin_ids = env::var("ADMIN_IDS")
            .unwrap_or_default()
            .split(',')
            .filter_map(|s| s.trim().parse::<u64>().ok())
            .collect();

        let log_chat_id = env::var("LOG_CHAT_ID")
            .ok()
            .and_then(|s| s.trim().parse::<i64>().ok());

        let banned_words: Vec<String> = env::var("BANNED_WORDS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let rules_text = match env::var("RULES_FILE") {
            Ok(path) => fs::read_to_string(&path).unwrap_or_else(|e| {
                warn!("Could not read rules file {}: {}", path, e);
                DEFAULT_RULES.to_string()
            }),
            Err(_) => DEFAULT_RULES.to_string(),
        };

        Self {
            bot_token: env::var("BOT_TOKEN").expect("BOT_TOKEN must be set"),
            admin_ids,
            log_chat_id,
            max_messages: parse_env("MAX_MESSAGES", 3),
            flood_seconds: parse_env("FLOOD_SECONDS", 10),
            flood_mute_secs: parse_env("FLOOD_MUTE_DURATION", 60),
            allow_links: env::var("ALLOW_LINKS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            banned_words: Arc::new(banned_words),
            welcome_message: env::var("WELCOME_MESSAGE")
                .unwrap_or_else(|_| DEFAULT_WELCOME.to_string()),
            rules_text,
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
