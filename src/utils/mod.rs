//! Utility functions.

mod parser;

pub use parser::{format_duration, parse_duration};

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Apply the `{username}` filling to a message template.
pub fn fill_username(template: &str, name: &str) -> String {
    template.replace("{username}", &html_escape(name))
}
