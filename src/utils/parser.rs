//! Duration parsing and formatting.

use std::time::Duration;

/// Parse a duration string like "10s", "5m" or "1h".
///
/// A leading run of digits must be immediately followed by one unit letter
/// (`s`, `m`, `h`); anything after the unit is ignored. Any other shape is
/// no match.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let input = input.trim();

    let digits_end = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    if digits_end == 0 {
        return None;
    }

    let amount: u64 = input[..digits_end].parse().ok()?;
    let unit = input[digits_end..].chars().next()?;

    let seconds = match unit {
        's' => amount,
        'm' => amount * 60,
        'h' => amount * 3600,
        _ => return None,
    };

    Some(Duration::from_secs(seconds))
}

/// Human-readable duration for chat messages.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{} seconds", secs)
    } else if secs < 3600 {
        format!("{} minutes", secs / 60)
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        if mins > 0 {
            format!("{} hours {} minutes", hours, mins)
        } else {
            format!("{} hours", hours)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_unit() {
        assert_eq!(parse_duration("10s"), Some(Duration::from_secs(10)));
        assert_eq!(parse_duration("5m"), Some(Duration::from_secs(300)));
        assert_eq!(parse_duration("1h"), Some(Duration::from_secs(3600)));
    }

    #[test]
    fn rejects_unknown_unit() {
        assert_eq!(parse_duration("10x"), None);
    }

    #[test]
    fn rejects_unit_before_digits() {
        assert_eq!(parse_duration("m5"), None);
    }

    #[test]
    fn rejects_missing_unit_and_empty() {
        assert_eq!(parse_duration("10"), None);
        assert_eq!(parse_duration(""), None);
    }

    #[test]
    fn formats_durations() {
        assert_eq!(format_duration(Duration::from_secs(45)), "45 seconds");
        assert_eq!(format_duration(Duration::from_secs(300)), "5 minutes");
        assert_eq!(format_duration(Duration::from_secs(5400)), "1 hours 30 minutes");
    }
}
