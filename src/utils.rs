// Utility functions
use chrono::{DateTime, NaiveDate};

/// Converts a unix timestamp (seconds) into its UTC calendar date.
pub fn timestamp_to_date(ts: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive())
}

/// Formats a percent with an explicit sign, e.g. `+5.00%` / `-2.00%`.
pub fn signed_percent(value: f64) -> String {
    format!("{:+.2}%", value)
}

/// Cuts `text` to at most `max_chars` characters, respecting char boundaries.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_percent_keeps_sign() {
        assert_eq!(signed_percent(5.0), "+5.00%");
        assert_eq!(signed_percent(-2.0), "-2.00%");
        assert_eq!(signed_percent(0.0), "+0.00%");
    }

    #[test]
    fn timestamp_maps_to_utc_date() {
        // 2024-01-02 14:30:00 UTC
        assert_eq!(
            timestamp_to_date(1_704_205_800),
            NaiveDate::from_ymd_opt(2024, 1, 2)
        );
    }

    #[test]
    fn truncate_respects_multibyte_chars() {
        assert_eq!(truncate_chars("📊📊📊", 2), "📊📊");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }
}
