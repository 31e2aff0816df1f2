//! Command implementations, one module per view.

pub mod data;
pub mod lead;
pub mod order;
pub mod reminder;

use chrono::{DateTime, NaiveDate, Utc};
use trackflow_core::{DomainStore, FileStorage, parse_reminder_date};

/// The store as the CLI runs it: file-backed, wall clock.
pub type Store = DomainStore<FileStorage>;

/// Parse a calendar date (`YYYY-MM-DD`).
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date `{s}`: expected YYYY-MM-DD"))
}

/// Parse an instant from RFC 3339, `YYYY-MM-DD HH:MM` (UTC) or
/// `YYYY-MM-DD` (midnight UTC).
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    parse_reminder_date(s).ok_or_else(|| {
        format!("invalid date `{s}`: expected RFC 3339, `YYYY-MM-DD HH:MM` or YYYY-MM-DD")
    })
}

/// Map an empty string to `None` so `--notes ""` clears a field.
pub fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_parse_datetime_formats() {
        let expected = Utc.with_ymd_and_hms(2026, 7, 1, 14, 30, 0).unwrap();
        assert_eq!(parse_datetime("2026-07-01T14:30:00Z").unwrap(), expected);
        assert_eq!(parse_datetime("2026-07-01T16:30:00+02:00").unwrap(), expected);
        assert_eq!(parse_datetime("2026-07-01 14:30").unwrap(), expected);
        assert_eq!(
            parse_datetime("2026-07-01").unwrap(),
            Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap()
        );
        assert!(parse_datetime("next tuesday").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2026-02-28").unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
        );
        assert!(parse_date("2026-02-30").is_err());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(String::new()), None);
        assert_eq!(non_empty("x".into()).as_deref(), Some("x"));
    }
}
