//! Date-time helpers shared by request parsing and business rules.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a wall-clock timestamp.
///
/// Accepts RFC 3339 or a naive ISO local form, which is taken as UTC.
pub fn parse_datetime(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Parse a date (`YYYY-MM-DD`) as the start of that day, or a full timestamp.
pub fn parse_date_or_datetime(input: &str) -> Option<DateTime<Utc>> {
    parse_datetime(input).or_else(|| {
        NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    })
}

/// Whole minutes between two instants, truncated toward zero.
pub fn minutes_between(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    (b - a).num_minutes()
}

/// `now` minus `minutes`, or `None` when the result leaves chrono's range.
pub fn minutes_before(now: DateTime<Utc>, minutes: i64) -> Option<DateTime<Utc>> {
    Duration::try_minutes(minutes).and_then(|d| now.checked_sub_signed(d))
}

/// `now` minus `hours`, or `None` when the result leaves chrono's range.
pub fn hours_before(now: DateTime<Utc>, hours: i64) -> Option<DateTime<Utc>> {
    Duration::try_hours(hours).and_then(|d| now.checked_sub_signed(d))
}

/// `now` minus `days`, or `None` when the result leaves chrono's range.
pub fn days_before(now: DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
    Duration::try_days(days).and_then(|d| now.checked_sub_signed(d))
}

/// `yyyy-MM-dd HH:mm`
pub fn format_short(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn parses_rfc3339_and_naive_forms() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap();
        assert_eq!(parse_datetime("2025-03-01T08:30:00Z"), Some(expected));
        assert_eq!(parse_datetime("2025-03-01T08:30:00"), Some(expected));
        assert_eq!(parse_datetime("2025-03-01T08:30"), Some(expected));
        assert_eq!(parse_datetime("2025-03-01 08:30"), Some(expected));
        assert_eq!(parse_datetime("not a date"), None);
        assert_eq!(parse_datetime(""), None);
    }

    #[test]
    fn plain_dates_start_at_midnight() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_date_or_datetime("2025-03-01"), Some(expected));
    }

    #[test]
    fn lookbacks_reject_out_of_range_windows() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        assert_eq!(hours_before(now, 2), Some(now - Duration::hours(2)));
        assert_eq!(days_before(now, 1), Some(now - Duration::days(1)));
        assert_eq!(hours_before(now, i64::MAX), None);
        assert_eq!(days_before(now, i64::MAX), None);
        // In range for TimeDelta but before the earliest representable date
        assert_eq!(days_before(now, 1_000_000_000), None);
        assert_eq!(days_before(now, -1), Some(now + Duration::days(1)));
    }

    #[test]
    fn minutes_truncate() {
        let a = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        assert_eq!(minutes_between(a, a + Duration::seconds(59)), 0);
        assert_eq!(minutes_between(a, a - Duration::seconds(61)), -1);
        assert_eq!(format_short(a), "2025-03-01 08:00");
    }
}
