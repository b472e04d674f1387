use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Default display timezone.
/// This is the canonical timezone used to turn backend instants into the
/// calendar days the dashboard buckets by. The platform settles in KES, so
/// East Africa Time is the sensible default.
pub const DEFAULT_DISPLAY_TZ: Tz = chrono_tz::Africa::Nairobi;

/// Converts a UTC instant to a calendar day in the given timezone.
///
/// This is the single source of truth for deriving a bucket date from a
/// timestamp.
pub fn display_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Today's calendar day in the given timezone.
pub fn display_date_today(tz: Tz) -> NaiveDate {
    display_date_from_utc(Utc::now(), tz)
}

/// Parses a backend timestamp into a UTC instant.
///
/// Accepts RFC 3339, RFC 2822 (the HTTP date form JSON encoders emit for
/// datetimes) and naive ISO timestamps. Naive values are taken as UTC
/// because the backend stamps records with `utcnow()`.
pub fn parse_utc_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Parses a bare `YYYY-MM-DD` calendar date.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Human-readable chart label, e.g. `Jan 1, 2024`.
pub fn format_chart_label(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_display_date_crosses_midnight_in_nairobi() {
        // 22:30 UTC is 01:30 the next day in Nairobi (UTC+3)
        let instant = Utc.with_ymd_and_hms(2024, 3, 9, 22, 30, 0).unwrap();
        assert_eq!(
            display_date_from_utc(instant, DEFAULT_DISPLAY_TZ),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
        assert_eq!(
            display_date_from_utc(instant, chrono_tz::UTC),
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
        );
    }

    #[test]
    fn test_parse_utc_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 10, 15, 0).unwrap();
        assert_eq!(parse_utc_timestamp("2024-01-01T10:15:00Z"), Some(expected));
        assert_eq!(
            parse_utc_timestamp("2024-01-01T13:15:00+03:00"),
            Some(expected)
        );
        assert_eq!(parse_utc_timestamp("2024-01-01T10:15:00"), Some(expected));
        assert_eq!(parse_utc_timestamp("2024-01-01 10:15:00"), Some(expected));
        assert_eq!(
            parse_utc_timestamp("Mon, 01 Jan 2024 10:15:00 GMT"),
            Some(expected)
        );
        assert!(parse_utc_timestamp("2024-01-01T10:15:00.123456").is_some());
        assert_eq!(parse_utc_timestamp("not a date"), None);
        assert_eq!(parse_utc_timestamp("2024-01-01"), None);
    }

    #[test]
    fn test_parse_calendar_date() {
        assert_eq!(
            parse_calendar_date(" 2024-02-29 "),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(parse_calendar_date("2023-02-29"), None);
        assert_eq!(parse_calendar_date(""), None);
    }

    #[test]
    fn test_format_chart_label() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_chart_label(date), "Jan 5, 2024");
    }
}
