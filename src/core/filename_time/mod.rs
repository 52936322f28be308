//! Extracts a capture timestamp out of a file stem, trying
//! `YYYYMMDD_HHMMSS` first and falling back to a bare `YYYYMMDD`. Pure
//! function, no filesystem access.

use chrono::NaiveDateTime;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

fn datetime_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d{8})_(\d{6})").unwrap())
}

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d{8})").unwrap())
}

/// Parse a capture timestamp out of a file's stem (the name without its
/// extension). Tries `YYYYMMDD_HHMMSS` then `YYYYMMDD`; invalid calendar
/// fields (month 13, day 32, ...) are treated as a miss rather than an
/// error.
pub fn parse_from_stem(stem: &str) -> Option<NaiveDateTime> {
    if let Some(caps) = datetime_pattern().captures(stem) {
        let date = &caps[1];
        let time = &caps[2];
        if let Some(dt) = build_datetime(date, time) {
            return Some(dt);
        }
    }
    if let Some(caps) = date_pattern().captures(stem) {
        let date = &caps[1];
        if let Some(dt) = build_datetime(date, "000000") {
            return Some(dt);
        }
    }
    None
}

/// Parse a capture timestamp out of a path's file stem.
pub fn parse_from_path(path: &Path) -> Option<NaiveDateTime> {
    let stem = path.file_stem().and_then(|s| s.to_str())?;
    parse_from_stem(stem)
}

fn build_datetime(date: &str, time: &str) -> Option<NaiveDateTime> {
    let year: i32 = date[0..4].parse().ok()?;
    let month: u32 = date[4..6].parse().ok()?;
    let day: u32 = date[6..8].parse().ok()?;
    let hour: u32 = time[0..2].parse().ok()?;
    let minute: u32 = time[2..4].parse().ok()?;
    let second: u32 = time[4..6].parse().ok()?;

    let date = chrono::NaiveDate::from_ymd_opt(year, month, day)?;
    let time = chrono::NaiveTime::from_hms_opt(hour, minute, second)?;
    Some(NaiveDateTime::new(date, time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn parses_date_and_time() {
        let dt = parse_from_stem("IMG_20240101_120000").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(dt.time(), NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    }

    #[test]
    fn parses_date_only_as_midnight() {
        let dt = parse_from_stem("20220115").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2022, 1, 15).unwrap());
        assert_eq!(dt.time(), NaiveTime::from_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn invalid_month_is_a_miss() {
        assert!(parse_from_stem("IMG_20241301_120000").is_none());
    }

    #[test]
    fn invalid_day_is_a_miss() {
        assert!(parse_from_stem("20240132").is_none());
    }

    #[test]
    fn no_digits_is_a_miss() {
        assert!(parse_from_stem("vacation_photo").is_none());
    }

    #[test]
    fn prefers_datetime_pattern_over_date_only() {
        // Both patterns would match the leading 8 digits; the datetime
        // pattern should win when the `_HHMMSS` suffix is present.
        let dt = parse_from_stem("20240101_235959_extra").unwrap();
        assert_eq!(dt.time(), NaiveTime::from_hms_opt(23, 59, 59).unwrap());
    }
}
