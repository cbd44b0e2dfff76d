//! Clock and calendar-day helpers
//!
//! Every component that needs the boundaries of a calendar day, the weekday
//! of a date, or "today" goes through this module.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use shared::models::{MINUTES_PER_DAY, TimeFormatError, TimeOfDay};
use thiserror::Error;

/// Malformed clock or date input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error(transparent)]
    Time(#[from] TimeFormatError),

    #[error("invalid date format: {0:?} (expected YYYY-MM-DD)")]
    Date(String),
}

/// `"HH:MM"` to minutes since midnight
pub fn to_minutes(time: &str) -> Result<u16, FormatError> {
    Ok(TimeOfDay::parse(time)?.minutes())
}

/// Minutes since midnight to zero-padded `"HH:MM"`
///
/// `minutes` must be below 1440. Larger values are a caller bug: debug builds
/// panic, release builds print the out-of-range hour as-is rather than wrap.
pub fn to_time_string(minutes: u16) -> String {
    debug_assert!(
        minutes < MINUTES_PER_DAY,
        "to_time_string: {minutes} is outside a single day"
    );
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Strict `YYYY-MM-DD`
pub fn parse_date(input: &str) -> Result<NaiveDate, FormatError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| FormatError::Date(input.to_string()))
}

/// Half-open `[00:00, next day 00:00)` bounds of a calendar day
pub fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_time(NaiveTime::MIN);
    let end = date
        .succ_opt()
        .map(|next| next.and_time(NaiveTime::MIN))
        .unwrap_or(NaiveDateTime::MAX);
    (start, end)
}

/// 0 = Sunday .. 6 = Saturday
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Current local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `date` starts at or after the end of `today`
pub fn is_after_today(date: NaiveDate, today: NaiveDate) -> bool {
    let (_, today_end) = day_bounds(today);
    let (date_start, _) = day_bounds(date);
    date_start >= today_end
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_to_minutes() {
        assert_eq!(to_minutes("00:00").unwrap(), 0);
        assert_eq!(to_minutes("09:05").unwrap(), 545);
        assert_eq!(to_minutes("9:05").unwrap(), 545);
        assert_eq!(to_minutes("23:59").unwrap(), 1439);
        assert!(matches!(to_minutes("24:00"), Err(FormatError::Time(_))));
        assert!(to_minutes("7").is_err());
    }

    #[test]
    fn test_to_time_string() {
        assert_eq!(to_time_string(0), "00:00");
        assert_eq!(to_time_string(545), "09:05");
        assert_eq!(to_time_string(1439), "23:59");
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn test_to_time_string_out_of_range_panics_in_debug() {
        to_time_string(MINUTES_PER_DAY);
    }

    #[test]
    fn test_round_trip_random_times() {
        let mut rng = StdRng::seed_from_u64(0x1a5b);
        for _ in 0..2000 {
            let h: u16 = rng.gen_range(0..24);
            let m: u16 = rng.gen_range(0..60);
            let t = format!("{h:02}:{m:02}");
            assert_eq!(to_time_string(to_minutes(&t).unwrap()), t);
        }
    }

    #[test]
    fn test_round_trip_every_minute() {
        for minutes in 0..MINUTES_PER_DAY {
            assert_eq!(to_minutes(&to_time_string(minutes)).unwrap(), minutes);
        }
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(date("2025-03-09").day(), 9);
        assert!(matches!(parse_date("2025-3-9x"), Err(FormatError::Date(_))));
        assert!(parse_date("2025-02-30").is_err());
        assert!(parse_date("09/03/2025").is_err());
    }

    #[test]
    fn test_day_bounds_half_open() {
        let (start, end) = day_bounds(date("2025-12-31"));
        assert_eq!(start.to_string(), "2025-12-31 00:00:00");
        assert_eq!(end.to_string(), "2026-01-01 00:00:00");
    }

    #[test]
    fn test_weekday_index_sunday_first() {
        // 2025-03-09 is a Sunday
        assert_eq!(weekday_index(date("2025-03-09")), 0);
        assert_eq!(weekday_index(date("2025-03-10")), 1);
        assert_eq!(weekday_index(date("2025-03-15")), 6);
    }

    #[test]
    fn test_is_after_today() {
        let today = date("2025-06-10");
        assert!(!is_after_today(date("2025-06-09"), today));
        assert!(!is_after_today(today, today));
        assert!(is_after_today(date("2025-06-11"), today));
    }
}
