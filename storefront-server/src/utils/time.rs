//! Business time zone helpers
//!
//! Stored timestamps are UTC millis; calendar days are always taken in the
//! configured business time zone.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Reject dates after today (business time zone)
pub fn validate_not_future(date: NaiveDate, tz: Tz) -> AppResult<()> {
    let today = today(tz);
    if date > today {
        return Err(AppError::validation(format!(
            "Date {} is in the future (today is {})",
            date, today
        )));
    }
    Ok(())
}

/// Current calendar date in the business time zone
pub fn today(tz: Tz) -> NaiveDate {
    chrono::Utc::now().with_timezone(&tz).date_naive()
}

/// Calendar date of a UTC millis timestamp in the business time zone
pub fn local_date(millis: i64, tz: Tz) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.with_timezone(&tz).date_naive())
}

/// Date start (00:00:00) → Unix millis (business time zone)
///
/// Falls back to UTC when local midnight does not exist (DST gap).
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    naive
        .and_local_timezone(tz)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// Date end → next day 00:00:00 Unix millis (business time zone)
///
/// Callers use `< end` (exclusive) semantics.
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    day_start_millis(next_day, tz)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAO_PAULO: Tz = chrono_tz::America::Sao_Paulo;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2026-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
        );
        assert!(parse_date("01/03/2026").is_err());
    }

    #[test]
    fn test_day_bounds_in_business_tz() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        // Sao Paulo is UTC-3 (no DST since 2019)
        let start = day_start_millis(date, SAO_PAULO);
        assert_eq!(start, 1_772_334_000_000);
        assert_eq!(day_end_millis(date, SAO_PAULO) - start, 86_400_000);
    }

    #[test]
    fn test_local_date_crosses_midnight() {
        // 2026-03-02T01:30:00Z is still March 1st in Sao Paulo
        let millis = 1_772_415_000_000;
        assert_eq!(
            local_date(millis, SAO_PAULO),
            NaiveDate::from_ymd_opt(2026, 3, 1)
        );
        assert_eq!(
            local_date(millis, chrono_tz::UTC),
            NaiveDate::from_ymd_opt(2026, 3, 2)
        );
    }

    #[test]
    fn test_future_date_rejected() {
        let tomorrow = today(SAO_PAULO).succ_opt().unwrap();
        assert!(validate_not_future(tomorrow, SAO_PAULO).is_err());
        assert!(validate_not_future(today(SAO_PAULO), SAO_PAULO).is_ok());
    }
}
