use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveTime, TimeZone};

use super::year_month::{MAX_YEAR, MIN_YEAR};
use crate::errors::{BillingError, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// Parses a `YYYY-MM-DD` calendar date.
///
/// A trailing time-of-day (`T` or space separated, optional `Z`) is
/// validated and then dropped, so the result is always the date at
/// midnight. Anything that is not a real calendar date is rejected with
/// [`BillingError::InvalidDate`]; nothing is substituted.
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    let invalid = || BillingError::InvalidDate(trimmed.to_string());

    let (date_part, time_part) = match trimmed.find(&['T', ' '][..]) {
        Some(idx) => (&trimmed[..idx], Some(&trimmed[idx + 1..])),
        None => (trimmed, None),
    };

    if !has_date_shape(date_part) {
        return Err(invalid());
    }
    let date = NaiveDate::parse_from_str(date_part, DATE_FORMAT).map_err(|_| invalid())?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        return Err(invalid());
    }
    if let Some(time) = time_part {
        if !is_time_of_day(time.trim_end_matches('Z')) {
            return Err(invalid());
        }
    }
    Ok(date)
}

/// Exactly `DDDD-DD-DD`; chrono alone accepts signs and unpadded fields.
fn has_date_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(idx, b)| match idx {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn is_time_of_day(input: &str) -> bool {
    TIME_FORMATS
        .iter()
        .any(|format| NaiveTime::parse_from_str(input, format).is_ok())
}

/// Local civil date of an instant; the time of day is discarded.
pub fn normalize_instant<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDate {
    instant.with_timezone(&Local).date_naive()
}

/// Whole days from `from` to `to`, negative when `to` is earlier.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn parses_plain_dates() {
        assert_eq!(parse_calendar_date("2024-01-31").unwrap(), date(2024, 1, 31));
        assert_eq!(parse_calendar_date(" 2024-02-29 ").unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn drops_time_of_day() {
        assert_eq!(
            parse_calendar_date("2025-01-05T17:45:12").unwrap(),
            date(2025, 1, 5)
        );
        assert_eq!(
            parse_calendar_date("2025-01-05 08:30").unwrap(),
            date(2025, 1, 5)
        );
        assert_eq!(
            parse_calendar_date("2025-01-05T00:00:00.000Z").unwrap(),
            date(2025, 1, 5)
        );
    }

    #[test]
    fn rejects_impossible_dates() {
        for bad in [
            "2023-02-29",
            "2024-04-31",
            "2024-13-01",
            "2024-00-10",
            "not a date",
            "",
            "2024-01-15Tnoon",
            "0000-01-01",
            "2024-1-5",
            "2024-01-5",
            "2024-1-05",
            "+2024-01-05",
            "20240-01-05",
            "2024/01/05",
        ] {
            assert!(
                matches!(parse_calendar_date(bad), Err(BillingError::InvalidDate(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn days_between_is_signed() {
        assert_eq!(days_between(date(2026, 1, 10), date(2026, 1, 20)), 10);
        assert_eq!(days_between(date(2026, 1, 20), date(2026, 1, 10)), -10);
        assert_eq!(days_between(date(2024, 2, 28), date(2024, 3, 1)), 2);
    }

    #[test]
    fn normalize_instant_keeps_local_date() {
        let local = Local.with_ymd_and_hms(2025, 6, 1, 23, 59, 59).unwrap();
        assert_eq!(normalize_instant(&local), date(2025, 6, 1));
    }
}
