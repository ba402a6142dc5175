#![allow(dead_code)]

use chrono::{Days, NaiveDate};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Every day from `start` to `end`, inclusive.
pub fn each_day(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}

/// Registration dates covering every day-of-month, month-end overflow days
/// included, across leap and non-leap years.
pub fn sample_registrations() -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = each_day(date(2023, 1, 1), date(2024, 12, 31))
        .step_by(5)
        .collect();
    for (year, month) in [(2023, 1), (2023, 3), (2024, 1), (2024, 5), (2024, 8), (2024, 12)] {
        for day in 28..=31 {
            if let Some(extra) = NaiveDate::from_ymd_opt(year, month, day) {
                dates.push(extra);
            }
        }
    }
    dates.push(date(2024, 2, 29));
    dates
}

pub fn day_before(day: NaiveDate) -> NaiveDate {
    day - Days::new(1)
}
