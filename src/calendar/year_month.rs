use std::{fmt, str::FromStr};

use chrono::{Datelike, Days, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{BillingError, Result};

/// Smallest year accepted from text input; keeps `YYYY-MM` fixed-width.
pub const MIN_YEAR: i32 = 1;
/// Largest year accepted from text input.
pub const MAX_YEAR: i32 = 9999;

/// A calendar month of a specific year.
///
/// Ordering is chronological. The canonical text form is the zero-padded
/// `YYYY-MM`, whose lexicographic order matches the chronological one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let invalid = || BillingError::InvalidYearMonth(format!("{:04}-{:02}", year, month));
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(invalid());
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or_else(invalid)
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            first: date - Days::new(u64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month() {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            _ => {
                if is_leap_year(self.year()) {
                    29
                } else {
                    28
                }
            }
        }
    }

    /// The date for `day` in this month, clamped into `1..=days_in_month()`.
    pub fn day_clamped(&self, day: u32) -> NaiveDate {
        let day = day.clamp(1, self.days_in_month());
        self.first + Days::new(u64::from(day - 1))
    }

    /// Shifts by `delta` months using a linear month index, so year
    /// boundaries need no special handling.
    pub fn checked_add_months(&self, delta: i32) -> Option<Self> {
        let index = self
            .year()
            .checked_mul(12)?
            .checked_add(self.first.month0() as i32)?
            .checked_add(delta)?;
        let year = index.div_euclid(12);
        let month = index.rem_euclid(12) as u32 + 1;
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    pub fn checked_succ(&self) -> Option<Self> {
        self.checked_add_months(1)
    }

    pub fn checked_pred(&self) -> Option<Self> {
        self.checked_add_months(-1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }
}

/// Gregorian leap-year rule, answered by asking chrono whether Feb 29 exists.
pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = BillingError;

    fn from_str(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let invalid = || BillingError::InvalidYearMonth(trimmed.to_string());
        let (year, month) = trimmed.split_once('-').ok_or_else(invalid)?;
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || month.len() != 2 || !all_digits(year) || !all_digits(month) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        Self::of(date)
    }
}

impl Serialize for YearMonth {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
