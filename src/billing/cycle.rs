use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::{days_between, parse_calendar_date, YearMonth};
use crate::errors::{BillingError, Result};

/// Day of month on which a student's billing period turns over.
///
/// Taken once from the registration date and never recomputed; months
/// shorter than the billing day use [`BillingDay::effective_in`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct BillingDay(u32);

impl BillingDay {
    pub fn new(day: u32) -> Option<Self> {
        (1..=31).contains(&day).then_some(Self(day))
    }

    pub fn from_registration(registration: NaiveDate) -> Self {
        Self(registration.day())
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// The billing day clamped to the length of `period`.
    pub fn effective_in(self, period: YearMonth) -> u32 {
        self.0.min(period.days_in_month())
    }

    /// Date on which `period` falls due.
    pub fn due_date_in(self, period: YearMonth) -> NaiveDate {
        period.day_clamped(self.effective_in(period))
    }
}

impl TryFrom<u32> for BillingDay {
    type Error = BillingError;

    fn try_from(day: u32) -> Result<Self> {
        Self::new(day).ok_or_else(|| BillingError::OutOfRange(format!("billing day {day}")))
    }
}

impl From<BillingDay> for u32 {
    fn from(day: BillingDay) -> Self {
        day.0
    }
}

impl fmt::Display for BillingDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Billing snapshot handed to dashboards, reports and escalation logic.
///
/// Valid only for the reference date it was computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingInfo {
    pub current_due_year_month: YearMonth,
    pub billing_day: BillingDay,
    pub days_since_due: i64,
    pub days_until_next_due: u32,
}

/// Full working record of one billing computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingCycle {
    pub billing_day: BillingDay,
    pub reference_date: NaiveDate,
    pub current_due_year_month: YearMonth,
    pub period_due_date: NaiveDate,
    pub next_due_date: NaiveDate,
    pub days_since_due: i64,
    pub days_until_next_due: u32,
}

impl BillingCycle {
    /// Locates the period due as of `today` for a student registered on
    /// `registration`.
    ///
    /// The due month advances on the (clamped) billing day itself, not the
    /// day after. Every month consulted is clamped against its own length.
    pub fn compute(registration: NaiveDate, today: NaiveDate) -> Result<Self> {
        let billing_day = BillingDay::from_registration(registration);
        let this_month = YearMonth::of(today);

        let (current_due_year_month, next_period) =
            if today.day() >= billing_day.effective_in(this_month) {
                (this_month, step(this_month, 1)?)
            } else {
                (step(this_month, -1)?, this_month)
            };

        let period_due_date = billing_day.due_date_in(current_due_year_month);
        let next_due_date = billing_day.due_date_in(next_period);
        let days_since_due = days_between(period_due_date, today);
        let days_until_next_due =
            u32::try_from(days_between(today, next_due_date).max(0)).unwrap_or(u32::MAX);

        debug_assert!(days_since_due >= 0, "current period due after reference date");

        tracing::debug!(
            billing_day = billing_day.get(),
            %today,
            due_month = %current_due_year_month,
            days_since_due,
            days_until_next_due,
            "billing cycle computed"
        );

        Ok(Self {
            billing_day,
            reference_date: today,
            current_due_year_month,
            period_due_date,
            next_due_date,
            days_since_due,
            days_until_next_due,
        })
    }

    pub fn info(&self) -> BillingInfo {
        BillingInfo {
            current_due_year_month: self.current_due_year_month,
            billing_day: self.billing_day,
            days_since_due: self.days_since_due,
            days_until_next_due: self.days_until_next_due,
        }
    }

    pub fn is_due_today(&self) -> bool {
        self.days_since_due == 0
    }
}

impl From<BillingCycle> for BillingInfo {
    fn from(cycle: BillingCycle) -> Self {
        cycle.info()
    }
}

fn step(period: YearMonth, delta: i32) -> Result<YearMonth> {
    period
        .checked_add_months(delta)
        .ok_or_else(|| BillingError::OutOfRange(format!("{period} shifted by {delta} month(s)")))
}

pub fn billing_cycle(registration: NaiveDate, reference: NaiveDate) -> Result<BillingCycle> {
    BillingCycle::compute(registration, reference)
}

/// Billing info for a `YYYY-MM-DD` registration date as of `reference`.
pub fn compute_billing_info(registration: &str, reference: NaiveDate) -> Result<BillingInfo> {
    let registration = parse_calendar_date(registration)?;
    Ok(BillingCycle::compute(registration, reference)?.info())
}

/// True when `year_month` lies strictly before the month of registration.
pub fn is_before_registration(year_month: &str, registration: &str) -> Result<bool> {
    let period: YearMonth = year_month.parse()?;
    Ok(period < registration_year_month(registration)?)
}

pub fn registration_year_month(registration: &str) -> Result<YearMonth> {
    parse_calendar_date(registration).map(YearMonth::of)
}
