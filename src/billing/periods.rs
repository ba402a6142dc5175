use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::cycle::BillingCycle;
use crate::calendar::YearMonth;
use crate::errors::Result;

/// Inclusive, ascending run of months.
#[derive(Debug, Clone)]
pub struct MonthRange {
    next: Option<YearMonth>,
    end: YearMonth,
}

impl MonthRange {
    pub fn new(start: YearMonth, end: YearMonth) -> Self {
        Self {
            next: (start <= end).then_some(start),
            end,
        }
    }
}

impl Iterator for MonthRange {
    type Item = YearMonth;

    fn next(&mut self) -> Option<YearMonth> {
        let current = self.next?;
        self.next = current.checked_succ().filter(|month| *month <= self.end);
        Some(current)
    }
}

/// Every period a student has been expected to pay for, from the month of
/// registration through the period due as of `reference`.
///
/// Empty when the reference date still falls in the period before
/// registration.
pub fn due_periods(registration: NaiveDate, reference: NaiveDate) -> Result<Vec<YearMonth>> {
    let cycle = BillingCycle::compute(registration, reference)?;
    Ok(MonthRange::new(YearMonth::of(registration), cycle.current_due_year_month).collect())
}

/// [`due_periods`] without the months present in `paid`.
pub fn unpaid_periods<I>(
    registration: NaiveDate,
    reference: NaiveDate,
    paid: I,
) -> Result<Vec<YearMonth>>
where
    I: IntoIterator<Item = YearMonth>,
{
    let paid: BTreeSet<YearMonth> = paid.into_iter().collect();
    let mut periods = due_periods(registration, reference)?;
    periods.retain(|period| !paid.contains(period));
    Ok(periods)
}
