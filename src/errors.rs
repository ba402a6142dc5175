use std::result::Result as StdResult;

use chrono::NaiveDate;
use thiserror::Error;

/// Error type returned by the billing cycle engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingError {
    #[error("Invalid date: `{0}` (use YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("Invalid year-month: `{0}` (use YYYY-MM)")]
    InvalidYearMonth(String),
    #[error("Reference date {reference} precedes registration date {registration}")]
    ReferenceBeforeRegistration {
        registration: NaiveDate,
        reference: NaiveDate,
    },
    #[error("Date out of supported range: {0}")]
    OutOfRange(String),
}

pub type Result<T> = StdResult<T, BillingError>;
