#![doc(test(attr(deny(warnings))))]

//! Academy Billing computes, for any student and any "as of" date, which
//! monthly billing period is currently due, how long ago it fell due, and
//! how long until the next one opens.
//!
//! ```
//! use academy_billing::compute_billing_info;
//! use chrono::NaiveDate;
//!
//! let today = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
//! let info = compute_billing_info("2025-12-20", today).unwrap();
//! assert_eq!(info.current_due_year_month.to_string(), "2025-12");
//! assert_eq!(info.days_until_next_due, 10);
//! ```

pub mod billing;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod errors;
pub mod time;
pub mod utils;

pub use billing::{
    billing_cycle, compute_billing_info, due_periods, is_before_registration,
    registration_year_month, unpaid_periods, BillingCycle, BillingCycleCalculator, BillingDay,
    BillingInfo, FuturePolicy,
};
pub use calendar::YearMonth;
pub use errors::{BillingError, Result};
pub use time::{Clock, FixedClock, SystemClock};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Academy billing tracing initialized.");
    });
}
