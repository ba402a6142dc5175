//! Per-student billing cycle engine.
//!
//! A student's billing day is the day of month they registered on. Their
//! due month advances once per calendar month, on that day (clamped to the
//! month's length), and every result is derived from the registration date
//! and an explicit reference date alone.

pub mod calculator;
pub mod cycle;
pub mod periods;

pub use calculator::{BillingCycleCalculator, FuturePolicy};
pub use cycle::{
    billing_cycle, compute_billing_info, is_before_registration, registration_year_month,
    BillingCycle, BillingDay, BillingInfo,
};
pub use periods::{due_periods, unpaid_periods, MonthRange};
