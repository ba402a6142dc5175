use std::{fmt, str::FromStr, sync::Arc};

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use super::cycle::{BillingCycle, BillingInfo};
use super::periods;
use crate::calendar::{normalize_instant, parse_calendar_date, YearMonth};
use crate::errors::{BillingError, Result};
use crate::time::{Clock, SystemClock};

/// How to treat a reference date that falls before the registration date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuturePolicy {
    /// Compute as usual; callers filter with `is_before_registration`.
    Allow,
    /// Fail with [`BillingError::ReferenceBeforeRegistration`].
    #[default]
    Reject,
}

impl FromStr for FuturePolicy {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(FuturePolicy::Allow),
            "reject" => Ok(FuturePolicy::Reject),
            other => Err(format!("unknown policy `{other}` (use allow or reject)")),
        }
    }
}

impl fmt::Display for FuturePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FuturePolicy::Allow => "allow",
            FuturePolicy::Reject => "reject",
        };
        f.write_str(label)
    }
}

/// Billing engine entry point for callers holding raw registration dates.
///
/// The reference date defaults to `clock.today()` when not supplied.
#[derive(Clone)]
pub struct BillingCycleCalculator {
    clock: Arc<dyn Clock>,
    policy: FuturePolicy,
}

impl BillingCycleCalculator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            policy: FuturePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FuturePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FuturePolicy {
        self.policy
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn billing_cycle(
        &self,
        registration: &str,
        reference: Option<NaiveDate>,
    ) -> Result<BillingCycle> {
        let (registration, reference) = self.resolve(registration, reference)?;
        BillingCycle::compute(registration, reference)
    }

    pub fn compute_billing_info(
        &self,
        registration: &str,
        reference: Option<NaiveDate>,
    ) -> Result<BillingInfo> {
        self.billing_cycle(registration, reference)
            .map(|cycle| cycle.info())
    }

    /// Billing info as of the local calendar date of `instant`.
    pub fn compute_billing_info_at<Tz: TimeZone>(
        &self,
        registration: &str,
        instant: &DateTime<Tz>,
    ) -> Result<BillingInfo> {
        self.compute_billing_info(registration, Some(normalize_instant(instant)))
    }

    pub fn due_periods(
        &self,
        registration: &str,
        reference: Option<NaiveDate>,
    ) -> Result<Vec<YearMonth>> {
        let (registration, reference) = self.resolve(registration, reference)?;
        periods::due_periods(registration, reference)
    }

    pub fn unpaid_periods<I>(
        &self,
        registration: &str,
        reference: Option<NaiveDate>,
        paid: I,
    ) -> Result<Vec<YearMonth>>
    where
        I: IntoIterator<Item = YearMonth>,
    {
        let (registration, reference) = self.resolve(registration, reference)?;
        periods::unpaid_periods(registration, reference, paid)
    }

    fn resolve(
        &self,
        registration: &str,
        reference: Option<NaiveDate>,
    ) -> Result<(NaiveDate, NaiveDate)> {
        let registration = parse_calendar_date(registration)?;
        let reference = reference.unwrap_or_else(|| self.clock.today());
        if self.policy == FuturePolicy::Reject && reference < registration {
            tracing::warn!(
                %registration,
                %reference,
                "reference date precedes registration; refusing to classify"
            );
            return Err(BillingError::ReferenceBeforeRegistration {
                registration,
                reference,
            });
        }
        Ok((registration, reference))
    }
}

impl Default for BillingCycleCalculator {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl fmt::Debug for BillingCycleCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BillingCycleCalculator")
            .field("today", &self.clock.today())
            .field("policy", &self.policy)
            .finish()
    }
}
