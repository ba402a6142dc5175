use chrono::{Local, NaiveDate};

/// Clock abstracts access to "today" so billing results stay reproducible
/// at any simulated instant.
pub trait Clock: Send + Sync {
    /// Returns the current local calendar date.
    fn today(&self) -> NaiveDate;
}

/// Real-time clock backed by the system's local civil time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    date: NaiveDate,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn fixed_clock_returns_given_date() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 2).unwrap();
        assert_eq!(FixedClock::new(date).today(), date);
    }

    #[test]
    fn clock_trait_object_works() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::new(date));
        assert_eq!(clock.today(), date);
    }

    #[test]
    fn system_clock_matches_local_date() {
        let before = Local::now().date_naive();
        let today = SystemClock.today();
        let after = Local::now().date_naive();
        assert!(before <= today && today <= after);
    }
}
