//! Calendar primitives shared by the billing engine: year-month periods,
//! month-length rules, and parsing of caller-supplied dates.

pub mod dates;
pub mod year_month;

pub use dates::{days_between, normalize_instant, parse_calendar_date, DATE_FORMAT};
pub use year_month::{is_leap_year, YearMonth, MAX_YEAR, MIN_YEAR};
