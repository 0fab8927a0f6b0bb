//! Source of "today" for date-dependent rules

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Date format used by date inputs
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum ClockError {
    #[error("Invalid date '{value}'. Expected: YYYY-MM-DD")]
    InvalidDate {
        value: String,
        /// Unset when the date parsed but was not written as `YYYY-MM-DD`
        #[source]
        source: Option<chrono::ParseError>,
    },
}

/// Provides the current calendar date
pub trait Clock: Send + Sync + fmt::Debug {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Always returns the same date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(NaiveDate);

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn parse(value: &str) -> Result<Self, ClockError> {
        parse_date(value).map(Self)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Shared handle used by schemas and rules
pub type SharedClock = Arc<dyn Clock>;

/// Parse a `YYYY-MM-DD` calendar date. Month and day must be zero-padded.
pub fn parse_date(value: &str) -> Result<NaiveDate, ClockError> {
    let invalid = |source| ClockError::InvalidDate {
        value: value.to_string(),
        source,
    };

    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| invalid(Some(e)))?;
    if date.format(DATE_FORMAT).to_string() != value {
        return Err(invalid(None));
    }
    Ok(date)
}

/// Whole years between `birth` and `today`, counting a year only once the
/// birthday has been reached in `today`'s year.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_age_counts_birthday() {
        let today = date("2024-06-15");
        assert_eq!(age_on(date("2006-06-15"), today), 18);
        assert_eq!(age_on(date("2006-06-16"), today), 17);
        assert_eq!(age_on(date("2006-05-31"), today), 18);
        assert_eq!(age_on(date("2006-07-01"), today), 17);
    }

    #[test]
    fn test_age_leap_day_birthday() {
        let birth = date("2004-02-29");
        assert_eq!(age_on(birth, date("2022-02-28")), 17);
        assert_eq!(age_on(birth, date("2022-03-01")), 18);
        assert_eq!(age_on(birth, date("2024-02-29")), 20);
    }

    #[test]
    fn test_age_future_birthdate_is_negative() {
        assert!(age_on(date("2030-01-01"), date("2024-06-15")) < 0);
    }

    #[test]
    fn test_parse_date_requires_padding() {
        assert_eq!(
            parse_date("2000-01-05").unwrap(),
            NaiveDate::from_ymd_opt(2000, 1, 5).unwrap()
        );
        for value in ["2000-1-5", "2000-01-5", "2000-1-05"] {
            assert!(
                matches!(parse_date(value), Err(ClockError::InvalidDate { source: None, .. })),
                "{}",
                value
            );
        }
        assert!(matches!(
            parse_date("2000-02-30"),
            Err(ClockError::InvalidDate { source: Some(_), .. })
        ));
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::parse("2024-06-15").unwrap();
        assert_eq!(clock.today(), date("2024-06-15"));
        assert!(matches!(
            FixedClock::parse("15/06/2024"),
            Err(ClockError::InvalidDate { .. })
        ));
    }
}
