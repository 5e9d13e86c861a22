//! Reporting date ranges

use chrono::{Duration, Local, NaiveDate};
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors raised when resolving a requested date range
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DateRangeError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Start date {start} is after end date {end}")]
    Inverted { start: NaiveDate, end: NaiveDate },
}

/// Inclusive range of days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Thirty days ending yesterday, relative to `today`
    pub fn last_30_days(today: NaiveDate) -> Self {
        let end = today - Duration::days(1);
        let start = end - Duration::days(30);
        Self { start, end }
    }

    /// Default range relative to the local date
    pub fn default_range() -> Self {
        Self::last_30_days(Local::now().date_naive())
    }

    /// Resolve optional `YYYY-MM-DD` query values
    ///
    /// When either bound is missing or empty the default range is used.
    pub fn from_params(
        start: Option<&str>,
        end: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, DateRangeError> {
        let start = start.map(str::trim).filter(|s| !s.is_empty());
        let end = end.map(str::trim).filter(|s| !s.is_empty());

        match (start, end) {
            (Some(start), Some(end)) => Self::new(parse_date(start)?, parse_date(end)?),
            _ => Ok(Self::last_30_days(today)),
        }
    }

    /// Number of days covered, inclusive
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// The equally long range immediately preceding this one
    ///
    /// `None` when it would fall before the earliest representable date.
    pub fn previous_period(&self) -> Option<Self> {
        let end = self.start.checked_sub_signed(Duration::days(1))?;
        let start = end.checked_sub_signed(Duration::days(self.days() - 1))?;
        Some(Self { start, end })
    }

    /// GAQL filter for this range
    pub fn gaql_filter(&self) -> String {
        format!(
            "segments.date BETWEEN '{}' AND '{}'",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

/// Strict `YYYY-MM-DD`: four-digit year, no sign, zero-padded month and day
fn parse_date(value: &str) -> Result<NaiveDate, DateRangeError> {
    let invalid = || DateRangeError::InvalidDate(value.to_string());

    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_last_30_days_ends_yesterday() {
        let range = DateRange::last_30_days(date(2024, 3, 15));
        assert_eq!(range.end, date(2024, 3, 14));
        assert_eq!(range.start, date(2024, 2, 13));
        assert_eq!(range.days(), 31);
    }

    #[test]
    fn test_previous_period() {
        let range = DateRange::new(date(2024, 3, 1), date(2024, 3, 10)).unwrap();
        let prev = range.previous_period().unwrap();
        assert_eq!(prev.end, date(2024, 2, 29));
        assert_eq!(prev.start, date(2024, 2, 20));
        assert_eq!(prev.days(), range.days());
    }

    #[test]
    fn test_from_params() {
        let today = date(2024, 3, 15);

        let explicit = DateRange::from_params(Some("2024-01-01"), Some("2024-01-31"), today).unwrap();
        assert_eq!(explicit.start, date(2024, 1, 1));
        assert_eq!(explicit.end, date(2024, 1, 31));

        let partial = DateRange::from_params(Some("2024-01-01"), None, today).unwrap();
        assert_eq!(partial, DateRange::last_30_days(today));

        let empty = DateRange::from_params(Some(""), Some(""), today).unwrap();
        assert_eq!(empty, DateRange::last_30_days(today));
    }

    #[test]
    fn test_from_params_rejects_bad_input() {
        let today = date(2024, 3, 15);
        assert_eq!(
            DateRange::from_params(Some("01/02/2024"), Some("2024-01-31"), today),
            Err(DateRangeError::InvalidDate("01/02/2024".to_string()))
        );
        assert!(matches!(
            DateRange::from_params(Some("2024-02-01"), Some("2024-01-01"), today),
            Err(DateRangeError::Inverted { .. })
        ));
    }

    #[test]
    fn test_from_params_requires_four_digit_years() {
        let today = date(2024, 3, 15);
        let rejected = [
            "-262143-01-01",
            "+2024-01-01",
            "12024-01-01",
            "2024-1-01",
            "2024-01-1 ",
        ];
        for bad in rejected {
            assert_eq!(
                DateRange::from_params(Some(bad), Some("2024-01-31"), today),
                Err(DateRangeError::InvalidDate(bad.trim().to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_previous_period_at_earliest_date_is_none() {
        let range = DateRange::new(NaiveDate::MIN, date(2024, 1, 31)).unwrap();
        assert_eq!(range.previous_period(), None);

        let earliest =
            DateRange::from_params(Some("0000-01-01"), Some("0000-01-31"), date(2024, 3, 15))
                .unwrap();
        assert!(earliest.previous_period().is_some());
    }

    #[test]
    fn test_gaql_filter() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert_eq!(
            range.gaql_filter(),
            "segments.date BETWEEN '2024-01-01' AND '2024-01-31'"
        );
    }
}
