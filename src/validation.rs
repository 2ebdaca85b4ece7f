//! Input validation for allocator requests.
//!
//! Turns raw user input (counts and a date as strings) into a
//! [`ScheduleRequest`]. Detects:
//! - Non-numeric or negative counts
//! - Malformed or impossible dates
//! - Dates whose operating window runs past the end of the calendar
//!
//! Nothing is defaulted silently: the first bad field is reported.

use jiff::civil::Date;
use thiserror::Error;

use crate::scheduler::ScheduleRequest;

/// A rejected input field.
#[derive(Debug, Error)]
pub enum InputError {
    /// A count is not a non-negative integer.
    #[error("invalid {field}: {value:?} is not a non-negative integer")]
    InvalidCount {
        /// Name of the field.
        field: &'static str,
        /// Raw input.
        value: String,
    },
    /// A date is not a valid `YYYY-MM-DD` calendar date.
    #[error("invalid date: {value:?}")]
    InvalidDate {
        /// Raw input.
        value: String,
        /// Parser error.
        #[source]
        source: jiff::Error,
    },
    /// The date's operating window ends after the last representable day.
    #[error("date out of range: {date} has no following day for its overnight window")]
    DateOutOfRange {
        /// Parsed date.
        date: Date,
    },
}

/// Parses a count field.
pub fn parse_count(field: &'static str, value: &str) -> Result<usize, InputError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| InputError::InvalidCount {
            field,
            value: value.to_string(),
        })
}

/// Parses a `YYYY-MM-DD` date that has a following calendar day.
pub fn parse_date(value: &str) -> Result<Date, InputError> {
    let date = value
        .trim()
        .parse::<Date>()
        .map_err(|source| InputError::InvalidDate {
            value: value.to_string(),
            source,
        })?;
    if date.tomorrow().is_err() {
        return Err(InputError::DateOutOfRange { date });
    }
    Ok(date)
}

impl ScheduleRequest {
    /// Builds a request from raw strings.
    ///
    /// # Example
    /// ```
    /// use bus_schedule::scheduler::ScheduleRequest;
    ///
    /// let request = ScheduleRequest::parse("8", "10", "5", "2024-05-06").unwrap();
    /// assert_eq!(request.bus_count, 8);
    /// assert!(ScheduleRequest::parse("-1", "10", "5", "2024-05-06").is_err());
    /// ```
    pub fn parse(
        bus_count: &str,
        driver_a_count: &str,
        driver_b_count: &str,
        date: &str,
    ) -> Result<Self, InputError> {
        Ok(Self::new(
            parse_count("bus count", bus_count)?,
            parse_count("category A driver count", driver_a_count)?,
            parse_count("category B driver count", driver_b_count)?,
            parse_date(date)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_valid_input() {
        let request = ScheduleRequest::parse("8", " 10 ", "5", "2024-05-06").unwrap();
        assert_eq!(request, ScheduleRequest::new(8, 10, 5, date(2024, 5, 6)));
    }

    #[test]
    fn test_zero_counts_accepted() {
        let request = ScheduleRequest::parse("0", "0", "0", "2024-05-11").unwrap();
        assert_eq!(request.bus_count, 0);
        assert!(request.day().is_weekend());
    }

    #[test]
    fn test_negative_count() {
        let err = ScheduleRequest::parse("8", "-3", "5", "2024-05-06").unwrap_err();
        match err {
            InputError::InvalidCount { field, value } => {
                assert_eq!(field, "category A driver count");
                assert_eq!(value, "-3");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_numeric_count() {
        let err = parse_count("bus count", "eight").unwrap_err();
        assert!(err.to_string().contains("bus count"));
        assert!(err.to_string().contains("eight"));
    }

    #[test]
    fn test_invalid_date() {
        for raw in ["2024-02-30", "06/05/2024", ""] {
            let err = parse_date(raw).unwrap_err();
            assert!(matches!(err, InputError::InvalidDate { .. }));
            assert!(std::error::Error::source(&err).is_some());
        }
    }

    #[test]
    fn test_last_calendar_day_rejected() {
        let err = ScheduleRequest::parse("8", "10", "5", "9999-12-31").unwrap_err();
        assert!(matches!(err, InputError::DateOutOfRange { date: d } if d == date(9999, 12, 31)));
        assert!(ScheduleRequest::parse("8", "10", "5", "9999-12-30").is_ok());
    }

    #[test]
    fn test_first_bad_field_reported() {
        let err = ScheduleRequest::parse("x", "y", "5", "bad").unwrap_err();
        assert!(matches!(
            err,
            InputError::InvalidCount {
                field: "bus count",
                ..
            }
        ));
    }
}
