//! Date range input and validation
//!
//! The date inputs hand us raw strings. Nothing is sent to the service until
//! both ends parse as calendar dates.

use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// Format used by the date inputs and the service's query parameters
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which end of the range a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeField {
    Start,
    End,
}

impl fmt::Display for RangeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeField::Start => write!(f, "start"),
            RangeField::End => write!(f, "end"),
        }
    }
}

/// Why a range was rejected before reaching the executor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select both a start and an end date.")]
    MissingDate,

    #[error("The {field} date '{value}' is not a valid date (expected YYYY-MM-DD).")]
    InvalidDate { field: RangeField, value: String },
}

/// The range as currently typed into the inputs (empty string = unset)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn field(&self, field: RangeField) -> &str {
        match field {
            RangeField::Start => &self.start,
            RangeField::End => &self.end,
        }
    }

    pub fn field_mut(&mut self, field: RangeField) -> &mut String {
        match field {
            RangeField::Start => &mut self.start,
            RangeField::End => &mut self.end,
        }
    }
}

/// A range whose endpoints are both real calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ValidRange {
    /// Query parameters for the commissions endpoint
    pub fn query_params(&self) -> [(&'static str, String); 2] {
        [
            ("startDate", self.start.format(DATE_FORMAT).to_string()),
            ("endDate", self.end.format(DATE_FORMAT).to_string()),
        ]
    }
}

impl fmt::Display for ValidRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} .. {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

/// Check that both endpoints are present and parse as dates.
///
/// Ordering between `start` and `end` is left to the service.
pub fn validate(range: &DateRange) -> Result<ValidRange, ValidationError> {
    let start = range.start.trim();
    let end = range.end.trim();

    if start.is_empty() || end.is_empty() {
        return Err(ValidationError::MissingDate);
    }

    Ok(ValidRange {
        start: parse_date(RangeField::Start, start)?,
        end: parse_date(RangeField::End, end)?,
    })
}

fn parse_date(field: RangeField, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| ValidationError::InvalidDate {
        field,
        value: value.to_string(),
    })
}
