//! Closed date interval attached to an uploaded file.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::AppError;

/// Wire format of dates exchanged with the backend.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Message shown when the interval is reversed.
pub const REVERSED_RANGE_MESSAGE: &str = "Start date must be before end date";

/// Earliest date the console accepts.
pub fn min_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Latest date the console accepts.
pub fn max_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2099, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// The period a file's data covers, `[start, end]` inclusive.
///
/// A `DateRange` always satisfies `start <= end` and lies within
/// 2000-01-01..=2099-12-31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting reversed or out-of-bounds intervals.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AppError> {
        if start > end {
            return Err(AppError::validation(REVERSED_RANGE_MESSAGE));
        }
        let (lo, hi) = (min_date(), max_date());
        if start < lo || end > hi {
            return Err(AppError::validation(format!(
                "Dates must fall between {} and {}",
                lo.format(DATE_FORMAT),
                hi.format(DATE_FORMAT)
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days covered, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// `(start, end)` formatted as `yyyy-MM-dd`.
    pub fn to_wire(&self) -> (String, String) {
        (
            self.start.format(DATE_FORMAT).to_string(),
            self.end.format(DATE_FORMAT).to_string(),
        )
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%b %-d, %Y"),
            self.end.format("%b %-d, %Y")
        )
    }
}

/// Parse a `yyyy-MM-dd` date, reporting a validation error on bad input.
pub fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        AppError::validation(format!("Invalid date '{value}', expected YYYY-MM-DD"))
    })
}
