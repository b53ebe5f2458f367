//! Birth date value object
//!
//! # Examples
//!
//! ```
//! use domain::BirthDate;
//!
//! let known = BirthDate::parse("1990-05-01").unwrap();
//! assert!(known.has_known_year());
//!
//! let yearless = BirthDate::parse("--0501").unwrap();
//! assert!(!yearless.has_known_year());
//! ```

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Years at or below this value mean "day and month known, year unknown"
pub const UNKNOWN_YEAR: i32 = 1900;

/// Formats with an explicit year, tried in order
const DATED_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y%m%d"];

/// Marker vCard uses for a birthday without a year (`--MMDD`)
const NO_YEAR_MARKER: &str = "--";

/// A birthday as read from an address book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    /// Wrap an existing date
    pub const fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse a vCard `BDAY` value
    ///
    /// Accepts `YYYY-MM-DD`, `YYYYMMDD` and `--MMDD`, in that order. The
    /// yearless form is stored with year [`UNKNOWN_YEAR`].
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        for format in DATED_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(value, format) {
                return Ok(Self(date));
            }
        }

        value
            .strip_prefix(NO_YEAR_MARKER)
            .and_then(|month_day| {
                NaiveDate::parse_from_str(&format!("{UNKNOWN_YEAR:04}{month_day}"), "%Y%m%d").ok()
            })
            .map(Self)
            .ok_or_else(|| DomainError::UnparseableDate(value.to_string()))
    }

    /// The underlying date (year may be the unknown-year sentinel)
    pub const fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Whether the year carries information
    pub fn has_known_year(&self) -> bool {
        self.year() > UNKNOWN_YEAR
    }

    /// The same month and day in another year
    ///
    /// Fails for February 29 in a non-leap year.
    pub fn in_year(&self, year: i32) -> Result<NaiveDate, DomainError> {
        NaiveDate::from_ymd_opt(year, self.month(), self.day())
            .ok_or_else(|| DomainError::invalid_calendar_date(year, self.month(), self.day()))
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_known_year() {
            write!(f, "{}", self.0.format("%Y-%m-%d"))
        } else {
            write!(f, "{}", self.0.format("--%m-%d"))
        }
    }
}

impl From<NaiveDate> for BirthDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}
