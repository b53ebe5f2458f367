//! Birthday event - A single all-day calendar reminder

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

/// One year's birthday reminder, ready to be encoded and uploaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayEvent {
    /// Per-year stable event UID
    pub uid: Uuid,
    /// Reminder text
    pub summary: String,
    /// First day (inclusive)
    pub start: NaiveDate,
    /// Day after the birthday (exclusive end)
    pub end: NaiveDate,
}

impl BirthdayEvent {
    /// Create an event covering exactly `date`
    pub fn all_day(
        uid: Uuid,
        summary: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Self, DomainError> {
        use chrono::Datelike;

        let end = date.succ_opt().ok_or_else(|| {
            DomainError::invalid_calendar_date(date.year() + 1, date.month(), date.day())
        })?;
        Ok(Self {
            uid,
            summary: summary.into(),
            start: date,
            end,
        })
    }

    /// Remote object name in the calendar collection
    pub fn file_name(&self) -> String {
        format!("{}.ics", self.uid)
    }
}
