//! Event materializer
//!
//! Expands a contact into one all-day event per year of the sync horizon.

use domain::{BirthdayContact, BirthdayEvent, DomainError};

/// Number of years covered by a sync run, starting with the current year
pub const DEFAULT_HORIZON_YEARS: u16 = 10;

/// Produces per-year events for a fixed horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventMaterializer {
    years: u16,
}

impl Default for EventMaterializer {
    fn default() -> Self {
        Self::new(DEFAULT_HORIZON_YEARS)
    }
}

impl EventMaterializer {
    pub const fn new(years: u16) -> Self {
        Self { years }
    }

    pub const fn years(&self) -> u16 {
        self.years
    }

    /// One outcome per year in `[current_year, current_year + years)`
    ///
    /// A year in which the birthday does not exist, or that lies outside
    /// the `i32` range, yields [`DomainError::InvalidCalendarDate`]; the
    /// other years are unaffected.
    pub fn materialize<'a>(
        &self,
        contact: &'a BirthdayContact,
        current_year: i32,
    ) -> impl Iterator<Item = Result<BirthdayEvent, DomainError>> + use<'a> {
        (0..i32::from(self.years)).map(move |offset| {
            let year = current_year.checked_add(offset).ok_or_else(|| {
                DomainError::invalid_calendar_date(
                    current_year,
                    contact.birth_date.month(),
                    contact.birth_date.day(),
                )
            })?;
            contact.event_for_year(year)
        })
    }
}
