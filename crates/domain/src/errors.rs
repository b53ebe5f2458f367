//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Birthday string matched none of the supported formats
    #[error("Could not parse date: {0}")]
    UnparseableDate(String),

    /// A required contact field is absent or empty
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// Contact UID is not a valid UUID after cleaning
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Month/day do not exist in the requested year
    #[error("Invalid calendar date: {year:04}-{month:02}-{day:02}")]
    InvalidCalendarDate { year: i32, month: u32, day: u32 },
}

impl DomainError {
    /// Create an invalid calendar date error
    pub const fn invalid_calendar_date(year: i32, month: u32, day: u32) -> Self {
        Self::InvalidCalendarDate { year, month, day }
    }

    /// Whether the error only affects a single year of a contact
    pub const fn is_per_year(&self) -> bool {
        matches!(self, Self::InvalidCalendarDate { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparseable_date_message() {
        let err = DomainError::UnparseableDate("31.12.".to_string());
        assert_eq!(err.to_string(), "Could not parse date: 31.12.");
    }

    #[test]
    fn missing_field_message() {
        let err = DomainError::MissingField("BDAY");
        assert_eq!(err.to_string(), "Missing field: BDAY");
    }

    #[test]
    fn invalid_identifier_message() {
        let err = DomainError::InvalidIdentifier("not-a-uuid".to_string());
        assert_eq!(err.to_string(), "Invalid identifier: not-a-uuid");
    }

    #[test]
    fn invalid_calendar_date_is_zero_padded() {
        let err = DomainError::invalid_calendar_date(2027, 2, 29);
        assert_eq!(err.to_string(), "Invalid calendar date: 2027-02-29");
    }

    #[test]
    fn only_calendar_date_errors_are_per_year() {
        assert!(DomainError::invalid_calendar_date(2027, 2, 29).is_per_year());
        assert!(!DomainError::MissingField("FN").is_per_year());
        assert!(!DomainError::UnparseableDate(String::new()).is_per_year());
    }
}
