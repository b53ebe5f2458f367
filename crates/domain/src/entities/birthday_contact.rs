//! Birthday contact entity - One person's birthday-reminder identity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    entities::BirthdayEvent,
    errors::DomainError,
    record::ContactRecord,
    sanitize::{capitalize_owner, clean_name, fix_parents},
    value_objects::{BirthDate, ContactId},
};

/// Average year length used for age rounding
const DAYS_PER_YEAR: f64 = 365.25;

/// A contact reduced to what a birthday reminder needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayContact {
    /// Account the contact was read from, first letter upper-cased
    pub owner: String,
    /// Sanitized display name, used as merge key
    pub name: String,
    /// Birthday; the year may be the unknown-year sentinel
    pub birth_date: BirthDate,
    /// Stable identifier derived from the vCard UID
    pub identifier: ContactId,
}

impl BirthdayContact {
    /// Create a contact from already-normalized parts
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        birth_date: BirthDate,
        identifier: ContactId,
    ) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            birth_date,
            identifier,
        }
    }

    /// Build a contact from a raw address book record
    ///
    /// # Errors
    ///
    /// - [`DomainError::MissingField`] when the birthday, name or UID is absent,
    ///   or the name is empty after sanitizing
    /// - [`DomainError::UnparseableDate`] for an unsupported birthday format
    /// - [`DomainError::InvalidIdentifier`] when the cleaned UID is not a UUID
    pub fn from_record(record: &dyn ContactRecord, owner: &str) -> Result<Self, DomainError> {
        let birthday = record.birthday().ok_or(DomainError::MissingField("BDAY"))?;
        let full_name = record.full_name().ok_or(DomainError::MissingField("FN"))?;
        let uid = record.uid().ok_or(DomainError::MissingField("UID"))?;

        let owner = capitalize_owner(owner);
        let name = fix_parents(&clean_name(full_name), &owner);
        if name.is_empty() {
            return Err(DomainError::MissingField("FN"));
        }

        Ok(Self {
            birth_date: BirthDate::parse(birthday)?,
            identifier: ContactId::from_raw(uid)?,
            owner,
            name,
        })
    }

    /// Age reached on `target`, or `None` when the birth year is unknown
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn age_in(&self, target: NaiveDate) -> Option<i64> {
        if !self.birth_date.has_known_year() {
            return None;
        }
        let days = (target - self.birth_date.date()).num_days();
        Some((days as f64 / DAYS_PER_YEAR).round() as i64)
    }

    /// Event identifier for `year`, stable across runs
    pub fn identifier_for_year(&self, year: i32) -> Result<Uuid, DomainError> {
        self.identifier.for_year(year)
    }

    /// German reminder text for the birthday falling on `target`
    ///
    /// The age is appended only when known and non-zero.
    pub fn summary_for(&self, target: NaiveDate) -> String {
        let mut summary = format!("{} hat Geburtstag", self.name);
        if let Some(age) = self.age_in(target).filter(|age| *age != 0) {
            summary.push_str(&format!(" ({age})"));
        }
        summary
    }

    /// The all-day reminder for this contact's birthday in `year`
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidCalendarDate`] when the birthday does not exist
    /// in `year` (February 29 in a common year).
    pub fn event_for_year(&self, year: i32) -> Result<BirthdayEvent, DomainError> {
        let date = self.birth_date.in_year(year)?;
        let uid = self.identifier_for_year(year)?;
        BirthdayEvent::all_day(uid, self.summary_for(date), date)
    }
}
