//! Contact merger
//!
//! Deduplicates contacts from several address books by sanitized name.

use std::collections::BTreeMap;

use domain::BirthdayContact;
use tracing::{debug, warn};

/// Name -> contact mapping built from one or more sources
#[derive(Debug, Default, Clone)]
pub struct ContactMerger {
    contacts: BTreeMap<String, BirthdayContact>,
}

impl ContactMerger {
    /// Create an empty merger
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `incoming` into the mapping
    ///
    /// Unseen names are inserted. For a name that is already present with a
    /// different birth date, the incoming contact replaces the existing one
    /// only if it knows the birth year and the existing one does not.
    ///
    /// Returns the number of names that were already present.
    pub fn merge(&mut self, incoming: impl IntoIterator<Item = BirthdayContact>) -> usize {
        let mut duplicates = 0;

        for contact in incoming {
            let Some(existing) = self.contacts.get_mut(&contact.name) else {
                self.contacts.insert(contact.name.clone(), contact);
                continue;
            };

            duplicates += 1;
            if existing.birth_date == contact.birth_date {
                debug!(name = %contact.name, "Contact found in multiple sources");
                continue;
            }

            warn!(
                name = %contact.name,
                existing = %existing.birth_date,
                incoming = %contact.birth_date,
                "Contact found in multiple sources with different birthdays"
            );
            if should_replace(existing, &contact) {
                *existing = contact;
            }
        }

        duplicates
    }

    /// Number of distinct contacts
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Look up a contact by sanitized name
    pub fn get(&self, name: &str) -> Option<&BirthdayContact> {
        self.contacts.get(name)
    }

    /// Contacts ordered by name
    pub fn contacts(&self) -> impl Iterator<Item = &BirthdayContact> {
        self.contacts.values()
    }
}

/// Whether `incoming` should take the place of `existing` for the same name
pub fn should_replace(existing: &BirthdayContact, incoming: &BirthdayContact) -> bool {
    existing.birth_date != incoming.birth_date
        && incoming.birth_date.has_known_year()
        && !existing.birth_date.has_known_year()
}
