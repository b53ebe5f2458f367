//! Contact identifier value object
//!
//! # Examples
//!
//! ```
//! use domain::ContactId;
//!
//! let id = ContactId::from_raw("contacts-550e8400-e29b-41d4-a716-446655440000").unwrap();
//! assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{errors::DomainError, sanitize::clean_identifier};

/// Stable identifier of a contact, derived from its vCard UID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactId(Uuid);

impl ContactId {
    /// Create a contact ID from an existing UUID
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Clean a raw vCard UID and parse the remainder as a UUID
    pub fn from_raw(raw: &str) -> Result<Self, DomainError> {
        let cleaned = clean_identifier(raw);
        Uuid::parse_str(cleaned)
            .map(Self)
            .map_err(|_| DomainError::InvalidIdentifier(raw.to_string()))
    }

    /// Get the underlying UUID
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Event identifier for one year: the UUID's 128-bit value plus `year`
    ///
    /// The same contact and year always give the same identifier.
    pub fn for_year(&self, year: i32) -> Result<Uuid, DomainError> {
        self.0
            .as_u128()
            .checked_add_signed(i128::from(year))
            .map(Uuid::from_u128)
            .ok_or_else(|| DomainError::InvalidIdentifier(format!("{} + {year}", self.0)))
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ContactId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}
