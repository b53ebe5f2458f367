//! Value Objects - Immutable, identity-less domain primitives

mod birth_date;
mod contact_id;

pub use birth_date::{BirthDate, UNKNOWN_YEAR};
pub use contact_id::ContactId;
