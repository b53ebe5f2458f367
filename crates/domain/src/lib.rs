//! Domain layer for birthday-sync
//!
//! Contains the contact model, birthday value objects, name sanitizing rules
//! and domain errors. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod record;
pub mod sanitize;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use record::ContactRecord;
pub use value_objects::*;
