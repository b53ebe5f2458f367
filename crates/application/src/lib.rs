//! Application layer - Use cases and orchestration
//!
//! Contains the contact merge policy, per-year event materialization and the
//! sync pipeline, plus the port definitions the infrastructure layer implements.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
