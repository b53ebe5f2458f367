//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer on top of the WebDAV
//! integration crates, and provides configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, ConfigError, HttpAppConfig, PrimaryAccountConfig, SecondaryAccountConfig,
    SyncAppConfig,
};
pub use telemetry::{init_logging, log_filter_from_verbosity};
