//! Application services

pub mod birthday_sync_service;
pub mod contact_merger;
pub mod event_materializer;

pub use birthday_sync_service::{BirthdaySyncService, ContactSource, SyncOptions, SyncReport};
pub use contact_merger::{ContactMerger, should_replace};
pub use event_materializer::{DEFAULT_HORIZON_YEARS, EventMaterializer};
