//! Calendar sink port
//!
//! A remote calendar collection that accepts one iCalendar object per file.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Calendar sink errors
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Calendar unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Calendar not found: {0}")]
    CalendarNotFound(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Write access to a remote calendar collection
///
/// Uploading to an existing path replaces the object, which makes repeated
/// runs idempotent.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CalendarSinkPort: Send + Sync {
    /// Store `body` at `remote_path`, relative to the calendar collection
    async fn upload(&self, remote_path: &str, body: Vec<u8>) -> Result<(), SinkError>;
}
