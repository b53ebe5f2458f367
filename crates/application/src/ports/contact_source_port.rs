//! Contact source port
//!
//! A remote file store holding vCard files (WebDAV address book).

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Contact source errors
#[derive(Debug, Error)]
pub enum SourceError {
    /// The remote store could not be reached
    #[error("Contact source unavailable: {0}")]
    ServiceUnavailable(String),

    /// Credentials were rejected
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Path does not exist on the remote store
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other failed request
    #[error("Operation failed: {0}")]
    OperationFailed(String),

    /// Downloaded data could not be read
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Read-only access to a remote contact store
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ContactSourcePort: Send + Sync {
    /// List file names directly below `path`
    async fn list(&self, path: &str) -> Result<Vec<String>, SourceError>;

    /// Download the raw bytes of one file
    async fn download(&self, path: &str) -> Result<Vec<u8>, SourceError>;
}
