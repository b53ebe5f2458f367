//! Application-level errors

use domain::DomainError;
use thiserror::Error;

use crate::ports::{SinkError, SourceError};

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),
}

impl From<SourceError> for ApplicationError {
    fn from(error: SourceError) -> Self {
        Self::ExternalService(format!("contact source: {error}"))
    }
}

impl From<SinkError> for ApplicationError {
    fn from(error: SinkError) -> Self {
        Self::ExternalService(format!("calendar sink: {error}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_is_transparent() {
        let err: ApplicationError = DomainError::MissingField("FN").into();
        assert_eq!(err.to_string(), "Missing field: FN");
    }

    #[test]
    fn source_error_maps_to_external_service() {
        let err: ApplicationError = SourceError::AuthenticationFailed.into();
        assert!(matches!(err, ApplicationError::ExternalService(_)));
        assert_eq!(
            err.to_string(),
            "External service error: contact source: Authentication failed"
        );
    }

    #[test]
    fn sink_error_maps_to_external_service() {
        let err: ApplicationError = SinkError::OperationFailed("507".to_string()).into();
        assert_eq!(
            err.to_string(),
            "External service error: calendar sink: Operation failed: 507"
        );
    }
}
