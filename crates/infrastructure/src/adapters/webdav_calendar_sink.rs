//! WebDAV calendar sink - Implements `CalendarSinkPort` using `integration_caldav`

use application::ports::{CalendarSinkPort, SinkError};
use async_trait::async_trait;
use integration_caldav::{CalDavClient, CalDavConfig, CalDavError, HttpCalDavClient};
use tracing::instrument;

/// Adapter for WebDAV calendars
pub struct WebDavCalendarSink {
    client: Box<dyn CalDavClient>,
    server_url: String,
}

impl std::fmt::Debug for WebDavCalendarSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebDavCalendarSink")
            .field("server_url", &self.server_url)
            .finish_non_exhaustive()
    }
}

impl WebDavCalendarSink {
    pub fn new(config: CalDavConfig) -> Result<Self, SinkError> {
        let server_url = config.server_url.clone();
        let client = HttpCalDavClient::new(config).map_err(Self::map_error)?;
        Ok(Self::with_client(Box::new(client), server_url))
    }

    pub fn with_client(client: Box<dyn CalDavClient>, server_url: impl Into<String>) -> Self {
        Self {
            client,
            server_url: server_url.into(),
        }
    }

    fn map_error(error: CalDavError) -> SinkError {
        match error {
            CalDavError::AuthenticationFailed => SinkError::AuthenticationFailed,
            CalDavError::ConnectionFailed(msg) => SinkError::ServiceUnavailable(msg),
            CalDavError::Timeout => SinkError::ServiceUnavailable("request timed out".into()),
            CalDavError::CalendarNotFound(url) => SinkError::CalendarNotFound(url),
            CalDavError::RequestFailed(msg) => SinkError::OperationFailed(msg),
        }
    }
}

#[async_trait]
impl CalendarSinkPort for WebDavCalendarSink {
    #[instrument(skip(self, body), fields(server = %self.server_url))]
    async fn upload(&self, remote_path: &str, body: Vec<u8>) -> Result<(), SinkError> {
        self.client
            .put_object(remote_path, body)
            .await
            .map_err(Self::map_error)
    }
}
