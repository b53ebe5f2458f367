//! WebDAV contact source - Implements `ContactSourcePort` using `integration_carddav`

use application::ports::{ContactSourcePort, SourceError};
use async_trait::async_trait;
use integration_carddav::{CardDavClient, CardDavConfig, CardDavError, HttpCardDavClient};
use tracing::{debug, instrument};

/// Adapter for WebDAV address books (e.g., Baikal, Nextcloud).
///
/// Wraps a [`CardDavClient`] and translates its errors into
/// [`SourceError`].
pub struct WebDavContactSource {
    client: Box<dyn CardDavClient>,
    server_url: String,
}

impl std::fmt::Debug for WebDavContactSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebDavContactSource")
            .field("server_url", &self.server_url)
            .finish_non_exhaustive()
    }
}

impl WebDavContactSource {
    /// Create a new adapter from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: CardDavConfig) -> Result<Self, SourceError> {
        let server_url = config.server_url.clone();
        let client = HttpCardDavClient::new(config).map_err(Self::map_error)?;
        Ok(Self::with_client(Box::new(client), server_url))
    }

    /// Wrap an existing client
    pub fn with_client(client: Box<dyn CardDavClient>, server_url: impl Into<String>) -> Self {
        Self {
            client,
            server_url: server_url.into(),
        }
    }

    /// Map [`CardDavError`] to [`SourceError`].
    fn map_error(error: CardDavError) -> SourceError {
        match error {
            CardDavError::AuthenticationFailed => SourceError::AuthenticationFailed,
            CardDavError::ConnectionFailed(msg) => SourceError::ServiceUnavailable(msg),
            CardDavError::Timeout => SourceError::ServiceUnavailable("request timed out".into()),
            CardDavError::AddressBookNotFound(path) | CardDavError::FileNotFound(path) => {
                SourceError::NotFound(path)
            },
            CardDavError::ParseError(msg) => SourceError::InvalidData(msg),
            CardDavError::RequestFailed(msg) => SourceError::OperationFailed(msg),
        }
    }
}

#[async_trait]
impl ContactSourcePort for WebDavContactSource {
    #[instrument(skip(self), fields(server = %self.server_url))]
    async fn list(&self, path: &str) -> Result<Vec<String>, SourceError> {
        let files = self.client.list_files(path).await.map_err(Self::map_error)?;
        debug!(count = files.len(), "Listed address book");
        Ok(files)
    }

    #[instrument(skip(self), fields(server = %self.server_url))]
    async fn download(&self, path: &str) -> Result<Vec<u8>, SourceError> {
        self.client
            .download_file(path)
            .await
            .map_err(Self::map_error)
    }
}
