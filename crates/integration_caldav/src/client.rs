//! CalDAV client
//!
//! Writes calendar objects into a calendar collection with plain `PUT`
//! requests. Writing an existing name replaces the stored object.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// CalDAV client errors
#[derive(Debug, Error)]
pub enum CalDavError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Calendar not found: {0}")]
    CalendarNotFound(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Request timed out")]
    Timeout,
}

/// CalDAV server configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct CalDavConfig {
    /// Calendar collection URL (e.g., <https://cal.example.com/calendars/anna/birthdays/>)
    pub server_url: String,
    /// Username
    pub username: String,
    /// Password (excluded from serialization to prevent leaks)
    #[serde(skip_serializing, default)]
    pub password: String,
    /// Verify TLS certificates (default: true)
    #[serde(default = "default_true")]
    pub verify_certs: bool,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for CalDavConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalDavConfig")
            .field("server_url", &self.server_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("verify_certs", &self.verify_certs)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

const fn default_true() -> bool {
    true
}

const fn default_timeout() -> u64 {
    30
}

/// CalDAV client trait
#[async_trait]
pub trait CalDavClient: Send + Sync {
    /// Store `body` as the calendar object `name`, creating or replacing it
    async fn put_object(&self, name: &str, body: Vec<u8>) -> Result<(), CalDavError>;
}

/// HTTP-based CalDAV client implementation
#[derive(Debug)]
pub struct HttpCalDavClient {
    client: Client,
    config: CalDavConfig,
}

impl HttpCalDavClient {
    /// Create a new CalDAV client
    pub fn new(config: CalDavConfig) -> Result<Self, CalDavError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(!config.verify_certs)
            .build()
            .map_err(|e| CalDavError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// URL of an object inside the calendar collection
    fn object_url(&self, name: &str) -> String {
        format!(
            "{}/{}",
            self.config.server_url.trim_end_matches('/'),
            name.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl CalDavClient for HttpCalDavClient {
    #[instrument(skip(self, body), fields(bytes = body.len()))]
    async fn put_object(&self, name: &str, body: Vec<u8>) -> Result<(), CalDavError> {
        let url = self.object_url(name);

        let response = self
            .client
            .put(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header("Content-Type", "text/calendar; charset=utf-8")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    return CalDavError::Timeout;
                }
                CalDavError::ConnectionFailed(e.to_string())
            })?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(CalDavError::AuthenticationFailed)
            },
            // A missing parent collection answers 404 or 409
            StatusCode::NOT_FOUND | StatusCode::CONFLICT => Err(CalDavError::CalendarNotFound(
                self.config.server_url.clone(),
            )),
            StatusCode::CREATED | StatusCode::NO_CONTENT | StatusCode::OK => {
                debug!(name = %name, "Calendar object stored");
                Ok(())
            },
            status => Err(CalDavError::RequestFailed(format!("HTTP {status}"))),
        }
    }
}
