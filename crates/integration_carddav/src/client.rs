//! CardDAV client
//!
//! Reads an address book as a plain WebDAV collection: PROPFIND with
//! `Depth: 1` lists the `.vcf` files, GET downloads one of them.

use async_trait::async_trait;
use quick_xml::{Reader, events::Event};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// CardDAV client errors
#[derive(Debug, Error)]
pub enum CardDavError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Address book not found: {0}")]
    AddressBookNotFound(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Request timed out")]
    Timeout,
}

impl CardDavError {
    fn from_transport(e: &reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::ConnectionFailed(e.to_string())
        }
    }
}

/// CardDAV server configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct CardDavConfig {
    /// Address book URL (e.g., <https://dav.example.com/addressbooks/anna/contacts/>)
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

impl std::fmt::Debug for CardDavConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDavConfig")
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

/// CardDAV client trait for address book file access
#[async_trait]
pub trait CardDavClient: Send + Sync {
    /// List the names of the files directly inside `path`
    async fn list_files(&self, path: &str) -> Result<Vec<String>, CardDavError>;

    /// Download the raw content of one file
    async fn download_file(&self, path: &str) -> Result<Vec<u8>, CardDavError>;
}

/// HTTP-based CardDAV client implementation
#[derive(Debug)]
pub struct HttpCardDavClient {
    client: Client,
    config: CardDavConfig,
}

const PROPFIND_BODY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<D:propfind xmlns:D="DAV:">
  <D:prop>
    <D:resourcetype/>
    <D:getcontenttype/>
  </D:prop>
</D:propfind>"#;

impl HttpCardDavClient {
    /// Create a new CardDAV client
    pub fn new(config: CardDavConfig) -> Result<Self, CardDavError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(!config.verify_certs)
            .build()
            .map_err(|e| CardDavError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Build a request with proper authentication
    fn build_request(&self, method: &str, url: &str) -> reqwest::RequestBuilder {
        let method =
            reqwest::Method::from_bytes(method.as_bytes()).unwrap_or(reqwest::Method::GET);

        self.client
            .request(method, url)
            .basic_auth(&self.config.username, Some(&self.config.password))
    }

    /// Resolve a path below the configured address book URL
    fn file_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            return path.to_string();
        }
        let base = self.config.server_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            format!("{base}/")
        } else {
            format!("{base}/{path}")
        }
    }

    /// Extract every `href` from a multistatus response
    fn extract_hrefs(xml_body: &str) -> Result<Vec<String>, CardDavError> {
        let mut reader = Reader::from_str(xml_body);
        reader.config_mut().trim_text(true);

        let mut hrefs = Vec::new();
        let mut buf = Vec::new();
        let mut inside_href = false;
        let mut current_href = String::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    if e.local_name().as_ref() == b"href" {
                        inside_href = true;
                        current_href.clear();
                    }
                },
                Ok(Event::Text(e)) => {
                    if inside_href {
                        if let Ok(text) = e.unescape() {
                            current_href.push_str(&text);
                        }
                    }
                },
                Ok(Event::End(e)) => {
                    if e.local_name().as_ref() == b"href" {
                        inside_href = false;
                        if !current_href.is_empty() {
                            hrefs.push(current_href.clone());
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    debug!(error = ?e, "XML parsing error in PROPFIND response");
                    return Err(CardDavError::ParseError(e.to_string()));
                },
                _ => {},
            }
            buf.clear();
        }

        Ok(hrefs)
    }

    fn check_status(
        status: StatusCode,
        path: &str,
        not_found: fn(String) -> CardDavError,
    ) -> Result<(), CardDavError> {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(CardDavError::AuthenticationFailed)
            },
            StatusCode::NOT_FOUND => Err(not_found(path.to_string())),
            status if status.is_server_error() => Err(CardDavError::RequestFailed(format!(
                "Server error: {status}"
            ))),
            status if !status.is_success() => Err(CardDavError::RequestFailed(format!(
                "Unexpected status: {status}"
            ))),
            _ => Ok(()),
        }
    }
}

/// File name of a member href, `None` for collections
///
/// ```
/// use integration_carddav::client::file_name_of;
///
/// assert_eq!(file_name_of("/dav/anna/contacts/abc.vcf"), Some("abc.vcf"));
/// assert_eq!(file_name_of("/dav/anna/contacts/"), None);
/// ```
pub fn file_name_of(href: &str) -> Option<&str> {
    if href.ends_with('/') {
        return None;
    }
    href.rsplit('/').next().filter(|name| !name.is_empty())
}

#[async_trait]
impl CardDavClient for HttpCardDavClient {
    #[instrument(skip(self), fields(server = %self.config.server_url))]
    async fn list_files(&self, path: &str) -> Result<Vec<String>, CardDavError> {
        let url = self.file_url(path);

        let response = self
            .build_request("PROPFIND", &url)
            .header("Depth", "1")
            .header("Content-Type", "application/xml; charset=utf-8")
            .body(PROPFIND_BODY)
            .send()
            .await
            .map_err(|e| CardDavError::from_transport(&e))?;

        Self::check_status(response.status(), path, CardDavError::AddressBookNotFound)?;

        let body = response
            .text()
            .await
            .map_err(|e| CardDavError::RequestFailed(e.to_string()))?;

        debug!(body_length = body.len(), "Received PROPFIND response");

        let files: Vec<String> = Self::extract_hrefs(&body)?
            .iter()
            .filter_map(|href| file_name_of(href))
            .map(str::to_string)
            .collect();

        if files.is_empty() {
            warn!(path = %path, "Address book is empty");
        }

        Ok(files)
    }

    #[instrument(skip(self), fields(server = %self.config.server_url))]
    async fn download_file(&self, path: &str) -> Result<Vec<u8>, CardDavError> {
        let url = self.file_url(path);

        let response = self
            .build_request("GET", &url)
            .header("Accept", "text/vcard")
            .send()
            .await
            .map_err(|e| CardDavError::from_transport(&e))?;

        Self::check_status(response.status(), path, CardDavError::FileNotFound)?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CardDavError::RequestFailed(e.to_string()))?;

        debug!(bytes = bytes.len(), "Downloaded file");
        Ok(bytes.to_vec())
    }
}
