//! Application configuration
//!
//! Split into focused sub-modules:
//! - `accounts`: primary and secondary WebDAV accounts
//!
//! Sources, lowest to highest priority: built-in defaults, the optional
//! `birthday-sync.toml` (or an explicit file), `BIRTHDAY_SYNC_*` environment
//! variables. Command line flags are applied on top by the binary.

mod accounts;

use std::path::Path;

use application::SyncOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub use accounts::{PrimaryAccountConfig, SecondaryAccountConfig};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "birthday-sync";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "BIRTHDAY_SYNC";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid setting {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

const fn default_true() -> bool {
    true
}

const fn default_years() -> u16 {
    application::DEFAULT_HORIZON_YEARS
}

fn default_contacts_path() -> String {
    "/".to_string()
}

const fn default_timeout() -> u64 {
    30
}

/// Pipeline settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncAppConfig {
    /// Number of years to materialize, starting with the current one
    #[serde(default = "default_years")]
    pub years: u16,

    /// Directory listed on each address book
    #[serde(default = "default_contacts_path")]
    pub contacts_path: String,

    /// Skip records that cannot become a contact instead of aborting
    #[serde(default)]
    pub skip_invalid_records: bool,

    /// Encode events but do not upload them
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for SyncAppConfig {
    fn default() -> Self {
        Self {
            years: default_years(),
            contacts_path: default_contacts_path(),
            skip_invalid_records: false,
            dry_run: false,
        }
    }
}

/// HTTP client settings shared by all WebDAV connections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpAppConfig {
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Verify TLS certificates (default: true)
    #[serde(default = "default_true")]
    pub verify_certs: bool,
}

impl Default for HttpAppConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            verify_certs: true,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Account holding the main address book and the calendar
    #[serde(default)]
    pub primary: PrimaryAccountConfig,

    /// Optional second address book
    #[serde(default)]
    pub secondary: SecondaryAccountConfig,

    #[serde(default)]
    pub sync: SyncAppConfig,

    #[serde(default)]
    pub http: HttpAppConfig,
}

impl AppConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// Without `path`, `birthday-sync.{toml,yaml,json}` is read from the
    /// working directory if it exists. An explicit `path` must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            // Start with defaults
            .set_default("sync.years", i64::from(default_years()))?
            .set_default("sync.contacts_path", default_contacts_path())?
            .set_default("sync.skip_invalid_records", false)?
            .set_default("sync.dry_run", false)?
            .set_default("http.timeout_secs", 30)?
            .set_default("http.verify_certs", true)?;

        builder = match path {
            Some(path) => {
                debug!(path = %path.display(), "Loading configuration file");
                builder.add_source(config::File::from(path).required(true))
            },
            None => builder.add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        // Override with environment variables (e.g., BIRTHDAY_SYNC_PRIMARY__USERNAME)
        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check that everything needed for a run is present
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("primary.contacts_url", &self.primary.contacts_url)?;
        check_url("primary.calendar_url", &self.primary.calendar_url)?;

        if self.primary.username.trim().is_empty() {
            return Err(ConfigError::Missing("primary.username"));
        }
        if self.primary.password_str().is_empty() {
            return Err(ConfigError::Missing("primary.password"));
        }

        if self.secondary.is_complete() {
            if let Some(url) = self.secondary.contacts_url.as_deref() {
                check_url("secondary.contacts_url", url)?;
            }
        } else if self.secondary.is_partial() {
            warn!("Secondary account is incomplete and will be ignored");
        }

        if self.sync.years == 0 {
            return Err(ConfigError::Invalid {
                field: "sync.years",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "http.timeout_secs",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Pipeline options for a run starting in `current_year`
    #[must_use]
    pub fn to_sync_options(&self, current_year: i32) -> SyncOptions {
        SyncOptions {
            current_year,
            years: self.sync.years,
            contacts_path: self.sync.contacts_path.clone(),
            skip_invalid_records: self.sync.skip_invalid_records,
            dry_run: self.sync.dry_run,
        }
    }
}

fn check_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::Missing(field));
    }
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("not an http(s) URL: {value}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use secrecy::SecretString;

    use super::*;

    fn valid() -> AppConfig {
        AppConfig {
            primary: PrimaryAccountConfig {
                contacts_url: "https://dav.example.com/contacts/".to_string(),
                calendar_url: "https://dav.example.com/birthdays/".to_string(),
                username: "klaus".to_string(),
                password: Some(SecretString::from("pw")),
            },
            ..AppConfig::default()
        }
    }

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.sync.years, 10);
        assert_eq!(config.sync.contacts_path, "/");
        assert!(!config.sync.skip_invalid_records);
        assert!(!config.sync.dry_run);
        assert_eq!(config.http.timeout_secs, 30);
        assert!(config.http.verify_certs);
    }

    #[test]
    fn load_from_file() {
        let file = write_toml(
            r#"
[primary]
contacts_url = "https://dav.example.com/contacts/"
calendar_url = "https://dav.example.com/birthdays/"
username = "klaus"
password = "pw"

[secondary]
contacts_url = "https://other.example.com/contacts/"
username = "maria"
password = "pw2"

[sync]
years = 3
skip_invalid_records = true

[http]
verify_certs = false
"#,
        );

        let config = AppConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.primary.username, "klaus");
        assert_eq!(config.primary.password_str(), "pw");
        assert!(config.secondary.is_complete());
        assert_eq!(config.sync.years, 3);
        assert!(config.sync.skip_invalid_records);
        assert_eq!(config.sync.contacts_path, "/");
        assert!(!config.http.verify_certs);
        assert_eq!(config.http.timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn validate_accepts_complete_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn validate_reports_missing_url() {
        let mut config = valid();
        config.primary.calendar_url = String::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing("primary.calendar_url"))
        ));
    }

    #[test]
    fn validate_rejects_non_http_url() {
        let mut config = valid();
        config.primary.contacts_url = "ftp://dav.example.com".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "primary.contacts_url",
                ..
            })
        ));
    }

    #[test]
    fn validate_reports_missing_credentials() {
        let mut config = valid();
        config.primary.password = None;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing("primary.password"))
        ));

        let mut config = valid();
        config.primary.username = " ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing("primary.username"))
        ));
    }

    #[test]
    fn validate_rejects_zero_years() {
        let mut config = valid();
        config.sync.years = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "sync.years",
                ..
            })
        ));
    }

    #[test]
    fn validate_ignores_partial_secondary() {
        let mut config = valid();
        config.secondary.username = Some("maria".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn sync_options_follow_config() {
        let mut config = valid();
        config.sync.dry_run = true;
        config.sync.years = 2;

        let options = config.to_sync_options(2030);
        assert_eq!(options.current_year, 2030);
        assert_eq!(options.years, 2);
        assert!(options.dry_run);
        assert_eq!(options.contacts_path, "/");
    }

    #[test]
    fn debug_does_not_leak_passwords() {
        let debug = format!("{:?}", valid());
        assert!(!debug.contains("\"pw\""));
        assert!(debug.contains("[REDACTED]"));
    }
}
