//! WebDAV account configuration

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::HttpAppConfig;

// ==============================
// Primary account
// ==============================

/// The mandatory account: address book plus the target calendar
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct PrimaryAccountConfig {
    /// Address book collection URL
    #[serde(default)]
    pub contacts_url: String,

    /// Calendar collection URL the events are written to
    #[serde(default)]
    pub calendar_url: String,

    /// Username for authentication, also the owner label of its contacts
    #[serde(default)]
    pub username: String,

    /// Password for authentication (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub password: Option<SecretString>,
}

impl std::fmt::Debug for PrimaryAccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrimaryAccountConfig")
            .field("contacts_url", &self.contacts_url)
            .field("calendar_url", &self.calendar_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl PrimaryAccountConfig {
    /// Get the password as a string reference (empty when unset)
    #[must_use]
    pub fn password_str(&self) -> &str {
        self.password
            .as_ref()
            .map_or("", |p| p.expose_secret())
    }

    /// Convert to `integration_carddav`'s `CardDavConfig`
    #[must_use]
    pub fn to_carddav_config(&self, http: &HttpAppConfig) -> integration_carddav::CardDavConfig {
        integration_carddav::CardDavConfig {
            server_url: self.contacts_url.clone(),
            username: self.username.clone(),
            password: self.password_str().to_string(),
            verify_certs: http.verify_certs,
            timeout_secs: http.timeout_secs,
        }
    }

    /// Convert to `integration_caldav`'s `CalDavConfig`
    #[must_use]
    pub fn to_caldav_config(&self, http: &HttpAppConfig) -> integration_caldav::CalDavConfig {
        integration_caldav::CalDavConfig {
            server_url: self.calendar_url.clone(),
            username: self.username.clone(),
            password: self.password_str().to_string(),
            verify_certs: http.verify_certs,
            timeout_secs: http.timeout_secs,
        }
    }
}

// ==============================
// Secondary account
// ==============================

/// An optional second address book
///
/// Only used when URL, username and password are all present and non-empty.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct SecondaryAccountConfig {
    #[serde(default)]
    pub contacts_url: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default, skip_serializing)]
    pub password: Option<SecretString>,
}

impl std::fmt::Debug for SecondaryAccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecondaryAccountConfig")
            .field("contacts_url", &self.contacts_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl SecondaryAccountConfig {
    /// All three values are present
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.username().is_some()
            && non_empty(self.contacts_url.as_deref()).is_some()
            && non_empty(self.password.as_ref().map(|p| p.expose_secret())).is_some()
    }

    /// Some but not all values are present
    #[must_use]
    pub fn is_partial(&self) -> bool {
        let set = [
            non_empty(self.contacts_url.as_deref()).is_some(),
            self.username().is_some(),
            non_empty(self.password.as_ref().map(|p| p.expose_secret())).is_some(),
        ];
        set.iter().any(|s| *s) && !set.iter().all(|s| *s)
    }

    /// Owner label of this account's contacts
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        non_empty(self.username.as_deref())
    }

    /// Convert to `integration_carddav`'s `CardDavConfig`, `None` unless complete
    #[must_use]
    pub fn to_carddav_config(
        &self,
        http: &HttpAppConfig,
    ) -> Option<integration_carddav::CardDavConfig> {
        if !self.is_complete() {
            return None;
        }
        Some(integration_carddav::CardDavConfig {
            server_url: self.contacts_url.clone().unwrap_or_default(),
            username: self.username.clone().unwrap_or_default(),
            password: self
                .password
                .as_ref()
                .map(|p| p.expose_secret().to_string())
                .unwrap_or_default(),
            verify_certs: http.verify_certs,
            timeout_secs: http.timeout_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primary() -> PrimaryAccountConfig {
        PrimaryAccountConfig {
            contacts_url: "https://dav.example.com/contacts/".to_string(),
            calendar_url: "https://dav.example.com/birthdays/".to_string(),
            username: "klaus".to_string(),
            password: Some(SecretString::from("s3cret")),
        }
    }

    fn secondary(url: Option<&str>, user: Option<&str>, pass: Option<&str>) -> SecondaryAccountConfig {
        SecondaryAccountConfig {
            contacts_url: url.map(str::to_string),
            username: user.map(str::to_string),
            password: pass.map(SecretString::from),
        }
    }

    #[test]
    fn primary_debug_redacts_password() {
        let debug = format!("{:?}", primary());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("s3cret"));
    }

    #[test]
    fn primary_converts_to_client_configs() {
        let http = HttpAppConfig::default();
        let carddav = primary().to_carddav_config(&http);
        let caldav = primary().to_caldav_config(&http);

        assert_eq!(carddav.server_url, "https://dav.example.com/contacts/");
        assert_eq!(carddav.password, "s3cret");
        assert_eq!(caldav.server_url, "https://dav.example.com/birthdays/");
        assert_eq!(caldav.username, "klaus");
        assert_eq!(caldav.timeout_secs, 30);
    }

    #[test]
    fn primary_serialization_excludes_password() {
        let json = serde_json::to_string(&primary()).unwrap();
        assert!(!json.contains("s3cret"));
    }

    #[test]
    fn secondary_requires_all_values() {
        let http = HttpAppConfig::default();

        let complete = secondary(Some("https://b.example.com"), Some("maria"), Some("pw"));
        assert!(complete.is_complete());
        assert!(!complete.is_partial());
        assert_eq!(
            complete.to_carddav_config(&http).unwrap().username,
            "maria"
        );

        let partial = secondary(Some("https://b.example.com"), Some("maria"), None);
        assert!(!partial.is_complete());
        assert!(partial.is_partial());
        assert!(partial.to_carddav_config(&http).is_none());
    }

    #[test]
    fn secondary_empty_values_count_as_missing() {
        let empty = secondary(Some(""), Some("maria"), Some("pw"));
        assert!(!empty.is_complete());

        let unset = SecondaryAccountConfig::default();
        assert!(!unset.is_complete());
        assert!(!unset.is_partial());
    }

    #[test]
    fn secondary_debug_redacts_password() {
        let debug = format!("{:?}", secondary(None, Some("maria"), Some("pw-9876")));
        assert!(!debug.contains("pw-9876"));
    }
}
