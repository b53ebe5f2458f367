//! Command line arguments

use std::path::PathBuf;

use clap::Parser;
use infrastructure::AppConfig;
use secrecy::SecretString;

/// Accepted range of `--year`
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

fn parse_secret(value: &str) -> Result<SecretString, std::convert::Infallible> {
    Ok(SecretString::from(value.to_string()))
}

/// Sync contact birthdays into a WebDAV calendar
#[derive(Parser)]
#[command(name = "birthday-sync")]
#[command(author, version, about = "Sync contact birthdays into a WebDAV calendar", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file (default: ./birthday-sync.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address book URL of the primary account
    #[arg(long, alias = "contacts_url", env = "WEBDAV_CONTACTS_URL")]
    pub contacts_url: Option<String>,

    /// Calendar URL the birthday events are written to
    #[arg(long, alias = "calendar_url", env = "WEBDAV_CALENDAR_URL")]
    pub calendar_url: Option<String>,

    /// Username of the primary account
    #[arg(short, long, env = "WEBDAV_USER")]
    pub user: Option<String>,

    /// Password of the primary account
    #[arg(short, long, env = "WEBDAV_PASSWORD", hide_env_values = true, value_parser = parse_secret)]
    pub password: Option<SecretString>,

    /// Address book URL of the secondary account
    #[arg(long, alias = "contacts_url2")]
    pub contacts_url2: Option<String>,

    /// Username of the secondary account
    #[arg(long)]
    pub user2: Option<String>,

    /// Password of the secondary account
    #[arg(long, value_parser = parse_secret)]
    pub password2: Option<SecretString>,

    /// First year to generate events for (default: the current year)
    #[arg(long, value_parser = clap::value_parser!(i32).range(i64::from(MIN_YEAR)..=i64::from(MAX_YEAR)))]
    pub year: Option<i32>,

    /// Number of years to generate
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub years: Option<u16>,

    /// Encode events without uploading them
    #[arg(long)]
    pub dry_run: bool,

    /// Log and skip contacts with unreadable birthdays or UIDs
    #[arg(long)]
    pub skip_invalid: bool,
}

impl std::fmt::Debug for Cli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cli")
            .field("verbose", &self.verbose)
            .field("config", &self.config)
            .field("contacts_url", &self.contacts_url)
            .field("calendar_url", &self.calendar_url)
            .field("user", &self.user)
            .field("contacts_url2", &self.contacts_url2)
            .field("user2", &self.user2)
            .field("year", &self.year)
            .field("years", &self.years)
            .field("dry_run", &self.dry_run)
            .field("skip_invalid", &self.skip_invalid)
            .finish_non_exhaustive()
    }
}

impl Cli {
    /// Override configuration values with the flags that were given
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(url) = &self.contacts_url {
            config.primary.contacts_url.clone_from(url);
        }
        if let Some(url) = &self.calendar_url {
            config.primary.calendar_url.clone_from(url);
        }
        if let Some(user) = &self.user {
            config.primary.username.clone_from(user);
        }
        if let Some(password) = &self.password {
            config.primary.password = Some(password.clone());
        }

        if let Some(url) = &self.contacts_url2 {
            config.secondary.contacts_url = Some(url.clone());
        }
        if let Some(user) = &self.user2 {
            config.secondary.username = Some(user.clone());
        }
        if let Some(password) = &self.password2 {
            config.secondary.password = Some(password.clone());
        }

        if let Some(years) = self.years {
            config.sync.years = years;
        }
        if self.dry_run {
            config.sync.dry_run = true;
        }
        if self.skip_invalid {
            config.sync.skip_invalid_records = true;
        }
    }
}
