//! Birthday sync service
//!
//! Reads contacts from up to two address books, merges them by name and
//! uploads one all-day reminder per contact and year to the calendar.

use std::{fmt, sync::Arc};

use domain::{BirthdayContact, BirthdayEvent, DomainError};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{
        CalendarSinkPort, ContactDecoderPort, ContactSourcePort, DecodedRecord, EventEncoderPort,
        SourceError,
    },
    services::{ContactMerger, DEFAULT_HORIZON_YEARS, EventMaterializer},
};

const VCARD_SUFFIX: &str = ".vcf";

/// An address book together with the account label that owns it
pub struct ContactSource {
    /// Account label, used to disambiguate "Mama"/"Papa"
    pub owner: String,
    pub port: Arc<dyn ContactSourcePort>,
}

impl ContactSource {
    pub fn new(owner: impl Into<String>, port: Arc<dyn ContactSourcePort>) -> Self {
        Self {
            owner: owner.into(),
            port,
        }
    }
}

impl fmt::Debug for ContactSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactSource")
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

/// Per-run settings of the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// First year of the horizon
    pub current_year: i32,
    /// Number of years to materialize
    pub years: u16,
    /// Directory listed on each contact source
    pub contacts_path: String,
    /// Log and skip records that cannot become a contact instead of aborting
    pub skip_invalid_records: bool,
    /// Encode events but do not upload them
    pub dry_run: bool,
}

impl SyncOptions {
    pub fn for_year(current_year: i32) -> Self {
        Self {
            current_year,
            years: DEFAULT_HORIZON_YEARS,
            contacts_path: "/".to_string(),
            skip_invalid_records: false,
            dry_run: false,
        }
    }
}

/// Counters collected during one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Contacts built from the primary source
    pub primary_contacts: usize,
    /// Contacts built from the secondary source
    pub secondary_contacts: usize,
    /// Records without a birthday
    pub records_without_birthday: usize,
    /// Records dropped because they could not become a contact
    pub records_skipped: usize,
    /// Names seen in more than one record
    pub duplicate_names: usize,
    /// Distinct contacts after merging
    pub merged_contacts: usize,
    /// Events written to the calendar (or encoded, on a dry run)
    pub events_uploaded: usize,
    /// Years skipped because the birthday does not exist in them
    pub dates_skipped: usize,
}

/// The sync pipeline
pub struct BirthdaySyncService {
    primary: ContactSource,
    secondary: Option<ContactSource>,
    decoder: Arc<dyn ContactDecoderPort>,
    encoder: Arc<dyn EventEncoderPort>,
    sink: Arc<dyn CalendarSinkPort>,
    options: SyncOptions,
}

impl fmt::Debug for BirthdaySyncService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BirthdaySyncService")
            .field("primary", &self.primary)
            .field("secondary", &self.secondary)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl BirthdaySyncService {
    pub fn new(
        primary: ContactSource,
        decoder: Arc<dyn ContactDecoderPort>,
        encoder: Arc<dyn EventEncoderPort>,
        sink: Arc<dyn CalendarSinkPort>,
        options: SyncOptions,
    ) -> Self {
        Self {
            primary,
            secondary: None,
            decoder,
            encoder,
            sink,
            options,
        }
    }

    /// Add a second address book, merged after the primary one
    #[must_use]
    pub fn with_secondary(mut self, secondary: ContactSource) -> Self {
        self.secondary = Some(secondary);
        self
    }

    /// Run the whole pipeline once
    ///
    /// Transport failures and invalid records (unless skipping is enabled)
    /// abort the run. A contact whose event identifier cannot be derived
    /// counts as an invalid record. Birthdays that do not exist in a given
    /// year are logged and skipped.
    #[instrument(skip(self), fields(year = self.options.current_year, years = self.options.years))]
    pub async fn run(&self) -> Result<SyncReport, ApplicationError> {
        let mut report = SyncReport::default();
        let mut merger = ContactMerger::new();

        let primary = self.read_contacts(&self.primary, &mut report).await?;
        report.primary_contacts = primary.len();
        report.duplicate_names += merger.merge(primary);

        if let Some(secondary) = &self.secondary {
            let contacts = self.read_contacts(secondary, &mut report).await?;
            report.secondary_contacts = contacts.len();
            report.duplicate_names += merger.merge(contacts);
        }

        report.merged_contacts = merger.len();
        if merger.is_empty() {
            info!("No contacts with a birthday found");
        } else {
            info!(contacts = merger.len(), "Merged contacts");
        }

        let materializer = EventMaterializer::new(self.options.years);
        for contact in merger.contacts() {
            for outcome in materializer.materialize(contact, self.options.current_year) {
                match outcome {
                    Ok(event) => {
                        self.publish(&event).await?;
                        report.events_uploaded += 1;
                    },
                    Err(e) if e.is_per_year() => {
                        warn!(name = %contact.name, birthday = %contact.birth_date, error = %e, "Skipping birthday");
                        report.dates_skipped += 1;
                    },
                    Err(e) if self.options.skip_invalid_records => {
                        warn!(name = %contact.name, error = %e, "Skipping invalid contact");
                        report.records_skipped += 1;
                        break;
                    },
                    Err(e) => return Err(e.into()),
                }
            }
        }

        info!(
            uploaded = report.events_uploaded,
            skipped = report.dates_skipped,
            dry_run = self.options.dry_run,
            "Birthday sync finished"
        );
        Ok(report)
    }

    /// Download and decode every vCard file of `source`
    #[instrument(skip(self, source, report), fields(owner = %source.owner))]
    async fn read_contacts(
        &self,
        source: &ContactSource,
        report: &mut SyncReport,
    ) -> Result<Vec<BirthdayContact>, ApplicationError> {
        let files = source.port.list(&self.options.contacts_path).await?;
        let mut records: Vec<DecodedRecord> = Vec::new();

        for file in files.iter().filter(|f| f.ends_with(VCARD_SUFFIX)) {
            let path = join_path(&self.options.contacts_path, file);
            let bytes = source.port.download(&path).await?;
            let text = String::from_utf8(bytes)
                .map_err(|e| SourceError::InvalidData(format!("{path}: {e}")))?;
            let decoded = self.decoder.decode(&text)?;
            debug!(file = %path, records = decoded.len(), "Decoded vCard file");
            records.extend(decoded);
        }

        let contacts = self.build_contacts(&records, &source.owner, report)?;
        info!(
            files = files.len(),
            records = records.len(),
            contacts = contacts.len(),
            "Read contacts"
        );
        Ok(contacts)
    }

    /// Turn records into contacts, dropping those without a birthday
    fn build_contacts(
        &self,
        records: &[DecodedRecord],
        owner: &str,
        report: &mut SyncReport,
    ) -> Result<Vec<BirthdayContact>, DomainError> {
        let mut contacts = Vec::with_capacity(records.len());

        for record in records {
            if record.birthday().is_none() {
                report.records_without_birthday += 1;
                continue;
            }

            match BirthdayContact::from_record(record.as_ref(), owner) {
                Ok(contact) => contacts.push(contact),
                Err(e) if self.options.skip_invalid_records => {
                    warn!(
                        name = record.full_name().unwrap_or_default(),
                        error = %e,
                        "Skipping invalid contact"
                    );
                    report.records_skipped += 1;
                },
                Err(e) => return Err(e),
            }
        }

        Ok(contacts)
    }

    /// Encode one event and upload it under its UID
    async fn publish(&self, event: &BirthdayEvent) -> Result<(), ApplicationError> {
        let body = self.encoder.encode(event);
        let remote_path = event.file_name();

        if self.options.dry_run {
            debug!(path = %remote_path, summary = %event.summary, body = %body, "Dry run, not uploading");
            return Ok(());
        }

        debug!(path = %remote_path, summary = %event.summary, "Uploading event");
        self.sink.upload(&remote_path, body.into_bytes()).await?;
        Ok(())
    }
}

/// Join a directory and a file name with exactly one slash
fn join_path(dir: &str, file: &str) -> String {
    format!(
        "{}/{}",
        dir.trim_end_matches('/'),
        file.trim_start_matches('/')
    )
}
