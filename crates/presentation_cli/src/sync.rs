//! Wiring of configuration, adapters and the sync service

use std::sync::Arc;

use anyhow::Context;
use application::{BirthdaySyncService, ContactSource, SyncReport};
use chrono::Datelike;
use infrastructure::{
    AppConfig, IcsEventEncoder, VCardDecoder, WebDavCalendarSink, WebDavContactSource,
};
use tracing::{debug, info};

use crate::cli::Cli;

/// Load the configuration and apply the command line on top of it
pub fn resolve_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config =
        AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply_to(&mut config);
    config.validate().context("invalid configuration")?;
    debug!(config = ?config, "Resolved configuration");
    Ok(config)
}

/// Build the pipeline for `config`
pub fn build_service(config: &AppConfig, current_year: i32) -> anyhow::Result<BirthdaySyncService> {
    let primary = WebDavContactSource::new(config.primary.to_carddav_config(&config.http))
        .context("failed to create contact source")?;
    let sink = WebDavCalendarSink::new(config.primary.to_caldav_config(&config.http))
        .context("failed to create calendar sink")?;

    let mut service = BirthdaySyncService::new(
        ContactSource::new(config.primary.username.clone(), Arc::new(primary)),
        Arc::new(VCardDecoder),
        Arc::new(IcsEventEncoder),
        Arc::new(sink),
        config.to_sync_options(current_year),
    );

    if let (Some(carddav), Some(owner)) = (
        config.secondary.to_carddav_config(&config.http),
        config.secondary.username(),
    ) {
        let secondary = WebDavContactSource::new(carddav)
            .context("failed to create secondary contact source")?;
        service = service.with_secondary(ContactSource::new(owner, Arc::new(secondary)));
    }

    Ok(service)
}

/// Run one sync as described by the command line
pub async fn run(cli: &Cli) -> anyhow::Result<SyncReport> {
    let config = resolve_config(cli)?;
    let current_year = cli.year.unwrap_or_else(|| chrono::Local::now().year());

    let service = build_service(&config, current_year)?;
    let report = service.run().await.context("birthday sync failed")?;

    info!(
        primary = report.primary_contacts,
        secondary = report.secondary_contacts,
        without_birthday = report.records_without_birthday,
        skipped_records = report.records_skipped,
        duplicates = report.duplicate_names,
        contacts = report.merged_contacts,
        uploaded = report.events_uploaded,
        skipped_dates = report.dates_skipped,
        "Sync report"
    );
    Ok(report)
}
