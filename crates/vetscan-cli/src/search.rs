//! `search` command: one location, one browser session, JSON on stdout.

use anyhow::Context;
use serde::Serialize;
use uuid::Uuid;
use vetscan_core::{AppConfig, ClinicRecord, SearchSession};
use vetscan_scraper::{ScraperConfig, SearchReport, VetScraper};

/// What the command prints: the session row a consumer would persist plus
/// the records it links to.
#[derive(Debug, Serialize)]
pub(crate) struct SearchOutput {
    pub(crate) session: SearchSession,
    pub(crate) clinics: Vec<ClinicRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) report: Option<SearchReport>,
}

pub(crate) fn build_output(
    search_id: Uuid,
    location: &str,
    report: SearchReport,
    include_report: bool,
) -> SearchOutput {
    let clinics = report.records.clone();
    SearchOutput {
        session: SearchSession::new(search_id, location, clinics.len()),
        clinics,
        report: include_report.then_some(report),
    }
}

/// Runs one search for `location` and prints the result.
///
/// # Errors
///
/// Returns an error if the location is blank, the browser cannot be started,
/// or the output cannot be serialized. A search that finds nothing still
/// prints an empty clinic list.
pub(crate) async fn run_search(
    config: &AppConfig,
    location: &str,
    pretty: bool,
    include_report: bool,
) -> anyhow::Result<()> {
    let location = location.trim();
    if location.is_empty() {
        anyhow::bail!("location must not be empty");
    }

    let search_id = Uuid::new_v4();
    tracing::info!(%search_id, location, env = %config.env, "running search command");

    let mut scraper = VetScraper::new(ScraperConfig::from_app_config(config));
    let report = scraper
        .search_with_report(location)
        .await
        .context("browser session could not be started")?;

    let output = build_output(search_id, location, report, include_report);
    let json = if pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{json}");
    Ok(())
}
