use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use talent_match::config::RosterSource;
use talent_match::workflows::roster::{
    CsvRoster, RosterProvider, SpreadsheetRoster, StaticRoster,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Command-line overrides beat the configured roster source.
pub(crate) fn resolve_roster_source(
    configured: RosterSource,
    sheet_url: Option<String>,
    roster_csv: Option<PathBuf>,
) -> RosterSource {
    if sheet_url.is_none() && roster_csv.is_none() {
        return configured;
    }
    RosterSource::from_parts(sheet_url, roster_csv)
}

pub(crate) fn roster_provider(source: &RosterSource) -> Arc<dyn RosterProvider> {
    match source {
        RosterSource::Sample => Arc::new(StaticRoster::sample()),
        RosterSource::CsvFile(path) => Arc::new(CsvRoster::from_path(path)),
        RosterSource::Spreadsheet(url) => Arc::new(SpreadsheetRoster::new(url.clone())),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
