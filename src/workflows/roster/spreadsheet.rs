use super::{parse_roster, RosterError, RosterProvider};
use crate::workflows::matching::domain::CandidateRecord;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{info, warn};

const GOOGLE_SHEETS_PREFIX: &str = "https://docs.google.com/spreadsheets/d/";

/// Roster published as CSV by a spreadsheet service and fetched over HTTP.
#[derive(Debug, Clone)]
pub struct SpreadsheetRoster {
    client: Client,
    export_url: String,
}

impl SpreadsheetRoster {
    /// Accepts a CSV export URL directly, or a Google Sheets sharing URL which is
    /// rewritten to its CSV export form.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(build_roster_client(30), url)
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            client,
            export_url: csv_export_url(&url),
        }
    }

    pub fn export_url(&self) -> &str {
        &self.export_url
    }
}

#[async_trait]
impl RosterProvider for SpreadsheetRoster {
    async fn fetch_roster(&self) -> Result<Vec<CandidateRecord>, RosterError> {
        let response = self
            .client
            .get(&self.export_url)
            .send()
            .await
            .inspect_err(|err| {
                warn!(url = %self.export_url, error = %err, "roster fetch failed");
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.export_url, %status, "roster source rejected request");
            return Err(RosterError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let candidates = parse_roster(&body[..])?;
        info!(url = %self.export_url, count = candidates.len(), "roster fetched");
        Ok(candidates)
    }

    fn describe(&self) -> String {
        format!("spreadsheet {}", self.export_url)
    }
}

pub(crate) fn build_roster_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// `.../spreadsheets/d/<id>/edit#gid=<gid>` becomes
/// `.../spreadsheets/d/<id>/export?format=csv&gid=<gid>`. Other URLs pass through.
fn csv_export_url(url: &str) -> String {
    let trimmed = url.trim();
    let Some(rest) = trimmed.strip_prefix(GOOGLE_SHEETS_PREFIX) else {
        return trimmed.to_string();
    };
    if rest.contains("/export") || rest.contains("/pub") {
        return trimmed.to_string();
    }

    let sheet_id = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let gid = rest
        .split(['#', '?', '&'])
        .find_map(|part| part.strip_prefix("gid="));

    match gid {
        Some(gid) => format!("{GOOGLE_SHEETS_PREFIX}{sheet_id}/export?format=csv&gid={gid}"),
        None => format!("{GOOGLE_SHEETS_PREFIX}{sheet_id}/export?format=csv"),
    }
}
