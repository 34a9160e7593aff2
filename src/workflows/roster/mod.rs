//! Roster sources that feed candidate records to the matcher.
//!
//! The matcher never sees where a roster came from: every source implements
//! [`RosterProvider`] and yields normalized [`CandidateRecord`]s.

mod parser;
mod spreadsheet;

pub use spreadsheet::SpreadsheetRoster;

use crate::workflows::matching::domain::CandidateRecord;
use async_trait::async_trait;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

/// Capability to retrieve the current roster.
///
/// An empty source yields an empty roster; only transport failures are errors.
#[async_trait]
pub trait RosterProvider: Send + Sync {
    async fn fetch_roster(&self) -> Result<Vec<CandidateRecord>, RosterError>;

    /// Short description of the source for logs and API responses.
    fn describe(&self) -> String;
}

/// The roster source could not be read.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read roster file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("roster source unreachable: {0}")]
    Http(#[from] reqwest::Error),
    #[error("roster source returned HTTP {status}")]
    Status { status: u16 },
}

/// Parses a CSV roster from any reader.
pub fn parse_roster<R: Read>(reader: R) -> Result<Vec<CandidateRecord>, RosterError> {
    Ok(parser::parse_records(reader)?)
}

/// Fixed in-memory roster.
#[derive(Debug, Clone, Default)]
pub struct StaticRoster {
    candidates: Vec<CandidateRecord>,
}

impl StaticRoster {
    pub fn new(candidates: Vec<CandidateRecord>) -> Self {
        Self { candidates }
    }

    /// The three-person demo roster the matching screen ships with.
    pub fn sample() -> Self {
        Self::new(vec![
            sample_candidate(
                "OR",
                &["C#", "AWS", "Docker"],
                "TL",
                75.0,
                "フルリモート",
                "2024-01-20",
            ),
            sample_candidate(
                "Y.O",
                &["PMO", "HTML", "MySQL"],
                "PMO",
                90.0,
                "フルリモート",
                "2024-01-01",
            ),
            sample_candidate(
                "K.T",
                &["Python", "Django", "React"],
                "開発者",
                85.0,
                "オンサイト",
                "2024-02-01",
            ),
        ])
    }

    pub fn candidates(&self) -> &[CandidateRecord] {
        &self.candidates
    }
}

fn sample_candidate(
    name: &str,
    skills: &[&str],
    role: &str,
    desired_rate: f64,
    work_condition: &str,
    available_from: &str,
) -> CandidateRecord {
    CandidateRecord {
        name: name.to_string(),
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
        role: role.to_string(),
        desired_rate: Some(desired_rate),
        work_condition: work_condition.to_string(),
        available_from: available_from.to_string(),
    }
}

#[async_trait]
impl RosterProvider for StaticRoster {
    async fn fetch_roster(&self) -> Result<Vec<CandidateRecord>, RosterError> {
        Ok(self.candidates.clone())
    }

    fn describe(&self) -> String {
        format!("static roster ({} candidates)", self.candidates.len())
    }
}

/// CSV roster read on every fetch, either from disk or from a held string.
#[derive(Debug, Clone)]
pub enum CsvRoster {
    File(PathBuf),
    Inline(String),
}

impl CsvRoster {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    pub fn from_text(csv: impl Into<String>) -> Self {
        Self::Inline(csv.into())
    }
}

#[async_trait]
impl RosterProvider for CsvRoster {
    async fn fetch_roster(&self) -> Result<Vec<CandidateRecord>, RosterError> {
        let candidates = match self {
            CsvRoster::File(path) => {
                let bytes = tokio::fs::read(path).await?;
                parse_roster(bytes.as_slice())?
            }
            CsvRoster::Inline(csv) => parse_roster(csv.as_bytes())?,
        };

        info!(source = %self.describe(), count = candidates.len(), "roster loaded");
        Ok(candidates)
    }

    fn describe(&self) -> String {
        match self {
            CsvRoster::File(path) => format!("csv file {}", path.display()),
            CsvRoster::Inline(_) => "inline csv".to_string(),
        }
    }
}
