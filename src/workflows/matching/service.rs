use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::domain::{CandidateRecord, MatchRequirement, ScoredCandidate};
use super::requirement::RequirementError;
use super::scoring::Matcher;
use crate::workflows::roster::{RosterError, RosterProvider};

/// Service composing one roster source with the matcher.
pub struct MatchingService<P: ?Sized> {
    provider: Arc<P>,
    matcher: Matcher,
}

impl<P> MatchingService<P>
where
    P: RosterProvider + ?Sized + 'static,
{
    pub fn new(provider: Arc<P>, matcher: Matcher) -> Self {
        Self { provider, matcher }
    }

    pub fn source(&self) -> String {
        self.provider.describe()
    }

    /// Current roster, unscored and in source order.
    pub async fn roster(&self) -> Result<Vec<CandidateRecord>, MatchingError> {
        Ok(self.provider.fetch_roster().await?)
    }

    /// Fetch the roster and rank it against `requirement`.
    pub async fn run(&self, requirement: MatchRequirement) -> Result<MatchReport, MatchingError> {
        let roster = self.provider.fetch_roster().await?;
        Ok(self.rank_roster(&roster, requirement))
    }

    /// Rank a roster supplied by the caller instead of the configured source.
    pub fn rank_roster(
        &self,
        roster: &[CandidateRecord],
        requirement: MatchRequirement,
    ) -> MatchReport {
        let candidates = self.matcher.rank(roster, &requirement);
        info!(
            project = %requirement.project_name,
            candidates = candidates.len(),
            skill_match = %self.matcher.config().skill_match,
            top_score = candidates.first().map(|c| c.match_score).unwrap_or_default(),
            "ranking completed"
        );

        MatchReport {
            candidate_count: candidates.len(),
            requirement,
            candidates,
        }
    }
}

/// Ranked result of one matching request.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub requirement: MatchRequirement,
    pub candidate_count: usize,
    pub candidates: Vec<ScoredCandidate>,
}

/// Error raised by the matching service.
#[derive(Debug, thiserror::Error)]
pub enum MatchingError {
    #[error("roster data unavailable: {0}")]
    DataUnavailable(#[from] RosterError),
    #[error("invalid requirement: {0}")]
    InvalidRequirement(#[from] RequirementError),
}
