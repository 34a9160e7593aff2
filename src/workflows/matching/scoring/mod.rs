mod config;
mod rules;

pub use config::{MatcherConfig, SkillMatchMode, UnknownSkillMatchMode};

use super::domain::{CandidateRecord, MatchRequirement, ScoredCandidate};
use rules::{score_candidate, PreparedRequirement};
use tracing::debug;

/// Stateless scorer that ranks a roster against one requirement.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    config: MatcherConfig,
}

impl Matcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn score(
        &self,
        candidate: &CandidateRecord,
        requirement: &MatchRequirement,
    ) -> ScoredCandidate {
        let prepared = PreparedRequirement::new(requirement);
        self.score_prepared(candidate.clone(), &prepared)
    }

    /// Scores every candidate and orders them by score, highest first.
    ///
    /// The sort is stable: candidates with equal scores keep their roster order.
    pub fn rank(
        &self,
        roster: &[CandidateRecord],
        requirement: &MatchRequirement,
    ) -> Vec<ScoredCandidate> {
        let prepared = PreparedRequirement::new(requirement);

        let mut scored: Vec<ScoredCandidate> = roster
            .iter()
            .map(|candidate| self.score_prepared(candidate.clone(), &prepared))
            .collect();

        scored.sort_by(|left, right| right.match_score.cmp(&left.match_score));
        scored
    }

    fn score_prepared(
        &self,
        candidate: CandidateRecord,
        requirement: &PreparedRequirement<'_>,
    ) -> ScoredCandidate {
        let (components, match_score) = score_candidate(&candidate, requirement, &self.config);
        debug!(candidate = %candidate.name, match_score, "candidate scored");

        ScoredCandidate {
            candidate,
            match_score,
            components,
        }
    }
}

/// Ranks `roster` with the default (substring) skill matching.
pub fn rank(roster: &[CandidateRecord], requirement: &MatchRequirement) -> Vec<ScoredCandidate> {
    Matcher::default().rank(roster, requirement)
}
