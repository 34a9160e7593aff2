use std::sync::Arc;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::matching::domain::{CandidateRecord, MatchRequirement};
use crate::workflows::matching::requirement::{MatchForm, SkillInput};
use crate::workflows::matching::{matching_router, Matcher, MatchingService};
use crate::workflows::roster::{RosterError, RosterProvider, StaticRoster};

pub(super) fn candidate(
    name: &str,
    skills: &[&str],
    desired_rate: Option<f64>,
    work_condition: &str,
) -> CandidateRecord {
    CandidateRecord {
        name: name.to_string(),
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
        role: "開発者".to_string(),
        desired_rate,
        work_condition: work_condition.to_string(),
        available_from: "2024-02-01".to_string(),
    }
}

pub(super) fn roster() -> Vec<CandidateRecord> {
    vec![
        candidate("OR", &["C#", "AWS", "Docker"], Some(75.0), "fully remote"),
        candidate("Y.O", &["PMO", "HTML", "MySQL"], Some(90.0), "fully remote"),
        candidate("K.T", &["Python", "Django", "React"], Some(85.0), "onsite"),
    ]
}

pub(super) fn aws_requirement() -> MatchRequirement {
    MatchRequirement::new("fully remote")
        .with_required(["AWS"])
        .with_preferred(["Docker"])
        .with_rate_range(70.0, 90.0)
}

pub(super) fn form(required: &str, preferred: &str, location: &str) -> MatchForm {
    MatchForm {
        project_name: Some("Cloud migration".to_string()),
        required_skills: Some(SkillInput::from(required)),
        preferred_skills: Some(SkillInput::from(preferred)),
        location: location.to_string(),
        rate_range: Some("70万～90万".to_string()),
        start_period: Some("2024-03-01".to_string()),
        billing_time: Some("140h～180h".to_string()),
    }
}

pub(super) fn sample_service() -> Arc<MatchingService<StaticRoster>> {
    Arc::new(MatchingService::new(
        Arc::new(StaticRoster::new(roster())),
        Matcher::default(),
    ))
}

pub(super) fn unavailable_service() -> Arc<MatchingService<UnavailableRoster>> {
    Arc::new(MatchingService::new(
        Arc::new(UnavailableRoster),
        Matcher::default(),
    ))
}

pub(super) fn router_with_sample_roster() -> axum::Router {
    matching_router(sample_service())
}

/// Provider whose source can never be reached.
pub(super) struct UnavailableRoster;

#[async_trait]
impl RosterProvider for UnavailableRoster {
    async fn fetch_roster(&self) -> Result<Vec<CandidateRecord>, RosterError> {
        Err(RosterError::Status { status: 503 })
    }

    fn describe(&self) -> String {
        "unavailable".to_string()
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn names(candidates: &[crate::workflows::matching::ScoredCandidate]) -> Vec<&str> {
    candidates
        .iter()
        .map(|scored| scored.candidate.name.as_str())
        .collect()
}
