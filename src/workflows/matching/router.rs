use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{CandidateRecord, MatchRequirement};
use super::requirement::MatchForm;
use super::service::{MatchingError, MatchingService};
use crate::workflows::roster::{parse_roster, RosterProvider};

/// Body of a matching request: the project form plus an optional roster
/// override in CSV form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub requirement: MatchForm,
    #[serde(default)]
    pub roster_csv: Option<String>,
}

#[derive(Debug, Serialize)]
struct RosterView {
    source: String,
    candidate_count: usize,
    candidates: Vec<CandidateRecord>,
}

/// Router builder exposing the matching and roster endpoints.
pub fn matching_router<P>(service: Arc<MatchingService<P>>) -> Router
where
    P: RosterProvider + ?Sized + 'static,
{
    Router::new()
        .route("/api/v1/matches", post(match_handler::<P>))
        .route("/api/v1/roster", get(roster_handler::<P>))
        .with_state(service)
}

pub(crate) async fn match_handler<P>(
    State(service): State<Arc<MatchingService<P>>>,
    axum::Json(request): axum::Json<MatchRequest>,
) -> Response
where
    P: RosterProvider + ?Sized + 'static,
{
    let requirement = match MatchRequirement::try_from(request.requirement) {
        Ok(requirement) => requirement,
        Err(err) => return error_response(MatchingError::from(err)),
    };

    let report = match request.roster_csv {
        Some(csv) => parse_roster(csv.as_bytes())
            .map(|roster| service.rank_roster(&roster, requirement))
            .map_err(MatchingError::from),
        None => service.run(requirement).await,
    };

    match report {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn roster_handler<P>(State(service): State<Arc<MatchingService<P>>>) -> Response
where
    P: RosterProvider + ?Sized + 'static,
{
    match service.roster().await {
        Ok(candidates) => {
            let view = RosterView {
                source: service.source(),
                candidate_count: candidates.len(),
                candidates,
            };
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: MatchingError) -> Response {
    let status = match err {
        MatchingError::DataUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        MatchingError::InvalidRequirement(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    let payload = json!({
        "error": err.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
