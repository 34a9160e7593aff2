use super::common::*;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use crate::workflows::matching::router::{match_handler, roster_handler};
use crate::workflows::matching::MatchRequest;

fn post_matches(body: serde_json::Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post("/api/v1/matches")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(&body).expect("serialize body"),
        ))
        .expect("request builds")
}

#[tokio::test]
async fn match_route_returns_ranked_candidates() {
    let router = router_with_sample_roster();

    let response = router
        .oneshot(post_matches(json!({
            "requirement": {
                "project_name": "Cloud migration",
                "required_skills": "AWS",
                "preferred_skills": "Docker",
                "location": "fully remote",
                "rate_range": "70万～90万"
            }
        })))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["candidate_count"], 3);
    assert_eq!(body["candidates"][0]["name"], "OR");
    assert_eq!(body["candidates"][0]["match_score"], 70);
    assert_eq!(body["candidates"][0]["desired_rate"], 75.0);
}

#[tokio::test]
async fn match_route_accepts_inline_roster_csv() {
    let router = router_with_sample_roster();

    let response = router
        .oneshot(post_matches(json!({
            "requirement": {
                "required_skills": ["Go"],
                "preferred_skills": "",
                "location": "onsite"
            },
            "roster_csv": "名前,スキル,役割,希望単価,稼働条件,稼働開始日\nA,Java,Dev,60,onsite,2024-01-01\nB,\"Go, gRPC\",SRE,応相談,onsite,2024-01-01\n"
        })))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["candidates"][0]["name"], "B");
    assert_eq!(body["candidates"][0]["match_score"], 40);
    assert!(body["candidates"][0]["desired_rate"].is_null());
}

#[tokio::test]
async fn match_handler_rejects_missing_skill_fields() {
    let request = MatchRequest {
        requirement: crate::workflows::matching::MatchForm {
            location: "remote".to_string(),
            ..Default::default()
        },
        roster_csv: None,
    };

    let response = match_handler(State(sample_service()), axum::Json(request)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("required_skills"));
}

#[tokio::test]
async fn match_handler_reports_unavailable_roster() {
    let request = MatchRequest {
        requirement: form("AWS", "", "remote"),
        roster_csv: None,
    };

    let response = match_handler(State(unavailable_service()), axum::Json(request)).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn unreadable_inline_roster_is_unavailable_data() {
    let request = MatchRequest {
        requirement: form("AWS", "", "remote"),
        roster_csv: Some("スキル\nRust\n".to_string()),
    };

    let response = match_handler(State(sample_service()), axum::Json(request)).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("roster"));
}

#[tokio::test]
async fn roster_route_lists_source_candidates() {
    let response = roster_handler(State(sample_service())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["candidate_count"], 3);
    assert_eq!(body["candidates"][2]["name"], "K.T");
}
