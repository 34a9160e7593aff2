use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use talent_match::workflows::matching::{matching_router, MatchingService};
use talent_match::workflows::roster::RosterProvider;

pub(crate) fn with_matching_routes<P>(service: Arc<MatchingService<P>>) -> axum::Router
where
    P: RosterProvider + ?Sized + 'static,
{
    matching_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use talent_match::workflows::matching::Matcher;
    use talent_match::workflows::roster::StaticRoster;
    use tower::ServiceExt;

    fn router() -> axum::Router {
        let service = Arc::new(MatchingService::new(
            Arc::new(StaticRoster::sample()),
            Matcher::default(),
        ));
        with_matching_routes(service)
    }

    #[tokio::test]
    async fn health_route_reports_ok() {
        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("route responds");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn match_route_is_mounted() {
        let body = json!({
            "requirement": {
                "required_skills": "Python",
                "preferred_skills": "React",
                "location": "オンサイト",
                "rate_range": "80万～90万"
            }
        });
        let response = router()
            .oneshot(
                Request::post("/api/v1/matches")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&body).expect("json")))
                    .expect("request"),
            )
            .await
            .expect("route responds");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("body");
        let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("json payload");
        assert_eq!(payload["candidates"][0]["name"], "K.T");
        assert_eq!(payload["candidates"][0]["match_score"], 70);
    }
}
