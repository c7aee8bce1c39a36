//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/start", post(start_handler))
        .route("/stop", post(stop_handler))
        .route("/reset", post(reset_handler))
        .route("/preset/:minutes", post(preset_handler))
        .route("/presets", get(presets_handler))
        .route("/status", get(status_handler))
        .route("/render.svg", get(render_handler))
        .route("/sessions", get(sessions_handler))
        .route("/export/:format", get(export_handler))
        .route("/profiles", get(profiles_handler))
        .route("/profiles/:name", post(switch_profile_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;
    use crate::state::app_state::tests::test_state;

    async fn call(router: &Router, method: &str, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = router
            .clone()
            .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn call_json(router: &Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = call(router, method, uri).await;
        let value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn preset_start_status_round_trip() {
        let tmp = TempDir::new().unwrap();
        let (state, _) = test_state(&tmp);
        let router = create_router(Arc::new(state));

        let (status, body) = call_json(&router, "POST", "/preset/10").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "applied");
        assert_eq!(body["timer"]["total_seconds"], 600);
        assert_eq!(body["timer"]["label"], "10:00");

        let (_, body) = call_json(&router, "POST", "/start").await;
        assert_eq!(body["status"], "applied");
        let (_, body) = call_json(&router, "POST", "/start").await;
        assert_eq!(body["status"], "ignored");
        let (_, body) = call_json(&router, "POST", "/preset/5").await;
        assert_eq!(body["status"], "ignored");

        let (status, body) = call_json(&router, "GET", "/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timer"]["running"], true);
        assert_eq!(body["timer"]["fraction"], 1.0);
        assert_eq!(body["profile"], "default");
        assert_eq!(body["last_action"], "start");
    }

    #[tokio::test]
    async fn unknown_preset_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let (state, _) = test_state(&tmp);
        let router = create_router(Arc::new(state));

        let (status, _) = call(&router, "POST", "/preset/7").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = call(&router, "POST", "/preset/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn render_serves_svg() {
        let tmp = TempDir::new().unwrap();
        let (state, _) = test_state(&tmp);
        let router = create_router(Arc::new(state));

        let response = router
            .clone()
            .oneshot(Request::builder().uri("/render.svg?width=300&height=300").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let svg = String::from_utf8(body.to_vec()).unwrap();
        assert!(svg.contains(r#"width="300""#));
        assert!(svg.contains(">5:00</text>"));
    }

    #[tokio::test]
    async fn stop_is_exported_as_incomplete_session() {
        let tmp = TempDir::new().unwrap();
        let (state, _) = test_state(&tmp);
        let router = create_router(Arc::new(state));

        call(&router, "POST", "/start").await;
        call(&router, "POST", "/stop").await;

        let (status, body) = call(&router, "GET", "/export/csv").await;
        assert_eq!(status, StatusCode::OK);
        let csv = String::from_utf8(body).unwrap();
        assert!(csv.starts_with("Date,Duration (min),Completed\r\n"));
        assert!(csv.contains(",5,No\r\n"));

        let (_, body) = call_json(&router, "GET", "/export/json").await;
        assert_eq!(body["sessions"][0]["completed"], false);

        let (status, _) = call(&router, "GET", "/export/pdf").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn profiles_can_be_switched() {
        let tmp = TempDir::new().unwrap();
        let (state, _) = test_state(&tmp);
        let router = create_router(Arc::new(state));

        let (status, body) = call_json(&router, "POST", "/profiles/noor").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["current"], "noor");

        let (status, _) = call(&router, "POST", "/profiles/bad.name").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = call_json(&router, "GET", "/profiles").await;
        assert_eq!(body["current"], "noor");
        assert_eq!(body["profiles"][0], "default");
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let tmp = TempDir::new().unwrap();
        let (state, _) = test_state(&tmp);
        let router = create_router(Arc::new(state));

        let (status, body) = call_json(&router, "GET", "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
