//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Form endpoints are mounted under `/api`; the health check sits at the
//! root.

pub mod dto;
pub mod handlers;

use axum::Router;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api", handlers::routes())
        .merge(handlers::system::routes())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::notify::MockMailer;
    use crate::service::SubmissionService;
    use crate::storage::StorageManager;

    async fn make_app(admin_key: Option<&str>) -> (tempfile::TempDir, Router) {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir creation failed");
        };
        let db_path = dir.path().join("submissions.db").to_string_lossy().into_owned();
        let storage = Arc::new(StorageManager::connect(None, &db_path).await);
        let mailer = Arc::new(MockMailer::default());
        let service = Arc::new(SubmissionService::new(
            storage,
            mailer,
            Some("owner@acme.com".to_string()),
        ));
        let state = AppState {
            service,
            admin_key: admin_key.map(str::to_string),
        };
        (dir, build_router().with_state(state))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body read failed");
        };
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    }

    fn post_submit(body: &str) -> Request<Body> {
        let Ok(request) = Request::builder()
            .method("POST")
            .uri("/api/submit")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
        else {
            panic!("request build failed");
        };
        request
    }

    fn get(uri: &str) -> Request<Body> {
        let Ok(request) = Request::builder().uri(uri).body(Body::empty()) else {
            panic!("request build failed");
        };
        request
    }

    #[tokio::test]
    async fn health_reports_service_name() {
        let (_dir, app) = make_app(None).await;
        let Ok(response) = app.oneshot(get("/health")).await else {
            panic!("request failed");
        };
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body.get("status").and_then(Value::as_str), Some("healthy"));
        assert_eq!(
            body.get("service").and_then(Value::as_str),
            Some("firsttask-backend")
        );
    }

    #[tokio::test]
    async fn submit_happy_path() {
        let (_dir, app) = make_app(Some("s3cret")).await;
        let payload = r#"{"companyName":"Acme","role":"CEO","email":"a@acme.com","taskDescription":"build a widget","timeline":"2 weeks","budget":"$5k"}"#;

        let Ok(response) = app.clone().oneshot(post_submit(payload)).await else {
            panic!("request failed");
        };
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body.get("success").and_then(Value::as_bool), Some(true));
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Form submitted successfully")
        );

        // One row appended, visible through the admin listing.
        let Ok(response) = app.oneshot(get("/api/submissions?key=s3cret")).await else {
            panic!("request failed");
        };
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body.get("count").and_then(Value::as_u64), Some(1));
    }

    #[tokio::test]
    async fn malformed_body_is_no_data_provided() {
        let (_dir, app) = make_app(None).await;
        let Ok(response) = app.oneshot(post_submit("not json")).await else {
            panic!("request failed");
        };
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("No data provided")
        );
    }

    #[tokio::test]
    async fn missing_fields_are_all_listed() {
        let (_dir, app) = make_app(None).await;
        let payload = r#"{"companyName":"Acme","email":"a@acme.com","taskDescription":"x","timeline":"y"}"#;
        let Ok(response) = app.oneshot(post_submit(payload)).await else {
            panic!("request failed");
        };
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Missing required fields: role, budget")
        );
    }

    #[tokio::test]
    async fn invalid_email_is_rejected() {
        let (_dir, app) = make_app(None).await;
        let payload = r#"{"companyName":"Acme","role":"CEO","email":"a@bc","taskDescription":"x","timeline":"y","budget":"z"}"#;
        let Ok(response) = app.oneshot(post_submit(payload)).await else {
            panic!("request failed");
        };
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Invalid email format")
        );
    }

    #[tokio::test]
    async fn admin_listing_without_configured_key_is_forbidden() {
        let (_dir, app) = make_app(None).await;
        let Ok(response) = app.oneshot(get("/api/submissions?key=anything")).await else {
            panic!("request failed");
        };
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_listing_with_wrong_key_leaks_nothing() {
        let (_dir, app) = make_app(Some("s3cret")).await;
        let Ok(response) = app.oneshot(get("/api/submissions?key=wrong")).await else {
            panic!("request failed");
        };
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Unauthorized")
        );
        assert!(body.get("submissions").is_none());
    }

    #[tokio::test]
    async fn admin_listing_with_correct_key_returns_submissions() {
        let (_dir, app) = make_app(Some("s3cret")).await;
        let Ok(response) = app.oneshot(get("/api/submissions?key=s3cret")).await else {
            panic!("request failed");
        };
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body.get("success").and_then(Value::as_bool), Some(true));
        assert_eq!(body.get("count").and_then(Value::as_u64), Some(0));
        assert!(matches!(body.get("submissions"), Some(Value::Array(_))));
    }
}
