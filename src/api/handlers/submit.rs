//! Form submission handler.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;

use crate::app_state::AppState;
use crate::error::{ApiError, ApiMessage};

/// `POST /api/submit` — Handle one form submission.
///
/// The body is read raw and parsed leniently: a missing or unreadable
/// JSON body is reported as `No data provided` instead of a framework
/// rejection, keeping every response in the uniform
/// `{"success", "message"}` shape.
///
/// # Errors
///
/// Returns [`ApiError`] on validation (400), storage (500), or
/// notification (500) failure.
#[utoipa::path(
    post,
    path = "/api/submit",
    tag = "Form",
    summary = "Submit the lead form",
    description = "Validates the submitted form (companyName, role, email, taskDescription, timeline, budget required; website optional), persists it, and sends confirmation and owner-notification emails.",
    request_body = Value,
    responses(
        (status = 200, description = "Form submitted successfully", body = ApiMessage),
        (status = 400, description = "Validation failure", body = ApiMessage),
        (status = 500, description = "Storage or notification failure", body = ApiMessage),
    )
)]
pub async fn submit_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let payload: Option<Value> = serde_json::from_slice(&body).ok();
    state.service.handle_submission(payload).await?;
    Ok((
        StatusCode::OK,
        Json(ApiMessage::ok("Form submitted successfully")),
    ))
}

/// Submission routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/submit", post(submit_handler))
}
