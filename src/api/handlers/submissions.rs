//! Admin listing handler.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{AdminKeyQuery, SubmissionListResponse};
use crate::app_state::AppState;
use crate::error::{ApiError, ApiMessage};

/// `GET /api/submissions` — List all submissions, newest first.
///
/// Protected by a simple access key passed as `?key=`.
///
/// # Errors
///
/// Returns [`ApiError::AdminUnconfigured`] (403) when no admin key is
/// configured, [`ApiError::Unauthorized`] (401) on key mismatch, and
/// [`ApiError::Storage`] (500) on read failure.
#[utoipa::path(
    get,
    path = "/api/submissions",
    tag = "Form",
    summary = "List submissions (admin)",
    params(AdminKeyQuery),
    responses(
        (status = 200, description = "All stored submissions", body = SubmissionListResponse),
        (status = 401, description = "Key mismatch", body = ApiMessage),
        (status = 403, description = "Admin access not configured", body = ApiMessage),
    )
)]
pub async fn list_submissions_handler(
    State(state): State<AppState>,
    Query(query): Query<AdminKeyQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(expected) = state.admin_key.as_deref() else {
        return Err(ApiError::AdminUnconfigured);
    };
    if query.key.as_deref() != Some(expected) {
        return Err(ApiError::Unauthorized);
    }

    let submissions = state.service.list_submissions().await?;
    Ok(Json(SubmissionListResponse {
        success: true,
        count: submissions.len(),
        submissions,
    }))
}

/// Admin listing routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/submissions", get(list_submissions_handler))
}
