//! Service error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type for the request path. Each
//! variant maps to a specific HTTP status code and the uniform
//! `{"success": false, "message": "..."}` JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ValidationError;
use crate::notify::NotificationError;
use crate::storage::StorageError;

/// Uniform JSON response body for both successes and failures.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiMessage {
    /// Whether the request succeeded.
    pub success: bool,
    /// Human-readable outcome message.
    pub message: String,
}

impl ApiMessage {
    /// Builds a success body with the given message.
    #[must_use]
    pub fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }

    /// Builds a failure body with the given message.
    #[must_use]
    pub fn failure(message: String) -> Self {
        Self {
            success: false,
            message,
        }
    }
}

/// Server-side error enum with HTTP status code mapping.
///
/// Storage and notification failures are rendered as `Server error: <cause>`
/// so no internal paths or backtraces ever reach the client, only the
/// causal message text.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Inbound payload failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Admin listing requested but no admin key is configured.
    #[error("Admin access not configured")]
    AdminUnconfigured,

    /// Provided admin key does not match the configured one.
    #[error("Unauthorized")]
    Unauthorized,

    /// Persistence layer failure.
    #[error("Server error: {0}")]
    Storage(#[from] StorageError),

    /// Mail transport failure. Surfaces even when the submission was
    /// already durably stored.
    #[error("Server error: {0}")]
    Notification(#[from] NotificationError),
}

impl ApiError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::AdminUnconfigured => StatusCode::FORBIDDEN,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Storage(_) | Self::Notification(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ApiMessage::failure(self.to_string());
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
