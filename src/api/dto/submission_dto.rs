//! Submission endpoint DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Submission;

/// Query parameters for the admin listing endpoint.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct AdminKeyQuery {
    /// Admin access key; must match the configured `ADMIN_KEY`.
    #[serde(default)]
    pub key: Option<String>,
}

/// Response body for `GET /api/submissions`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionListResponse {
    /// Always `true` for a successful listing.
    pub success: bool,
    /// Number of stored submissions.
    pub count: usize,
    /// All submissions, newest first.
    pub submissions: Vec<Submission>,
}
