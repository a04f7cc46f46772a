//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::SubmissionService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Submission service orchestrating validation, storage, and mail.
    pub service: Arc<SubmissionService>,
    /// Access key for the admin listing endpoint, if configured.
    pub admin_key: Option<String>,
}
