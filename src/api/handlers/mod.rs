//! REST endpoint handlers organized by resource.

pub mod submissions;
pub mod submit;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes the form routes mounted under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(submit::routes())
        .merge(submissions::routes())
}
