//! Service layer: the submission dispatcher.
//!
//! [`SubmissionService`] orchestrates validation, persistence, and the
//! two notification sends for each inbound submission.

pub mod submission_service;

pub use submission_service::SubmissionService;
