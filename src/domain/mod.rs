//! Domain layer: the submission model and inbound payload validation.

pub mod submission;

pub use submission::{Submission, SubmissionInput, ValidationError};
