//! Submission model and payload validation.
//!
//! A [`SubmissionInput`] is built from untyped JSON by
//! [`SubmissionInput::from_json`], which enforces the form contract:
//! non-empty payload, six required fields, and a deliberately permissive
//! email shape check.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// JSON keys that must be present and non-empty in every submission.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "companyName",
    "role",
    "email",
    "taskDescription",
    "timeline",
    "budget",
];

/// A persisted form submission as returned by the store.
///
/// Serialized with camelCase keys to match the form's wire format.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Store-assigned row id.
    pub id: i64,
    /// Insertion time, `YYYY-MM-DD HH:MM:SS`, server-local.
    pub timestamp: String,
    /// Submitter's company.
    pub company_name: String,
    /// Submitter's role at the company.
    pub role: String,
    /// Submitter's contact address.
    pub email: String,
    /// Company website or LinkedIn, optional.
    pub website: Option<String>,
    /// What the submitter wants done.
    pub task_description: String,
    /// Expected timeline.
    pub timeline: String,
    /// Budget range.
    pub budget: String,
}

/// A validated submission, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionInput {
    /// Submitter's company.
    pub company_name: String,
    /// Submitter's role at the company.
    pub role: String,
    /// Submitter's contact address.
    pub email: String,
    /// Company website or LinkedIn, optional.
    pub website: Option<String>,
    /// What the submitter wants done.
    pub task_description: String,
    /// Expected timeline.
    pub timeline: String,
    /// Budget range.
    pub budget: String,
}

/// Client-caused payload rejection. Messages are echoed verbatim in the
/// HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Payload was absent, not an object, or empty.
    #[error("No data provided")]
    Empty,

    /// One or more required fields were absent or empty. Carries the
    /// comma-joined list of every missing field, not just the first.
    #[error("Missing required fields: {0}")]
    MissingFields(String),

    /// Email lacked an `@` or the part after the last `@` lacked a dot.
    #[error("Invalid email format")]
    InvalidEmail,
}

impl SubmissionInput {
    /// Validates an untyped JSON payload into a `SubmissionInput`.
    ///
    /// Checks short-circuit in order: payload shape, required fields
    /// (reporting every missing one), then email shape.
    ///
    /// # Errors
    ///
    /// Returns the first applicable [`ValidationError`].
    pub fn from_json(payload: &Value) -> Result<Self, ValidationError> {
        let Some(map) = payload.as_object() else {
            return Err(ValidationError::Empty);
        };
        if map.is_empty() {
            return Err(ValidationError::Empty);
        }

        let missing: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| field_str(map, field).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing.join(", ")));
        }

        let email = field_str(map, "email").unwrap_or_default();
        if !email_shape_ok(email) {
            return Err(ValidationError::InvalidEmail);
        }

        let required = |field: &str| field_str(map, field).unwrap_or_default().to_string();
        Ok(Self {
            company_name: required("companyName"),
            role: required("role"),
            email: email.to_string(),
            website: map
                .get("website")
                .and_then(Value::as_str)
                .map(str::to_string),
            task_description: required("taskDescription"),
            timeline: required("timeline"),
            budget: required("budget"),
        })
    }
}

/// Returns the field as a non-empty string, or `None` when absent,
/// non-string, or empty.
fn field_str<'a>(map: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    map.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Permissive email shape check: an `@` must exist and the part after the
/// last `@` must contain a dot. Not RFC validation by design.
fn email_shape_ok(email: &str) -> bool {
    match email.rsplit_once('@') {
        Some((_, domain)) => domain.contains('.'),
        None => false,
    }
}
