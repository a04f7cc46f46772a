//! Submission dispatcher: validate, persist, notify.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{Submission, SubmissionInput, ValidationError};
use crate::error::ApiError;
use crate::notify::{templates, Mailer};
use crate::storage::StorageManager;

/// Orchestration layer for one inbound submission.
///
/// Stateless coordinator: owns handles to the [`StorageManager`] and the
/// [`Mailer`]. Every submission follows the pattern: validate payload →
/// insert row → confirmation to submitter → alert to owner.
#[derive(Debug)]
pub struct SubmissionService {
    storage: Arc<StorageManager>,
    mailer: Arc<dyn Mailer>,
    owner_email: Option<String>,
}

impl SubmissionService {
    /// Creates a new `SubmissionService`. `owner_email` is the already
    /// resolved notification address (primary setting with its fallback
    /// applied); `None` means owner alerts are skipped with a warning.
    #[must_use]
    pub fn new(
        storage: Arc<StorageManager>,
        mailer: Arc<dyn Mailer>,
        owner_email: Option<String>,
    ) -> Self {
        Self {
            storage,
            mailer,
            owner_email,
        }
    }

    /// Returns the storage manager handle.
    #[must_use]
    pub fn storage(&self) -> &Arc<StorageManager> {
        &self.storage
    }

    /// Handles one form submission end to end.
    ///
    /// An absent payload (unreadable or missing body) fails validation
    /// the same way an empty object does. Validation failures have no
    /// side effects. A notification failure after a successful insert
    /// propagates, so the caller sees an error even though the row is
    /// durably stored; the stored id is logged first so operators can
    /// reconcile.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`], [`ApiError::Storage`], or
    /// [`ApiError::Notification`].
    pub async fn handle_submission(&self, payload: Option<Value>) -> Result<(), ApiError> {
        let payload = payload.ok_or(ValidationError::Empty)?;
        let input = SubmissionInput::from_json(&payload)?;

        let id = self.storage.insert(&input).await?;
        tracing::info!(
            id,
            backend = %self.storage.active_backend(),
            company = %input.company_name,
            "submission stored"
        );

        let (subject, body) = templates::confirmation(&input);
        if let Err(e) = self.mailer.send(&input.email, &subject, &body).await {
            tracing::warn!(id, error = %e, "confirmation send failed after submission was stored");
            return Err(e.into());
        }

        match self.owner_email.as_deref() {
            Some(owner) => {
                let (subject, body) = templates::owner_alert(&input);
                if let Err(e) = self.mailer.send(owner, &subject, &body).await {
                    tracing::warn!(id, error = %e, "owner alert failed after submission was stored");
                    return Err(e.into());
                }
            }
            None => {
                tracing::warn!("neither OWNER_EMAIL nor GMAIL_EMAIL is set, skipping owner alert");
            }
        }

        Ok(())
    }

    /// Returns all stored submissions, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on read failure.
    pub async fn list_submissions(&self) -> Result<Vec<Submission>, ApiError> {
        Ok(self.storage.list_all().await?)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::notify::MockMailer;
    use serde_json::json;

    async fn make_service(
        mailer: Arc<MockMailer>,
        owner_email: Option<String>,
    ) -> (tempfile::TempDir, SubmissionService) {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir creation failed");
        };
        let db_path = dir.path().join("submissions.db").to_string_lossy().into_owned();
        let storage = Arc::new(StorageManager::connect(None, &db_path).await);
        let service = SubmissionService::new(storage, mailer, owner_email);
        (dir, service)
    }

    fn valid_payload() -> Value {
        json!({
            "companyName": "Acme",
            "role": "CEO",
            "email": "a@acme.com",
            "taskDescription": "build a widget",
            "timeline": "2 weeks",
            "budget": "$5k"
        })
    }

    #[tokio::test]
    async fn success_stores_row_and_sends_two_mails() {
        let mailer = Arc::new(MockMailer::default());
        let (_dir, service) =
            make_service(Arc::clone(&mailer), Some("owner@acme.com".to_string())).await;

        let result = service.handle_submission(Some(valid_payload())).await;
        assert!(result.is_ok());

        let Ok(rows) = service.list_submissions().await else {
            panic!("list failed");
        };
        assert_eq!(rows.len(), 1);

        let sent = mailer.recorded();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent.first().map(|(to, _)| to.as_str()), Some("a@acme.com"));
        assert_eq!(sent.get(1).map(|(to, _)| to.as_str()), Some("owner@acme.com"));
    }

    #[tokio::test]
    async fn unset_owner_skips_alert_but_succeeds() {
        let mailer = Arc::new(MockMailer::default());
        let (_dir, service) = make_service(Arc::clone(&mailer), None).await;

        let result = service.handle_submission(Some(valid_payload())).await;
        assert!(result.is_ok());
        assert_eq!(mailer.recorded().len(), 1);
    }

    #[tokio::test]
    async fn absent_payload_is_no_data_provided() {
        let mailer = Arc::new(MockMailer::default());
        let (_dir, service) = make_service(Arc::clone(&mailer), None).await;

        let Err(err) = service.handle_submission(None).await else {
            panic!("absent payload accepted");
        };
        assert_eq!(err.to_string(), "No data provided");
        assert!(mailer.recorded().is_empty());
    }

    #[tokio::test]
    async fn validation_failure_has_no_side_effects() {
        let mailer = Arc::new(MockMailer::default());
        let (_dir, service) = make_service(Arc::clone(&mailer), None).await;

        let payload = json!({"companyName": "Acme"});
        let Err(err) = service.handle_submission(Some(payload)).await else {
            panic!("invalid payload accepted");
        };
        assert!(err.to_string().starts_with("Missing required fields: "));

        let Ok(rows) = service.list_submissions().await else {
            panic!("list failed");
        };
        assert!(rows.is_empty());
        assert!(mailer.recorded().is_empty());
    }

    #[tokio::test]
    async fn mailer_failure_surfaces_but_row_is_kept() {
        let mailer = Arc::new(MockMailer::failing());
        let (_dir, service) =
            make_service(Arc::clone(&mailer), Some("owner@acme.com".to_string())).await;

        let Err(err) = service.handle_submission(Some(valid_payload())).await else {
            panic!("send failure did not propagate");
        };
        assert!(err.to_string().starts_with("Server error: "));

        // The submission was already durably stored.
        let Ok(rows) = service.list_submissions().await else {
            panic!("list failed");
        };
        assert_eq!(rows.len(), 1);
    }
}
