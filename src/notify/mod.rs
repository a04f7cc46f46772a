//! Notification boundary: message templates and the SMTP mail transport.
//!
//! The core depends only on the [`Mailer`] trait; [`SmtpMailer`] is the
//! production implementation. Rendering the two message templates is the
//! core's job, transport and authentication belong to the mailer.

pub mod smtp;
pub mod templates;

pub use smtp::SmtpMailer;

use async_trait::async_trait;

/// Mail transport failure.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    /// Sender credentials were missing or malformed at startup.
    #[error("mail transport not configured: set GMAIL_EMAIL and GMAIL_APP_PASSWORD")]
    NotConfigured,

    /// Recipient address could not be parsed.
    #[error("invalid recipient address: {0}")]
    InvalidAddress(String),

    /// Message assembly failed.
    #[error("message build failed: {0}")]
    Message(String),

    /// SMTP-level failure (connection, TLS, authentication, delivery).
    #[error("smtp transport error: {0}")]
    Transport(String),
}

/// Contract the dispatcher relies on to deliver one plain-text message.
#[async_trait]
pub trait Mailer: Send + Sync + std::fmt::Debug {
    /// Delivers `body` to `to` with the given subject.
    ///
    /// # Errors
    ///
    /// Returns a [`NotificationError`] on any transport or addressing
    /// failure; failures propagate to the caller, nothing is retried.
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotificationError>;
}

/// In-memory mailer recording every send, for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockMailer {
    /// Recorded `(to, subject)` pairs.
    pub sent: std::sync::Mutex<Vec<(String, String)>>,
    /// When set, every send fails with a transport error.
    pub fail: bool,
}

#[cfg(test)]
impl MockMailer {
    /// A mailer that rejects every send.
    pub fn failing() -> Self {
        Self {
            sent: std::sync::Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Snapshot of recorded sends.
    pub fn recorded(&self) -> Vec<(String, String)> {
        self.sent.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> Result<(), NotificationError> {
        if self.fail {
            return Err(NotificationError::Transport("mock failure".to_string()));
        }
        if let Ok(mut sent) = self.sent.lock() {
            sent.push((to.to_string(), subject.to_string()));
        }
        Ok(())
    }
}
