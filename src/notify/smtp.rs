//! SMTP mailer over lettre's async tokio transport.

use async_trait::async_trait;
use lettre::address::AddressError;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{Mailer, NotificationError};
use crate::config::AppConfig;

const SMTP_HOST: &str = "smtp.gmail.com";
const SMTP_PORT: u16 = 587;

/// Gmail app passwords are 16 characters once spaces are removed.
const APP_PASSWORD_LEN: usize = 16;

struct SmtpSender {
    from: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

/// Gmail STARTTLS mailer.
///
/// Built unconditionally at startup so a misconfigured mail account never
/// prevents the server from booting; sends then fail per-request with
/// [`NotificationError::NotConfigured`].
pub struct SmtpMailer {
    inner: Option<SmtpSender>,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("configured", &self.inner.is_some())
            .finish()
    }
}

impl SmtpMailer {
    /// Builds the mailer from configuration.
    ///
    /// The app password is space-stripped before the length check (app
    /// passwords are often pasted with grouping spaces). Any credential
    /// problem is logged and leaves the mailer unconfigured.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let (Some(email), Some(raw_password)) = (
            config.gmail_email.as_deref(),
            config.gmail_app_password.as_deref(),
        ) else {
            tracing::warn!("GMAIL_EMAIL or GMAIL_APP_PASSWORD not set, mail sends will fail");
            return Self { inner: None };
        };

        let password = raw_password.replace(' ', "");
        if password.len() != APP_PASSWORD_LEN {
            tracing::warn!(
                length = password.len(),
                "GMAIL_APP_PASSWORD is not a 16-character app password, mail sends will fail"
            );
            return Self { inner: None };
        }

        let from = match email.parse::<Mailbox>() {
            Ok(mailbox) => mailbox,
            Err(e) => {
                tracing::warn!(error = %e, "GMAIL_EMAIL is not a valid address, mail sends will fail");
                return Self { inner: None };
            }
        };

        let transport = match AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(SMTP_HOST) {
            Ok(builder) => builder
                .port(SMTP_PORT)
                .credentials(Credentials::new(email.to_string(), password))
                .build(),
            Err(e) => {
                tracing::warn!(error = %e, "SMTP transport setup failed, mail sends will fail");
                return Self { inner: None };
            }
        };

        Self {
            inner: Some(SmtpSender { from, transport }),
        }
    }

    /// Whether credentials were accepted at startup.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.inner.is_some()
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotificationError> {
        let Some(sender) = &self.inner else {
            return Err(NotificationError::NotConfigured);
        };

        let recipient: Mailbox = to
            .parse()
            .map_err(|e: AddressError| NotificationError::InvalidAddress(e.to_string()))?;

        let message = Message::builder()
            .from(sender.from.clone())
            .to(recipient)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| NotificationError::Message(e.to_string()))?;

        sender
            .transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        tracing::debug!(to, subject, "mail sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    fn config_with(email: Option<&str>, password: Option<&str>) -> AppConfig {
        AppConfig {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            database_url: None,
            db_path: "./submissions.db".to_string(),
            debug: false,
            gmail_email: email.map(str::to_string),
            gmail_app_password: password.map(str::to_string),
            admin_key: None,
            owner_email: None,
        }
    }

    #[test]
    fn missing_credentials_leave_mailer_unconfigured() {
        let mailer = SmtpMailer::from_config(&config_with(None, None));
        assert!(!mailer.is_configured());
    }

    #[test]
    fn spaced_app_password_is_accepted() {
        let mailer = SmtpMailer::from_config(&config_with(
            Some("sender@gmail.com"),
            Some("abcd efgh ijkl mnop"),
        ));
        assert!(mailer.is_configured());
    }

    #[test]
    fn wrong_length_password_is_rejected() {
        let mailer =
            SmtpMailer::from_config(&config_with(Some("sender@gmail.com"), Some("tooshort")));
        assert!(!mailer.is_configured());
    }

    #[tokio::test]
    async fn unconfigured_send_fails_with_not_configured() {
        let mailer = SmtpMailer::from_config(&config_with(None, None));
        let result = mailer.send("a@acme.com", "subject", "body").await;
        assert!(matches!(result, Err(NotificationError::NotConfigured)));
    }
}
