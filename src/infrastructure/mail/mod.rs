//! Outbound email
//!
//! Services depend on the `Mailer` trait; the default implementation writes
//! each message to the log instead of talking to an SMTP relay.

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::config::MailConfig;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail delivery failed: {0}")]
    Delivery(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl MailMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: MailMessage) -> Result<(), MailError>;
}

/// Mailer that records messages through `tracing`
pub struct LogMailer {
    from: String,
    enabled: bool,
}

impl LogMailer {
    pub fn new(config: &MailConfig) -> Self {
        Self {
            from: config.from.clone(),
            enabled: config.enabled,
        }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        if !self.enabled {
            return Ok(());
        }
        if !message.to.contains('@') {
            return Err(MailError::Delivery(format!(
                "invalid recipient address '{}'",
                message.to
            )));
        }
        info!(
            from = %self.from,
            to = %message.to,
            subject = %message.subject,
            "📧 Email sent"
        );
        tracing::debug!(body = %message.body, "Email body");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn log_mailer_rejects_bad_addresses() {
        let mailer = LogMailer::new(&MailConfig::default());
        assert!(mailer
            .send(MailMessage::new("tech@imas.local", "Hi", "Body"))
            .await
            .is_ok());
        assert!(mailer
            .send(MailMessage::new("nobody", "Hi", "Body"))
            .await
            .is_err());
    }
}
