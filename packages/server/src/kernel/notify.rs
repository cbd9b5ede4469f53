//! Outbound notification senders behind trait abstractions.
//!
//! Delivery is best-effort everywhere: callers log failures and carry on,
//! since a verification code stays valid whether or not the message arrived.

use anyhow::Result;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

/// Outbound email sender
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

/// Outbound SMS sender
#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send_sms(&self, to: &str, body: &str) -> Result<()>;
}

/// SMTP-backed mailer
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    pub fn new(host: &str, username: &str, password: &str, from: &str) -> Result<Self> {
        let creds = Credentials::new(username.to_string(), password.to_string());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
            .credentials(creds)
            .build();

        Ok(Self {
            transport,
            from: from.to_string(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let message = Message::builder()
            .from(self.from.parse()?)
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        self.transport.send(message).await?;
        Ok(())
    }
}

/// Placeholder SMS sender that logs the message instead of delivering it.
///
/// Must be replaced with a real SMS gateway before production use.
pub struct LogSmsSender;

#[async_trait]
impl SmsSender for LogSmsSender {
    async fn send_sms(&self, to: &str, body: &str) -> Result<()> {
        info!("SMS to {}: {}", to, body);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_sms_sender_always_succeeds() {
        let sender = LogSmsSender;
        assert!(sender.send_sms("+15551234567", "code 123456").await.is_ok());
    }
}
