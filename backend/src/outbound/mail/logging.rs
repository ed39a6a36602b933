//! Mailer that only logs outgoing messages.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{MailMessage, Mailer, MailerError};

/// Mailer logging each message instead of delivering it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingMailer;

#[async_trait]
impl Mailer for LoggingMailer {
    async fn mail_recipient(&self, message: &MailMessage) -> Result<(), MailerError> {
        info!(
            recipient = %message.recipient_name,
            email = %message.recipient_email,
            subject = %message.subject,
            body_chars = message.body.chars().count(),
            "mail relay not configured; message logged only"
        );
        Ok(())
    }
}
