//! Port for the outbound mail transport.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// One plain-text message to a single recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailMessage {
    /// Name the recipient is addressed by.
    pub recipient_name: String,
    /// Recipient address.
    pub recipient_email: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Errors raised by mail adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MailerError {
    /// The mail transport could not be reached.
    #[error("mail transport unavailable: {message}")]
    Unavailable { message: String },
    /// The mail transport refused the message.
    #[error("mail rejected for {recipient}: {message}")]
    Rejected { recipient: String, message: String },
}

impl MailerError {
    /// Helper for transport failures.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Helper for refused messages.
    pub fn rejected(recipient: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected {
            recipient: recipient.into(),
            message: message.into(),
        }
    }
}

/// Driven port sending mail to one recipient per call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver `message`.
    async fn mail_recipient(&self, message: &MailMessage) -> Result<(), MailerError>;
}
