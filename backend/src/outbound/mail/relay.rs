//! Reqwest-backed mail relay adapter.
//!
//! The relay accepts one JSON message per request and answers 2xx once the
//! message is queued for delivery.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;

use crate::domain::ports::{MailMessage, Mailer, MailerError};

#[derive(Debug, Serialize)]
struct RelayMessageDto<'a> {
    from: &'a str,
    to: &'a str,
    to_name: &'a str,
    subject: &'a str,
    body: &'a str,
}

/// Mailer posting messages to an HTTP mail relay.
pub struct HttpMailRelay {
    client: Client,
    endpoint: Url,
    sender: String,
}

impl HttpMailRelay {
    /// Build a relay adapter sending as `sender` with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        sender: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            sender: sender.into(),
        })
    }
}

#[async_trait]
impl Mailer for HttpMailRelay {
    async fn mail_recipient(&self, message: &MailMessage) -> Result<(), MailerError> {
        let payload = RelayMessageDto {
            from: &self.sender,
            to: &message.recipient_email,
            to_name: &message.recipient_name,
            subject: &message.subject,
            body: &message.body,
        };
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|error| MailerError::unavailable(error.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(map_status_error(status, &message.recipient_email))
    }
}

fn map_status_error(status: StatusCode, recipient: &str) -> MailerError {
    let message = format!("relay answered status {}", status.as_u16());
    if status.is_client_error() {
        MailerError::rejected(recipient, message)
    } else {
        MailerError::unavailable(message)
    }
}
