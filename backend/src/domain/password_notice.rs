//! Bulk password-policy notice sent by administrators to every user.
//!
//! The action lists users through the host, renders one notice per user with
//! a contact address and hands each to the mailer in turn. A failed send is
//! recorded and the loop moves on to the next user.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::ports::{
    Authorizer, AuthorizerError, MailMessage, Mailer, UserDirectory, UserDirectoryError,
    UserListParams, UserSummary,
};
use crate::domain::{ActionContext, Error};

/// Default deadline quoted in the notice body.
pub const DEFAULT_PASS_DATE: &str = "24th June 2020";

/// Subject line of every notice.
pub const NOTICE_SUBJECT: &str = "Login security update for Open Data DK portal";

/// Message returned when the caller is not an administrator.
pub const NOT_AUTHORIZED_MESSAGE: &str = "You are not authorized to access this list";

/// Report message when every notice was handed to the mailer.
pub const SENT_SUCCESSFULLY_MESSAGE: &str = "Email Sent Successfully";

/// Settings for the notice text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeSettings {
    /// Date after which old passwords stop working.
    pub pass_date: String,
}

impl NoticeSettings {
    /// Settings quoting `pass_date` as the deadline.
    pub fn new(pass_date: impl Into<String>) -> Self {
        Self {
            pass_date: pass_date.into(),
        }
    }
}

impl Default for NoticeSettings {
    fn default() -> Self {
        Self::new(DEFAULT_PASS_DATE)
    }
}

/// Render the notice body addressed to `display_name`.
///
/// # Examples
/// ```
/// use portal::domain::render_notice_body;
///
/// let body = render_notice_body("Ada", "1st May 2021");
/// assert!(body.starts_with("Hello Ada,\n\n"));
/// assert_eq!(body.matches("1st May 2021").count(), 2);
/// ```
pub fn render_notice_body(display_name: &str, pass_date: &str) -> String {
    format!(
        "Hello {display_name},\n\n\
We are improving our user login password security according to the industry \
standards. Please update your current account password according to the new \
password criteria stated below. \n\n\
- Your new password should be of minimum 8 characters or longer\n\
- Should have at least one of each\n  \
- capital letter\n  \
- one small letter\n  \
- one number(0-9)\n  \
- one special character\n\
For example, the structure of the password should be similar to this \"Capsmall12!@\".\n\n\
Make sure to update your password before {pass_date}. After {pass_date}, you would not \
be able to login using your old password (which does not meet the criteria stated above).\n\n\
Have a great day.\n\n\
---\n\n\
Message sent by Open Data DK -  (https://admin.opendata.dk)"
    )
}

/// A notice the mailer failed to deliver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoticeFailure {
    /// Login name of the recipient.
    pub user: String,
    /// Mailer error text.
    pub reason: String,
}

/// Outcome of one bulk notice run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoticeReport {
    /// Login names whose notice was handed to the mailer.
    pub sent: Vec<String>,
    /// Number of users skipped for lacking a contact address.
    pub skipped: usize,
    /// Notices the mailer refused or could not deliver.
    pub failures: Vec<NoticeFailure>,
}

impl NoticeReport {
    /// Whether every attempted notice was delivered.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable summary returned to the caller.
    pub fn message(&self) -> String {
        if self.is_complete() {
            return SENT_SUCCESSFULLY_MESSAGE.to_owned();
        }
        let attempted = self.sent.len() + self.failures.len();
        format!(
            "Email sent to {} of {attempted} users; {} failed",
            self.sent.len(),
            self.failures.len()
        )
    }
}

/// Service implementing `send_password_notice_email`.
pub struct PasswordNoticeService<A: ?Sized, D: ?Sized, M: ?Sized> {
    authorizer: Arc<A>,
    directory: Arc<D>,
    mailer: Arc<M>,
    settings: NoticeSettings,
}

impl<A: ?Sized, D: ?Sized, M: ?Sized> Clone for PasswordNoticeService<A, D, M> {
    fn clone(&self) -> Self {
        Self {
            authorizer: Arc::clone(&self.authorizer),
            directory: Arc::clone(&self.directory),
            mailer: Arc::clone(&self.mailer),
            settings: self.settings.clone(),
        }
    }
}

impl<A: ?Sized, D: ?Sized, M: ?Sized> PasswordNoticeService<A, D, M> {
    /// Create a service from its collaborators.
    pub fn new(
        authorizer: Arc<A>,
        directory: Arc<D>,
        mailer: Arc<M>,
        settings: NoticeSettings,
    ) -> Self {
        Self {
            authorizer,
            directory,
            mailer,
            settings,
        }
    }

    /// Settings used to render notices.
    pub fn settings(&self) -> &NoticeSettings {
        &self.settings
    }
}

impl<A, D, M> PasswordNoticeService<A, D, M>
where
    A: Authorizer + ?Sized,
    D: UserDirectory + ?Sized,
    M: Mailer + ?Sized,
{
    /// Mail the notice to every listed user with a contact address.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] with `Forbidden` when the caller is not an
    /// administrator and `ServiceUnavailable` when the authorisation check or
    /// the user listing fails. Individual mail failures are reported in the
    /// [`NoticeReport`] instead.
    pub async fn send(
        &self,
        context: &ActionContext,
        params: &UserListParams,
    ) -> Result<NoticeReport, Error> {
        self.ensure_sysadmin(context).await?;

        let users = self
            .directory
            .list_users(params)
            .await
            .map_err(Self::map_directory_error)?;

        let mut report = NoticeReport::default();
        for user in &users {
            let Some(message) = self.notice_for(user) else {
                report.skipped += 1;
                continue;
            };
            match self.mailer.mail_recipient(&message).await {
                Ok(()) => report.sent.push(user.name.clone()),
                Err(err) => {
                    warn!(user = %user.name, error = %err, "password notice not delivered");
                    report.failures.push(NoticeFailure {
                        user: user.name.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!(
            listed = users.len(),
            sent = report.sent.len(),
            skipped = report.skipped,
            failed = report.failures.len(),
            "password notice run finished"
        );
        Ok(report)
    }

    async fn ensure_sysadmin(&self, context: &ActionContext) -> Result<(), Error> {
        let Some(user) = context.user() else {
            return Err(Error::forbidden(NOT_AUTHORIZED_MESSAGE));
        };
        let allowed = self
            .authorizer
            .is_sysadmin(user)
            .await
            .map_err(Self::map_authorizer_error)?;
        if allowed {
            Ok(())
        } else {
            info!(user, "password notice refused for non-administrator");
            Err(Error::forbidden(NOT_AUTHORIZED_MESSAGE))
        }
    }

    fn notice_for(&self, user: &UserSummary) -> Option<MailMessage> {
        let email = user.mail_address()?;
        Some(MailMessage {
            recipient_name: user.name.clone(),
            recipient_email: email.to_owned(),
            subject: NOTICE_SUBJECT.to_owned(),
            body: render_notice_body(&user.display_name, &self.settings.pass_date),
        })
    }

    fn map_authorizer_error(error: AuthorizerError) -> Error {
        match error {
            AuthorizerError::Unavailable { message } => {
                Error::service_unavailable(format!("authorisation check unavailable: {message}"))
            }
        }
    }

    fn map_directory_error(error: UserDirectoryError) -> Error {
        match error {
            UserDirectoryError::Unavailable { message } => {
                Error::service_unavailable(format!("user listing unavailable: {message}"))
            }
            UserDirectoryError::Decode { message } => {
                Error::internal(format!("user listing returned an invalid payload: {message}"))
            }
        }
    }
}

#[cfg(test)]
#[path = "password_notice_tests.rs"]
mod tests;
