//! Recording test doubles for the host ports.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use portal::domain::ports::{
    Authorizer, AuthorizerError, HostUserActions, HostUserActionsError, MailMessage, Mailer,
    MailerError, UserDirectory, UserDirectoryError, UserListParams, UserSummary,
};
use portal::domain::{ActionContext, UserRecord};

/// Which host action a record was forwarded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCall {
    Create,
    Update,
}

/// Host double storing every forwarded record and echoing it back.
#[derive(Clone, Default)]
pub struct RecordingHost {
    calls: Arc<Mutex<Vec<(HostCall, Option<String>, UserRecord)>>>,
}

impl RecordingHost {
    pub fn calls(&self) -> Vec<(HostCall, Option<String>, UserRecord)> {
        self.calls.lock().expect("host calls lock").clone()
    }

    fn record(&self, call: HostCall, context: &ActionContext, record: &UserRecord) -> UserRecord {
        self.calls.lock().expect("host calls lock").push((
            call,
            context.user().map(str::to_owned),
            record.clone(),
        ));
        record.clone()
    }
}

#[async_trait]
impl HostUserActions for RecordingHost {
    async fn create_user(
        &self,
        context: &ActionContext,
        record: &UserRecord,
    ) -> Result<UserRecord, HostUserActionsError> {
        Ok(self.record(HostCall::Create, context, record))
    }

    async fn update_user(
        &self,
        context: &ActionContext,
        record: &UserRecord,
    ) -> Result<UserRecord, HostUserActionsError> {
        Ok(self.record(HostCall::Update, context, record))
    }
}

/// Directory double returning a fixed user list and counting calls.
#[derive(Clone, Default)]
pub struct RecordingDirectory {
    users: Vec<UserSummary>,
    calls: Arc<Mutex<usize>>,
}

impl RecordingDirectory {
    pub fn with_users(users: Vec<UserSummary>) -> Self {
        Self {
            users,
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().expect("directory calls lock")
    }
}

#[async_trait]
impl UserDirectory for RecordingDirectory {
    async fn list_users(
        &self,
        _params: &UserListParams,
    ) -> Result<Vec<UserSummary>, UserDirectoryError> {
        *self.calls.lock().expect("directory calls lock") += 1;
        Ok(self.users.clone())
    }
}

/// Mailer double recording messages and failing for chosen addresses.
#[derive(Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<MailMessage>>>,
    failing: BTreeSet<String>,
}

impl RecordingMailer {
    pub fn failing_for(addresses: &[&str]) -> Self {
        Self {
            sent: Arc::default(),
            failing: addresses.iter().map(|address| (*address).to_owned()).collect(),
        }
    }

    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().expect("mail lock").clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn mail_recipient(&self, message: &MailMessage) -> Result<(), MailerError> {
        if self.failing.contains(&message.recipient_email) {
            return Err(MailerError::rejected(
                message.recipient_email.clone(),
                "mailbox unavailable",
            ));
        }
        self.sent.lock().expect("mail lock").push(message.clone());
        Ok(())
    }
}

/// Authoriser double recording which callers were checked.
#[derive(Clone, Default)]
pub struct RecordingAuthorizer {
    admins: BTreeSet<String>,
    checked: Arc<Mutex<Vec<String>>>,
}

impl RecordingAuthorizer {
    pub fn admins(names: &[&str]) -> Self {
        Self {
            admins: names.iter().map(|name| (*name).to_owned()).collect(),
            checked: Arc::default(),
        }
    }

    pub fn checked(&self) -> Vec<String> {
        self.checked.lock().expect("authorizer lock").clone()
    }
}

#[async_trait]
impl Authorizer for RecordingAuthorizer {
    async fn is_sysadmin(&self, user: &str) -> Result<bool, AuthorizerError> {
        self.checked
            .lock()
            .expect("authorizer lock")
            .push(user.to_owned());
        Ok(self.admins.contains(user))
    }
}

/// Convenience constructor for listed users.
pub fn user(name: &str, email: &str, display_name: &str) -> UserSummary {
    UserSummary {
        name: name.to_owned(),
        email: Some(email.to_owned()),
        display_name: display_name.to_owned(),
    }
}
