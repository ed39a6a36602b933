//! Port for the host's own user create and update actions.
//!
//! Records reaching this port have already passed the password schema; the
//! host applies its persistence rules and returns the stored user.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::{ActionContext, PASSWORD, PASSWORD1, PASSWORD2, UserRecord};

/// Errors raised by host user action adapters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HostUserActionsError {
    /// The host refused the record (duplicate name, unknown user, ...).
    #[error("host rejected the user record: {message}")]
    Rejected {
        message: String,
        details: Option<Value>,
    },
    /// The host could not be reached.
    #[error("host user actions unavailable: {message}")]
    Unavailable { message: String },
}

impl HostUserActionsError {
    /// Helper for refused records.
    pub fn rejected(message: impl Into<String>, details: Option<Value>) -> Self {
        Self::Rejected {
            message: message.into(),
            details,
        }
    }

    /// Helper for transport failures.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Driven port wrapping the host's core `user_create` and `user_update`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostUserActions: Send + Sync {
    /// Persist a new user and return it as stored.
    async fn create_user(
        &self,
        context: &ActionContext,
        record: &UserRecord,
    ) -> Result<UserRecord, HostUserActionsError>;

    /// Update an existing user and return it as stored.
    async fn update_user(
        &self,
        context: &ActionContext,
        record: &UserRecord,
    ) -> Result<UserRecord, HostUserActionsError>;
}

/// Host fixture echoing the record back without password fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureHostUserActions;

impl FixtureHostUserActions {
    fn stored(record: &UserRecord) -> UserRecord {
        let mut stored = record.clone();
        for field in [PASSWORD, PASSWORD1, PASSWORD2] {
            stored.remove(field);
        }
        stored
    }
}

#[async_trait]
impl HostUserActions for FixtureHostUserActions {
    async fn create_user(
        &self,
        _context: &ActionContext,
        record: &UserRecord,
    ) -> Result<UserRecord, HostUserActionsError> {
        Ok(Self::stored(record))
    }

    async fn update_user(
        &self,
        _context: &ActionContext,
        record: &UserRecord,
    ) -> Result<UserRecord, HostUserActionsError> {
        Ok(Self::stored(record))
    }
}
