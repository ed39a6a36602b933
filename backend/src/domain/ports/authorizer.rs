//! Port for the host's administrator check.

use std::collections::BTreeSet;

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by authorisation adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizerError {
    /// The authorisation service could not be reached.
    #[error("authorisation check unavailable: {message}")]
    Unavailable { message: String },
}

impl AuthorizerError {
    /// Helper for transport failures.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Driven port answering whether a user is a portal administrator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authorizer: Send + Sync {
    /// Whether `user` holds system administrator rights.
    async fn is_sysadmin(&self, user: &str) -> Result<bool, AuthorizerError>;
}

/// Authoriser backed by a fixed set of administrator names.
///
/// # Examples
/// ```
/// use portal::domain::ports::StaticAuthorizer;
///
/// let authorizer = StaticAuthorizer::new(["admin"]);
/// assert!(authorizer.contains("admin"));
/// assert!(!authorizer.contains("guest"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct StaticAuthorizer {
    sysadmins: BTreeSet<String>,
}

impl StaticAuthorizer {
    /// Build an authoriser granting rights to `sysadmins`.
    pub fn new<I, S>(sysadmins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sysadmins: sysadmins.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `user` is listed as an administrator.
    pub fn contains(&self, user: &str) -> bool {
        self.sysadmins.contains(user)
    }
}

#[async_trait]
impl Authorizer for StaticAuthorizer {
    async fn is_sysadmin(&self, user: &str) -> Result<bool, AuthorizerError> {
        Ok(self.contains(user))
    }
}
