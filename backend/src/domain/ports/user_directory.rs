//! Port for the host's user listing service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Filters forwarded to the host's `user_list` action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserListParams {
    /// Free-text filter on user names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Field to order the listing by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
}

/// Registered user as reported by the listing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Login name.
    pub name: String,
    /// Contact address; blank or missing for users without one.
    #[serde(default)]
    pub email: Option<String>,
    /// Name shown in the portal.
    #[serde(default)]
    pub display_name: String,
}

impl UserSummary {
    /// Contact address if the user has a non-empty one.
    pub fn mail_address(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }
}

/// Errors raised by user listing adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserDirectoryError {
    /// The listing service could not be reached.
    #[error("user listing unavailable: {message}")]
    Unavailable { message: String },
    /// The listing service answered with an unreadable payload.
    #[error("user listing returned an invalid payload: {message}")]
    Decode { message: String },
}

impl UserDirectoryError {
    /// Helper for transport failures.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Helper for payload decoding failures.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Driven port wrapping the host's `user_list` action.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Return every registered user matching `params`.
    async fn list_users(
        &self,
        params: &UserListParams,
    ) -> Result<Vec<UserSummary>, UserDirectoryError>;
}

/// Directory fixture with no registered users.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDirectory;

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn list_users(
        &self,
        _params: &UserListParams,
    ) -> Result<Vec<UserSummary>, UserDirectoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn summary(email: Option<&str>) -> UserSummary {
        UserSummary {
            name: "ada".to_owned(),
            email: email.map(str::to_owned),
            display_name: "Ada".to_owned(),
        }
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("   "), None)]
    #[case(Some("ada@example.org"), Some("ada@example.org"))]
    fn mail_address_skips_blank_emails(
        #[case] email: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(summary(email).mail_address(), expected);
    }

    #[rstest]
    fn decodes_host_payload_with_null_email() {
        let decoded: UserSummary = serde_json::from_value(serde_json::json!({
            "name": "a",
            "email": null,
            "display_name": "A",
            "sysadmin": false,
        }))
        .expect("user summary");
        assert_eq!(decoded.mail_address(), None);
    }
}
