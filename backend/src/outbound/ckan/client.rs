//! Reqwest-backed client for the host portal's action API.
//!
//! This adapter owns transport details only: endpoint construction, the API
//! token header, timeout and HTTP error mapping, and decoding of the action
//! envelope into the types each port expects.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url, header};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::ActionEnvelopeDto;
use crate::domain::ports::{
    Authorizer, AuthorizerError, HostUserActions, HostUserActionsError, PackageSearch,
    PackageSearchError, PackageSearchQuery, PackageSearchResult, UserDirectory,
    UserDirectoryError, UserListParams, UserSummary,
};
use crate::domain::{ActionContext, UserRecord};

const USER_AGENT: &str = "portal-password-policy/0.1";

/// Failure of one action call, before mapping into a port error.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum CkanCallError {
    Transport(String),
    Timeout(String),
    Status { status: u16, message: String },
    Rejected { message: String, details: Option<Value> },
    Decode(String),
}

impl CkanCallError {
    fn describe(&self) -> String {
        match self {
            Self::Transport(message) | Self::Decode(message) => message.clone(),
            Self::Timeout(message) => format!("timed out: {message}"),
            Self::Status { status, message } => format!("status {status}: {message}"),
            Self::Rejected { message, .. } => message.clone(),
        }
    }
}

/// Client calling host actions over HTTP.
pub struct CkanActionClient {
    client: Client,
    base: Url,
    api_token: Option<Zeroizing<String>>,
}

impl CkanActionClient {
    /// Build a client for the portal rooted at `base` with an explicit
    /// request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base: Url,
        timeout: Duration,
        api_token: Option<Zeroizing<String>>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base,
            api_token,
        })
    }

    fn endpoint(&self, action: &str) -> Result<Url, CkanCallError> {
        self.base
            .join(&format!("api/3/action/{action}"))
            .map_err(|error| CkanCallError::Transport(format!("invalid action URL: {error}")))
    }

    async fn call<P>(&self, action: &str, payload: &P) -> Result<Value, CkanCallError>
    where
        P: Serialize + ?Sized + Sync,
    {
        let mut request = self
            .client
            .post(self.endpoint(action)?)
            .header(header::ACCEPT, "application/json")
            .json(payload);
        if let Some(token) = &self.api_token {
            request = request.header(header::AUTHORIZATION, token.as_str());
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(action, status = status.as_u16(), bytes = body.len(), "host action answered");
        decode_response(status, body.as_ref())
    }
}

fn decode_response(status: StatusCode, body: &[u8]) -> Result<Value, CkanCallError> {
    if status.is_server_error() {
        return Err(map_status_error(status, body));
    }
    match serde_json::from_slice::<ActionEnvelopeDto>(body) {
        Ok(envelope) => envelope.into_result(),
        Err(_) if !status.is_success() => Err(map_status_error(status, body)),
        Err(error) => Err(CkanCallError::Decode(format!(
            "invalid action envelope: {error}"
        ))),
    }
}

fn map_transport_error(error: reqwest::Error) -> CkanCallError {
    if error.is_timeout() {
        CkanCallError::Timeout(error.to_string())
    } else {
        CkanCallError::Transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> CkanCallError {
    CkanCallError::Status {
        status: status.as_u16(),
        message: body_preview(body),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

fn decode_as<T: serde::de::DeserializeOwned>(value: Value, what: &str) -> Result<T, String> {
    serde_json::from_value(value).map_err(|error| format!("invalid {what} payload: {error}"))
}

#[async_trait]
impl PackageSearch for CkanActionClient {
    async fn search(
        &self,
        query: &PackageSearchQuery,
    ) -> Result<PackageSearchResult, PackageSearchError> {
        let result = self
            .call("package_search", query)
            .await
            .map_err(|error| match error {
                CkanCallError::Decode(message) => PackageSearchError::decode(message),
                other => PackageSearchError::unavailable(other.describe()),
            })?;
        decode_as(result, "package_search").map_err(PackageSearchError::decode)
    }
}

#[async_trait]
impl UserDirectory for CkanActionClient {
    async fn list_users(
        &self,
        params: &UserListParams,
    ) -> Result<Vec<UserSummary>, UserDirectoryError> {
        let result = self
            .call("user_list", params)
            .await
            .map_err(|error| match error {
                CkanCallError::Decode(message) => UserDirectoryError::decode(message),
                other => UserDirectoryError::unavailable(other.describe()),
            })?;
        decode_as(result, "user_list").map_err(UserDirectoryError::decode)
    }
}

#[async_trait]
impl Authorizer for CkanActionClient {
    async fn is_sysadmin(&self, user: &str) -> Result<bool, AuthorizerError> {
        match self.call("user_show", &json!({ "id": user })).await {
            Ok(result) => Ok(result
                .get("sysadmin")
                .and_then(Value::as_bool)
                .unwrap_or(false)),
            Err(CkanCallError::Rejected { message, .. }) => {
                debug!(user, %message, "user_show refused; treating caller as non-administrator");
                Ok(false)
            }
            Err(other) => Err(AuthorizerError::unavailable(other.describe())),
        }
    }
}

fn map_host_error(error: CkanCallError) -> HostUserActionsError {
    match error {
        CkanCallError::Rejected { message, details } => {
            HostUserActionsError::rejected(message, details)
        }
        other => HostUserActionsError::unavailable(other.describe()),
    }
}

fn decode_user(result: Value) -> Result<UserRecord, HostUserActionsError> {
    UserRecord::try_from(result)
        .map_err(|error| HostUserActionsError::unavailable(format!("invalid user payload: {error}")))
}

#[async_trait]
impl HostUserActions for CkanActionClient {
    async fn create_user(
        &self,
        context: &ActionContext,
        record: &UserRecord,
    ) -> Result<UserRecord, HostUserActionsError> {
        debug!(user = context.user(), "forwarding user_create");
        let result = self
            .call("user_create", record)
            .await
            .map_err(map_host_error)?;
        decode_user(result)
    }

    async fn update_user(
        &self,
        context: &ActionContext,
        record: &UserRecord,
    ) -> Result<UserRecord, HostUserActionsError> {
        debug!(user = context.user(), "forwarding user_update");
        let result = self
            .call("user_update", record)
            .await
            .map_err(map_host_error)?;
        decode_user(result)
    }
}
