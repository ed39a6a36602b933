//! User create and update actions guarded by the password schema.
//!
//! Each action builds the schema for its operation and submission shape,
//! validates the incoming record and forwards the converted record to the
//! host's core action. Nothing reaches the host when validation fails.
//!
//! Form submissions set a password only through `password1` and its
//! confirmation; a `password` sent alongside them is discarded.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::ports::{HostUserActions, HostUserActionsError};
use crate::domain::{
    ActionContext, Error, ErrorBag, Operation, PASSWORD, PASSWORD1, PASSWORD2, UserRecord,
    build_user_schema,
};

/// Message carried by the error returned for records failing validation.
pub const VALIDATION_FAILED_MESSAGE: &str = "user data failed validation";

/// Service implementing the `user_create` and `user_update` actions.
pub struct UserActionService<H: ?Sized> {
    host: Arc<H>,
}

impl<H: ?Sized> Clone for UserActionService<H> {
    fn clone(&self) -> Self {
        Self {
            host: Arc::clone(&self.host),
        }
    }
}

impl<H: ?Sized> UserActionService<H> {
    /// Create a service forwarding accepted records to `host`.
    pub fn new(host: Arc<H>) -> Self {
        Self { host }
    }
}

impl<H> UserActionService<H>
where
    H: HostUserActions + ?Sized,
{
    /// Validate `record` with the create schema and forward it to the host.
    pub async fn create_user(
        &self,
        context: &ActionContext,
        record: &UserRecord,
    ) -> Result<UserRecord, Error> {
        let accepted = Self::accept(Operation::Create, context, record)?;
        self.host
            .create_user(context, &accepted)
            .await
            .map_err(Self::map_host_error)
    }

    /// Validate `record` with the update schema and forward it to the host.
    pub async fn update_user(
        &self,
        context: &ActionContext,
        record: &UserRecord,
    ) -> Result<UserRecord, Error> {
        let accepted = Self::accept(Operation::Update, context, record)?;
        self.host
            .update_user(context, &accepted)
            .await
            .map_err(Self::map_host_error)
    }

    fn accept(
        operation: Operation,
        context: &ActionContext,
        record: &UserRecord,
    ) -> Result<UserRecord, Error> {
        let schema = build_user_schema(operation, context.is_form_submission());
        let submitted = Self::submitted_fields(context, record);
        match schema.validate(&submitted) {
            Ok(converted) => {
                debug!(
                    %operation,
                    form = context.is_form_submission(),
                    "user record accepted"
                );
                Ok(Self::prepare_for_host(operation, converted))
            }
            Err(errors) => {
                info!(
                    %operation,
                    form = context.is_form_submission(),
                    fields = errors.len(),
                    "user record rejected"
                );
                Err(Self::validation_error(&errors))
            }
        }
    }

    fn submitted_fields(context: &ActionContext, record: &UserRecord) -> UserRecord {
        let mut submitted = record.clone();
        if context.is_form_submission() && submitted.remove(PASSWORD).is_some() {
            debug!("password field ignored on form submission");
        }
        submitted
    }

    /// Drop confirmation fields and, on update, a blank password so the host
    /// leaves the stored one unchanged.
    fn prepare_for_host(operation: Operation, mut record: UserRecord) -> UserRecord {
        record.remove(PASSWORD1);
        record.remove(PASSWORD2);
        let blank_password = match record.get(PASSWORD) {
            Some(Value::Null) => true,
            Some(Value::String(password)) => password.is_empty(),
            _ => false,
        };
        if operation == Operation::Update && blank_password {
            record.remove(PASSWORD);
        }
        record
    }

    fn validation_error(errors: &ErrorBag) -> Error {
        match serde_json::to_value(errors) {
            Ok(details) => Error::invalid_request(VALIDATION_FAILED_MESSAGE).with_details(details),
            Err(err) => Error::internal(format!("failed to serialize validation errors: {err}")),
        }
    }

    fn map_host_error(error: HostUserActionsError) -> Error {
        match error {
            HostUserActionsError::Rejected { message, details } => {
                let error = Error::invalid_request(format!("host rejected user: {message}"));
                match details {
                    Some(details) => error.with_details(details),
                    None => error,
                }
            }
            HostUserActionsError::Unavailable { message } => {
                warn!(%message, "host user actions unavailable");
                Error::service_unavailable(format!("host user actions unavailable: {message}"))
            }
        }
    }
}

#[cfg(test)]
#[path = "user_actions_tests.rs"]
mod tests;
