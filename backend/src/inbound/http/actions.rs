//! Action API handlers.
//!
//! ```text
//! POST /api/3/action/user_create {"name":"ada","email":"ada@example.org","password":"Capsmall12!@"}
//! POST /api/3/action/user_update {"id":"ada","email":"ada@example.org","password1":"...","password2":"..."}
//! POST /api/3/action/send_password_notice_email {}
//! ```
//!
//! Successful calls answer with the portal's action envelope
//! `{"success": true, "result": ...}`.

use actix_web::{post, web};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::ports::UserListParams;
use crate::domain::{ActionContext, Error, UserRecord};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::RemoteUser;
use crate::inbound::http::state::HttpState;

/// Action overriding the host's user creation.
pub const USER_CREATE: &str = "user_create";
/// Action overriding the host's user update.
pub const USER_UPDATE: &str = "user_update";
/// Administrator action mailing the password notice to every user.
pub const SEND_PASSWORD_NOTICE: &str = "send_password_notice_email";

/// Success envelope shared by every action.
#[derive(Debug, Serialize)]
pub struct ActionResponse<T> {
    pub success: bool,
    pub result: T,
}

impl<T> ActionResponse<T> {
    /// Wrap `result` in a success envelope.
    pub fn ok(result: T) -> web::Json<Self> {
        web::Json(Self {
            success: true,
            result,
        })
    }
}

/// Dispatch a portal action by name.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use portal::inbound::http::actions::call_action;
///
/// let _app = App::new().service(call_action);
/// ```
#[post("/api/3/action/{action}")]
pub async fn call_action(
    state: web::Data<HttpState>,
    caller: RemoteUser,
    action: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<web::Json<ActionResponse<Value>>> {
    let action = action.into_inner();
    let payload = parse_body(&body)?;
    let context = caller
        .name()
        .map_or_else(ActionContext::anonymous, ActionContext::for_user);
    debug!(action = action.as_str(), user = context.user(), "action called");

    let result = match action.as_str() {
        USER_CREATE => {
            let record = user_record(payload)?;
            let context = context.with_form_submission(record.has_confirmation_fields());
            let created = state.user_actions.create_user(&context, &record).await?;
            Value::Object(created.into_inner())
        }
        USER_UPDATE => {
            let record = user_record(payload)?;
            let context = context.with_form_submission(record.has_confirmation_fields());
            let updated = state.user_actions.update_user(&context, &record).await?;
            Value::Object(updated.into_inner())
        }
        SEND_PASSWORD_NOTICE => {
            let params = list_params(payload)?;
            let report = state.notices.send(&context, &params).await?;
            Value::String(report.message())
        }
        unknown => return Err(Error::not_found(format!("Action name not known: {unknown}"))),
    };
    Ok(ActionResponse::ok(result))
}

fn parse_body(body: &[u8]) -> Result<Value, Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body)
        .map_err(|err| Error::invalid_request(format!("request body is not valid JSON: {err}")))
}

fn user_record(payload: Value) -> Result<UserRecord, Error> {
    UserRecord::try_from(payload).map_err(|err| Error::invalid_request(err.to_string()))
}

fn list_params(payload: Value) -> Result<UserListParams, Error> {
    serde_json::from_value(payload)
        .map_err(|err| Error::invalid_request(format!("invalid user list parameters: {err}")))
}

#[cfg(test)]
#[path = "actions_tests.rs"]
mod tests;
