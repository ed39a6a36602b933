//! Domain primitives and services of the password policy extension.
//!
//! Purpose: validate user records against the password policy, run the user
//! actions and the bulk notice, and serve the dataset helpers. Host services
//! are reached only through the traits in [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - UserRecord: user data as submitted to an action.
//! - UserSchema: per-field validator chains and the validation runner.
//! - UserActionService, PasswordNoticeService, DatasetHelpers: action
//!   services wired by the inbound adapter.

mod context;
mod datasets;
pub mod error;
mod error_bag;
mod password;
mod password_notice;
pub mod ports;
mod record;
mod schema;
mod user_actions;

pub use self::context::ActionContext;
pub use self::datasets::{DatasetHelper, DatasetHelpers, HELPER_ROWS, UnknownHelper};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::error_bag::{ErrorBag, FieldPath};
pub use self::password::{
    MIN_PASSWORD_LENGTH, NOT_A_STRING_MESSAGE, PasswordInput, PasswordPolicyError,
    PasswordRequirements, ValueKind, WEAK_PASSWORD_MESSAGE, validate_password,
};
pub use self::password_notice::{
    DEFAULT_PASS_DATE, NOT_AUTHORIZED_MESSAGE, NOTICE_SUBJECT, NoticeFailure, NoticeReport,
    NoticeSettings, PasswordNoticeService, SENT_SUCCESSFULLY_MESSAGE, render_notice_body,
};
pub use self::record::{NotAnObject, PASSWORD, PASSWORD1, PASSWORD2, UserRecord};
pub use self::schema::{
    BOTH_PASSWORDS_MESSAGE, MISSING_VALUE_MESSAGE, NOT_TEXT_MESSAGE, Operation,
    PASSWORDS_MISMATCH_MESSAGE, UserSchema, Validator, ValidatorChain, build_user_schema,
    override_password_fields,
};
pub use self::user_actions::{UserActionService, VALIDATION_FAILED_MESSAGE};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use portal::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
