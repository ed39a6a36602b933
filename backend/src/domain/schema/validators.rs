//! Behaviour of each [`Validator`] step.
//!
//! Steps read and rewrite the working copy of the record, append messages to
//! the shared [`ErrorBag`] and tell the runner whether the rest of the chain
//! should run.

use serde_json::Value;

use super::{Operation, Validator};
use crate::domain::error_bag::ErrorBag;
use crate::domain::password::{PasswordInput, validate_password};
use crate::domain::record::{PASSWORD, PASSWORD1, PASSWORD2, UserRecord, text_form};

/// Reported when a required value is absent or empty.
pub const MISSING_VALUE_MESSAGE: &str = "Missing value";
/// Reported when one of the form password fields is left blank.
pub const BOTH_PASSWORDS_MESSAGE: &str = "Please enter both passwords";
/// Reported when the form password fields disagree.
pub const PASSWORDS_MISMATCH_MESSAGE: &str = "The passwords you entered do not match";
/// Reported when a value has no text form.
pub const NOT_TEXT_MESSAGE: &str = "Value must be text";

/// Whether the runner continues with the next step of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Flow {
    Continue,
    Stop,
}

impl Validator {
    pub(super) fn apply(
        self,
        field: &str,
        data: &mut UserRecord,
        errors: &mut ErrorBag,
        operation: Operation,
    ) -> Flow {
        match self {
            Self::PasswordPolicy => password_policy(field, data, errors),
            Self::PasswordNotEmpty => password_not_empty(field, data, errors, operation),
            Self::IgnoreMissing => ignore_missing(field, data),
            Self::CoerceText => coerce_text(field, data, errors),
            Self::BothPasswordsEntered => both_passwords_entered(data, errors),
            Self::PasswordsMatch => passwords_match(field, data, errors),
            Self::NotEmpty => not_empty(field, data, errors),
        }
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(Value::Bool(_) | Value::Number(_)) => false,
    }
}

// Errors always land under `password`, whichever form field is checked.
fn password_policy(field: &str, data: &UserRecord, errors: &mut ErrorBag) -> Flow {
    if let Err(err) = validate_password(PasswordInput::from_field(data.get(field))) {
        errors.push(PASSWORD, err.to_string());
    }
    Flow::Continue
}

fn password_not_empty(
    field: &str,
    data: &UserRecord,
    errors: &mut ErrorBag,
    operation: Operation,
) -> Flow {
    if data.has_confirmation_fields() {
        return Flow::Continue;
    }
    let missing = match data.get(field) {
        None => operation == Operation::Create,
        Some(value) => is_blank(Some(value)),
    };
    if missing {
        errors.push(field, MISSING_VALUE_MESSAGE);
    }
    Flow::Continue
}

fn ignore_missing(field: &str, data: &mut UserRecord) -> Flow {
    match data.get(field) {
        None | Some(Value::Null) => {
            data.remove(field);
            Flow::Stop
        }
        Some(_) => Flow::Continue,
    }
}

fn coerce_text(field: &str, data: &mut UserRecord, errors: &mut ErrorBag) -> Flow {
    match data.get(field) {
        Some(Value::String(_)) => Flow::Continue,
        None | Some(Value::Null) => {
            errors.push(field, MISSING_VALUE_MESSAGE);
            Flow::Stop
        }
        Some(Value::Array(_) | Value::Object(_)) => {
            errors.push(field, NOT_TEXT_MESSAGE);
            Flow::Stop
        }
        value @ Some(Value::Bool(_) | Value::Number(_)) => {
            if let Some(text) = text_form(value) {
                data.insert(field, Value::String(text));
            }
            Flow::Continue
        }
    }
}

fn both_passwords_entered(data: &UserRecord, errors: &mut ErrorBag) -> Flow {
    if is_blank(data.get(PASSWORD1)) || is_blank(data.get(PASSWORD2)) {
        errors.push(PASSWORD, BOTH_PASSWORDS_MESSAGE);
    }
    Flow::Continue
}

fn passwords_match(field: &str, data: &mut UserRecord, errors: &mut ErrorBag) -> Flow {
    let first = data.get(PASSWORD1);
    let second = data.get(PASSWORD2);
    let agree = first == second
        || matches!(
            (text_form(first), text_form(second)),
            (Some(a), Some(b)) if a == b
        );

    if !agree {
        errors.push(field, PASSWORDS_MISMATCH_MESSAGE);
        return Flow::Continue;
    }

    let confirmed = text_form(first)
        .map(Value::String)
        .or_else(|| first.cloned());
    if let Some(password) = confirmed {
        data.insert(PASSWORD, password);
    }
    Flow::Continue
}

fn not_empty(field: &str, data: &UserRecord, errors: &mut ErrorBag) -> Flow {
    if is_blank(data.get(field)) {
        errors.push(field, MISSING_VALUE_MESSAGE);
        return Flow::Stop;
    }
    Flow::Continue
}
