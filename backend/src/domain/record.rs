//! User records submitted to the create and update actions.
//!
//! A record is an open mapping of field names to JSON values. A key that is
//! not present stands for a value the caller never supplied, which the
//! validators distinguish from an explicit `null` or empty string.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field carrying the password in API calls and the persisted password.
pub const PASSWORD: &str = "password";
/// First password field of the interactive form.
pub const PASSWORD1: &str = "password1";
/// Confirmation password field of the interactive form.
pub const PASSWORD2: &str = "password2";

/// Mapping of field name to submitted value for one user operation.
///
/// # Examples
/// ```
/// use portal::domain::UserRecord;
/// use serde_json::json;
///
/// let record = UserRecord::try_from(json!({ "name": "ada", "password": "" }))
///     .expect("object payload");
/// assert!(record.contains("password"));
/// assert!(!record.contains("password1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord(Map<String, Value>);

impl UserRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the value submitted for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Whether the caller supplied `field` at all.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Set `field` to `value`, replacing any previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }

    /// Remove `field`, returning the previous value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    /// Builder-style variant of [`UserRecord::insert`].
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value.into());
        self
    }

    /// Whether the record carries either interactive-form password field.
    pub fn has_confirmation_fields(&self) -> bool {
        self.contains(PASSWORD1) || self.contains(PASSWORD2)
    }

    /// Iterate over the submitted field names.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Consume the record, returning the underlying JSON object.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for UserRecord {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

/// Rejection raised when a JSON payload is not an object.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("user data must be a JSON object")]
pub struct NotAnObject;

impl TryFrom<Value> for UserRecord {
    type Error = NotAnObject;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(NotAnObject),
        }
    }
}

/// Render a value the way the text coercion validator does.
///
/// Returns `None` for values with no text form (absent, null, arrays and
/// objects).
pub(crate) fn text_form(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn rejects_non_object_payloads() {
        assert_eq!(UserRecord::try_from(json!(["a"])), Err(NotAnObject));
    }

    #[rstest]
    #[case(json!({ "password1": "x" }), true)]
    #[case(json!({ "password2": "x" }), true)]
    #[case(json!({ "password": "x" }), false)]
    fn detects_confirmation_fields(#[case] payload: Value, #[case] expected: bool) {
        let record = UserRecord::try_from(payload).expect("object payload");
        assert_eq!(record.has_confirmation_fields(), expected);
    }

    #[rstest]
    #[case(Some(json!("abc")), Some("abc"))]
    #[case(Some(json!(12)), Some("12"))]
    #[case(Some(json!(true)), Some("true"))]
    #[case(Some(json!(null)), None)]
    #[case(Some(json!({})), None)]
    #[case(None, None)]
    fn text_form_matches_coercion(#[case] value: Option<Value>, #[case] expected: Option<&str>) {
        assert_eq!(text_form(value.as_ref()).as_deref(), expected);
    }

    #[rstest]
    fn serialises_as_plain_object() {
        let record = UserRecord::new().with("name", "ada").with("email", "a@x.dk");
        let value = serde_json::to_value(&record).expect("serialise record");
        assert_eq!(value, json!({ "name": "ada", "email": "a@x.dk" }));
    }
}
