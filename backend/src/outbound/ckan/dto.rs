//! DTOs for the host portal's action API envelope.
//!
//! Every action answers `{"success": bool, "result": ..., "error": {...}}`.
//! Failed actions carry an `error` object holding `__type`, an optional
//! `message` and, for validation errors, one message list per field.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::client::CkanCallError;

#[derive(Debug, Deserialize)]
pub(super) struct ActionEnvelopeDto {
    #[serde(default)]
    pub(super) success: bool,
    #[serde(default)]
    pub(super) result: Option<Value>,
    #[serde(default)]
    pub(super) error: Option<Map<String, Value>>,
}

impl ActionEnvelopeDto {
    pub(super) fn into_result(self) -> Result<Value, CkanCallError> {
        if self.success {
            return Ok(self.result.unwrap_or(Value::Null));
        }
        let mut error = self.error.unwrap_or_default();
        let error_type = take_text(&mut error, "__type");
        let message = take_text(&mut error, "message")
            .or(error_type)
            .unwrap_or_else(|| "action failed".to_owned());
        let details = (!error.is_empty()).then_some(Value::Object(error));
        Err(CkanCallError::Rejected { message, details })
    }
}

fn take_text(error: &mut Map<String, Value>, key: &str) -> Option<String> {
    match error.remove(key) {
        Some(Value::String(text)) if !text.trim().is_empty() => Some(text),
        _ => None,
    }
}
