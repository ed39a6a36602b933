//! Password complexity policy.
//!
//! The policy is a pure predicate over the value submitted for a password
//! field. Absent values and empty strings pass so partial updates can leave a
//! stored password untouched; the schema decides whether a password is
//! required at all.

use serde_json::Value;

/// Minimum number of characters (Unicode scalar values) in a password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Message reported for non-text password values.
pub const NOT_A_STRING_MESSAGE: &str = "Passwords must be strings";

/// Message reported for any text password failing the complexity rules.
pub const WEAK_PASSWORD_MESSAGE: &str = r##"Your password must be 8 characters or longer, contain at least one capital letter, one small letter, one number(0-9) and a special_character(!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~)"##;

/// JSON type of a password value that is not text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Explicit `null`.
    Null,
    /// `true` or `false`.
    Bool,
    /// Any JSON number.
    Number,
    /// JSON array.
    Array,
    /// JSON object.
    Object,
}

/// Candidate password as submitted by the caller.
///
/// # Examples
/// ```
/// use portal::domain::{PasswordInput, ValueKind};
/// use serde_json::json;
///
/// assert_eq!(PasswordInput::from_field(None), PasswordInput::Absent);
/// assert_eq!(PasswordInput::from_field(Some(&json!(""))), PasswordInput::Empty);
/// assert_eq!(
///     PasswordInput::from_field(Some(&json!(7))),
///     PasswordInput::Invalid(ValueKind::Number)
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordInput<'a> {
    /// The field was not supplied.
    Absent,
    /// The field was supplied as an empty string.
    Empty,
    /// A non-empty text value.
    Text(&'a str),
    /// A value of some other JSON type.
    Invalid(ValueKind),
}

impl<'a> PasswordInput<'a> {
    /// Classify the value stored under a password field.
    pub fn from_field(value: Option<&'a Value>) -> Self {
        match value {
            None => Self::Absent,
            Some(Value::String(text)) if text.is_empty() => Self::Empty,
            Some(Value::String(text)) => Self::Text(text.as_str()),
            Some(Value::Null) => Self::Invalid(ValueKind::Null),
            Some(Value::Bool(_)) => Self::Invalid(ValueKind::Bool),
            Some(Value::Number(_)) => Self::Invalid(ValueKind::Number),
            Some(Value::Array(_)) => Self::Invalid(ValueKind::Array),
            Some(Value::Object(_)) => Self::Invalid(ValueKind::Object),
        }
    }
}

/// Which complexity rules a candidate satisfies.
///
/// Only used for diagnostics; callers always see the composite
/// [`WEAK_PASSWORD_MESSAGE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PasswordRequirements {
    /// At least [`MIN_PASSWORD_LENGTH`] characters.
    pub long_enough: bool,
    /// Contains an ASCII digit.
    pub has_digit: bool,
    /// Contains an uppercase letter.
    pub has_uppercase: bool,
    /// Contains a lowercase letter.
    pub has_lowercase: bool,
    /// Contains an ASCII punctuation character.
    pub has_punctuation: bool,
}

impl PasswordRequirements {
    /// Evaluate every rule against `candidate`.
    pub fn assess(candidate: &str) -> Self {
        candidate.chars().fold(
            Self {
                long_enough: candidate.chars().count() >= MIN_PASSWORD_LENGTH,
                ..Self::default()
            },
            |acc, ch| Self {
                has_digit: acc.has_digit || ch.is_ascii_digit(),
                has_uppercase: acc.has_uppercase || ch.is_uppercase(),
                has_lowercase: acc.has_lowercase || ch.is_lowercase(),
                has_punctuation: acc.has_punctuation || ch.is_ascii_punctuation(),
                ..acc
            },
        )
    }

    /// Whether all rules hold simultaneously.
    pub fn is_satisfied(&self) -> bool {
        self.long_enough
            && self.has_digit
            && self.has_uppercase
            && self.has_lowercase
            && self.has_punctuation
    }
}

/// Rejection produced by [`validate_password`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PasswordPolicyError {
    /// The value is not text.
    #[error("{}", NOT_A_STRING_MESSAGE)]
    NotAString(ValueKind),
    /// The text fails at least one complexity rule.
    #[error("{}", WEAK_PASSWORD_MESSAGE)]
    TooWeak(PasswordRequirements),
}

/// Apply the password policy to a candidate.
///
/// # Examples
/// ```
/// use portal::domain::{PasswordInput, validate_password};
///
/// assert!(validate_password(PasswordInput::Text("Capsmall12!@")).is_ok());
/// assert!(validate_password(PasswordInput::Text("Passw0rd")).is_err());
/// assert!(validate_password(PasswordInput::Empty).is_ok());
/// ```
pub fn validate_password(candidate: PasswordInput<'_>) -> Result<(), PasswordPolicyError> {
    match candidate {
        PasswordInput::Absent | PasswordInput::Empty => Ok(()),
        PasswordInput::Invalid(kind) => Err(PasswordPolicyError::NotAString(kind)),
        PasswordInput::Text(text) => {
            let requirements = PasswordRequirements::assess(text);
            if requirements.is_satisfied() {
                Ok(())
            } else {
                Err(PasswordPolicyError::TooWeak(requirements))
            }
        }
    }
}
