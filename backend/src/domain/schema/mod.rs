//! User schemas: which validators run against which record field.
//!
//! The host portal ships a default user schema for the create and update
//! actions. [`build_user_schema`] takes that default and replaces the chains
//! for the password fields, choosing between the API shape (a single
//! `password` field) and the interactive form shape (`password1` plus its
//! `password2` confirmation).
//!
//! [`UserSchema::validate`] runs the chains against a [`UserRecord`] and
//! either returns the converted record or every error found.

mod validators;

use std::collections::BTreeMap;
use std::fmt;

use tracing::trace;

use super::error_bag::ErrorBag;
use super::record::{PASSWORD, PASSWORD1, PASSWORD2, UserRecord};

pub use validators::{
    BOTH_PASSWORDS_MESSAGE, MISSING_VALUE_MESSAGE, NOT_TEXT_MESSAGE, PASSWORDS_MISMATCH_MESSAGE,
};

/// User action a schema is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Registering a new user.
    Create,
    /// Editing an existing user.
    Update,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => f.write_str("create"),
            Self::Update => f.write_str("update"),
        }
    }
}

/// One step of a validator chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    /// Password complexity policy; reports under `password`.
    PasswordPolicy,
    /// Require a non-empty password when no form confirmation fields exist.
    PasswordNotEmpty,
    /// Drop an absent or null value and stop the chain.
    IgnoreMissing,
    /// Render the value as text.
    CoerceText,
    /// Require both form password fields to be filled in.
    BothPasswordsEntered,
    /// Require the form password fields to agree, then copy into `password`.
    PasswordsMatch,
    /// Require a present, non-empty value.
    NotEmpty,
}

impl Validator {
    /// Stable name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::PasswordPolicy => "password_policy",
            Self::PasswordNotEmpty => "password_not_empty",
            Self::IgnoreMissing => "ignore_missing",
            Self::CoerceText => "coerce_text",
            Self::BothPasswordsEntered => "both_passwords_entered",
            Self::PasswordsMatch => "passwords_match",
            Self::NotEmpty => "not_empty",
        }
    }
}

/// Ordered validators applied left to right to one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatorChain(Vec<Validator>);

impl ValidatorChain {
    /// Build a chain from its steps.
    pub fn new(steps: impl Into<Vec<Validator>>) -> Self {
        Self(steps.into())
    }

    /// Steps in execution order.
    pub fn steps(&self) -> &[Validator] {
        self.0.as_slice()
    }
}

impl<const N: usize> From<[Validator; N]> for ValidatorChain {
    fn from(value: [Validator; N]) -> Self {
        Self(value.to_vec())
    }
}

/// Validator chains per field, bound to the operation they serve.
///
/// Fields run in lexical order, so `password` is settled before the form
/// fields that may overwrite it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSchema {
    operation: Operation,
    fields: BTreeMap<String, ValidatorChain>,
}

impl UserSchema {
    /// Create a schema with no fields.
    pub fn empty(operation: Operation) -> Self {
        Self {
            operation,
            fields: BTreeMap::new(),
        }
    }

    /// The host portal's default user schema for `operation`.
    ///
    /// The `password` chain here is always replaced by
    /// [`build_user_schema`].
    pub fn host_default(operation: Operation) -> Self {
        use Validator::{CoerceText, IgnoreMissing, NotEmpty};

        let name = match operation {
            Operation::Create => [NotEmpty, CoerceText],
            Operation::Update => [IgnoreMissing, CoerceText],
        };
        Self::empty(operation)
            .with_field("id", [IgnoreMissing, CoerceText])
            .with_field("name", name)
            .with_field("fullname", [IgnoreMissing, CoerceText])
            .with_field("display_name", [IgnoreMissing, CoerceText])
            .with_field("email", [NotEmpty, CoerceText])
            .with_field("about", [IgnoreMissing, CoerceText])
            .with_field(PASSWORD, [IgnoreMissing, CoerceText])
    }

    /// Replace (or add) the chain for `field`.
    #[must_use]
    pub fn with_field(
        mut self,
        field: impl Into<String>,
        chain: impl Into<ValidatorChain>,
    ) -> Self {
        self.fields.insert(field.into(), chain.into());
        self
    }

    /// Operation the schema was built for.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Chain attached to `field`, if the schema names it.
    pub fn chain(&self, field: &str) -> Option<&ValidatorChain> {
        self.fields.get(field)
    }

    /// Run every chain against `record`.
    ///
    /// Errors on one field never stop validation of its siblings. On success
    /// the converted record carries every submitted field: named fields as
    /// their chains left them, the rest unchanged for the host to check.
    ///
    /// # Errors
    ///
    /// Returns the accumulated [`ErrorBag`] when any field fails.
    pub fn validate(&self, record: &UserRecord) -> Result<UserRecord, ErrorBag> {
        let mut data = record.clone();
        let mut errors = ErrorBag::new();

        for (field, chain) in &self.fields {
            for validator in chain.steps() {
                let flow = validator.apply(field, &mut data, &mut errors, self.operation);
                trace!(
                    field = field.as_str(),
                    validator = validator.name(),
                    ?flow,
                    "validator applied"
                );
                if flow == validators::Flow::Stop {
                    break;
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(data)
    }
}

/// Build the user schema for `operation`, overriding the password chains of
/// the host default.
///
/// # Examples
/// ```
/// use portal::domain::{Operation, Validator, build_user_schema};
///
/// let schema = build_user_schema(Operation::Update, true);
/// let chain = schema.chain("password").expect("password chain");
/// assert_eq!(chain.steps(), [Validator::IgnoreMissing]);
/// ```
pub fn build_user_schema(operation: Operation, form_submission: bool) -> UserSchema {
    override_password_fields(UserSchema::host_default(operation), form_submission)
}

/// Replace the password chains of `base` according to its operation and the
/// submission shape.
pub fn override_password_fields(base: UserSchema, form_submission: bool) -> UserSchema {
    use Validator::{
        BothPasswordsEntered, CoerceText, IgnoreMissing, PasswordNotEmpty, PasswordPolicy,
        PasswordsMatch,
    };

    let api = base.with_field(
        PASSWORD,
        [PasswordPolicy, PasswordNotEmpty, IgnoreMissing, CoerceText],
    );
    if !form_submission {
        return api;
    }

    match api.operation() {
        Operation::Create => api
            .with_field(
                PASSWORD1,
                [BothPasswordsEntered, PasswordPolicy, PasswordsMatch, CoerceText],
            )
            .with_field(PASSWORD2, [CoerceText]),
        Operation::Update => api
            .with_field(PASSWORD, [IgnoreMissing])
            .with_field(
                PASSWORD1,
                [IgnoreMissing, PasswordPolicy, PasswordsMatch, CoerceText],
            )
            .with_field(PASSWORD2, [IgnoreMissing, CoerceText]),
    }
}
