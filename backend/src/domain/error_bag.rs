//! Per-request accumulator of field validation errors.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Path to a field inside a submitted record, one token per nesting level.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Path naming a single top-level field.
    pub fn field(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// Path tokens from outermost to innermost.
    pub fn tokens(&self) -> &[String] {
        self.0.as_slice()
    }
}

impl From<&str> for FieldPath {
    fn from(value: &str) -> Self {
        Self::field(value)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Ordered error messages keyed by field path.
///
/// ## Invariants
/// - A field absent from the bag has no errors.
/// - Stored message lists are never empty.
///
/// # Examples
/// ```
/// use portal::domain::{ErrorBag, FieldPath};
///
/// let mut errors = ErrorBag::new();
/// errors.push("password", "Missing value");
/// assert_eq!(errors.messages(&FieldPath::field("password")), ["Missing value"]);
/// assert!(errors.messages(&FieldPath::field("email")).is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBag(BTreeMap<FieldPath, Vec<String>>);

impl ErrorBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `message` to the errors recorded for `path`.
    pub fn push(&mut self, path: impl Into<FieldPath>, message: impl Into<String>) {
        self.0.entry(path.into()).or_default().push(message.into());
    }

    /// Messages recorded for `path`, in insertion order.
    pub fn messages(&self, path: &FieldPath) -> &[String] {
        self.0.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether no field has errors.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with at least one error.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over failing fields in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &[String])> {
        self.0.iter().map(|(path, messages)| (path, messages.as_slice()))
    }
}

/// Serialises as `{ "dotted.path": ["message", ...] }`.
impl Serialize for ErrorBag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (path, messages) in &self.0 {
            map.serialize_entry(&path.to_string(), messages)?;
        }
        map.end()
    }
}
