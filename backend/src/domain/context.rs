//! Per-call context handed to every action.

/// Caller identity and submission shape of one action call.
///
/// ## Invariants
/// - `user`, when present, is trimmed and non-empty.
///
/// # Examples
/// ```
/// use portal::domain::ActionContext;
///
/// let context = ActionContext::for_user("  admin ").with_form_submission(true);
/// assert_eq!(context.user(), Some("admin"));
/// assert!(context.is_form_submission());
/// assert_eq!(ActionContext::for_user("   ").user(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionContext {
    user: Option<String>,
    form_submission: bool,
}

impl ActionContext {
    /// Context for a call without a known caller.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context for a call made by `user`; blank names count as anonymous.
    pub fn for_user(user: impl AsRef<str>) -> Self {
        let trimmed = user.as_ref().trim();
        Self {
            user: (!trimmed.is_empty()).then(|| trimmed.to_owned()),
            form_submission: false,
        }
    }

    /// Mark whether the call comes from the interactive user form, which
    /// carries `password1` and `password2` instead of `password`.
    #[must_use]
    pub fn with_form_submission(mut self, form_submission: bool) -> Self {
        self.form_submission = form_submission;
        self
    }

    /// Name of the calling user, if known.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Whether the call comes from the interactive user form.
    pub fn is_form_submission(&self) -> bool {
        self.form_submission
    }
}
