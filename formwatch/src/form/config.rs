//! Form coordinator configuration.

/// Per-form configuration.
#[derive(Debug, Clone)]
pub struct FormConfig {
    /// Display name used in log output.
    pub name: &'static str,

    /// How the error count treats fields that leave while in error.
    pub error_count_policy: ErrorCountPolicy,

    /// How a field's messages translate into the error state it reports.
    pub error_state_policy: ErrorStatePolicy,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            name: "form",
            error_count_policy: ErrorCountPolicy::default(),
            error_state_policy: ErrorStatePolicy::default(),
        }
    }
}

impl FormConfig {
    /// Create a new config with the given name.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// Set the error count policy.
    pub fn error_count_policy(mut self, policy: ErrorCountPolicy) -> Self {
        self.error_count_policy = policy;
        self
    }

    /// Set the error state policy.
    pub fn error_state_policy(mut self, policy: ErrorStatePolicy) -> Self {
        self.error_state_policy = policy;
        self
    }

    /// Shorthand for [`ErrorCountPolicy::Reconcile`].
    pub fn reconcile_on_removal(mut self) -> Self {
        self.error_count_policy = ErrorCountPolicy::Reconcile;
        self
    }
}

/// What happens to the aggregate error count when a field that is currently
/// in error is deregistered or re-registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorCountPolicy {
    /// Leave the field's contribution in the count.
    ///
    /// The count stays inflated for the life of the coordinator, so a submit
    /// button gated on `error_count() == 0` stays disabled after an invalid
    /// field is removed.
    #[default]
    Retain,
    /// Remove the field's contribution, keeping the count equal to the number
    /// of registered fields in error.
    Reconcile,
}

/// Which error state a field binding reports for its validation messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorStatePolicy {
    /// A field is in error when it has at least one message.
    #[default]
    HasMessages,
    /// A field is reported in error when it has no messages.
    ///
    /// Reproduces the legacy form layer, where the reported flag and
    /// `is_in_error_state` were both `messages.is_empty()`. The aggregate
    /// count then tracks fields that passed validation.
    NoMessages,
}

impl ErrorStatePolicy {
    /// Error state to report for a validation result.
    pub fn is_in_error(self, messages: &[String]) -> bool {
        match self {
            Self::HasMessages => !messages.is_empty(),
            Self::NoMessages => messages.is_empty(),
        }
    }
}
