//! Form engine options.

/// Per-form configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormConfig {
    /// Behavior when `change` targets a field the schema does not declare.
    pub unknown_fields: UnknownFieldPolicy,
}

impl FormConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unknown field policy.
    pub fn unknown_fields(mut self, policy: UnknownFieldPolicy) -> Self {
        self.unknown_fields = policy;
        self
    }
}

/// What `change` does with a field the schema does not declare.
///
/// The value is never stored: the set of fields is fixed by the schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownFieldPolicy {
    /// Return [`FormError::UnknownField`](crate::FormError::UnknownField).
    #[default]
    Reject,
    /// Drop the change and log a warning.
    Ignore,
}
