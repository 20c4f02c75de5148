use crate::state::FieldErrors;

/// Result of one submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Every field passed and `on_submit` was called.
    Submitted,
    /// One or more fields failed and the errors were stored.
    Rejected {
        /// The error state after the submit.
        errors: FieldErrors,
    },
}

impl SubmitOutcome {
    /// Check if the form was submitted.
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted)
    }

    /// Check if the form was rejected.
    pub fn is_rejected(&self) -> bool {
        !self.is_submitted()
    }

    /// Get the errors of a rejected submit.
    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Submitted => None,
            Self::Rejected { errors } => Some(errors),
        }
    }

    /// Get the first failing field and its message, in schema order.
    pub fn first_error(&self) -> Option<(&str, &str)> {
        self.errors().and_then(|errors| errors.messages().next())
    }
}
