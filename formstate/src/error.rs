//! Form configuration and usage errors.
//!
//! Validation failures are never errors: they are data stored in
//! [`FieldErrors`](crate::FieldErrors). Everything here means the form was
//! declared or driven incorrectly.

use thiserror::Error;

/// Errors raised while building or driving a form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A form declaration was not a JSON object.
    #[error("expected the form declaration to be an object, but received {actual}")]
    DeclarationNotObject { actual: &'static str },

    /// A form declaration could not be parsed.
    #[error("invalid form declaration: {0}")]
    Parse(String),

    /// No schema was supplied.
    #[error("expected a form schema to be present")]
    MissingSchema,

    /// The schema was not an object.
    #[error("expected the form schema to be an object, but received {actual}")]
    SchemaNotObject { actual: &'static str },

    /// The schema declares no fields.
    #[error("expected the form schema to declare at least one field")]
    EmptySchema,

    /// A schema default was not a string.
    #[error(
        "expected type string for key: {field}, but got {actual}. All values need to be of type string"
    )]
    NonStringDefault { field: String, actual: &'static str },

    /// No rule set was supplied.
    #[error("expected form rules to be present")]
    MissingRules,

    /// The rule set was not an object.
    #[error("expected form rules to be an object, but received {actual}")]
    RulesNotObject { actual: &'static str },

    /// The rule set declares no rules.
    #[error("expected form rules to declare at least one rule")]
    EmptyRules,

    /// A rule entry was not an object.
    #[error("expected a rule object for key: {field}, but got {actual}")]
    RuleNotObject { field: String, actual: &'static str },

    /// A rule entry has no validator.
    #[error("expected validatorFn to be present in the rule for key: {field}")]
    MissingValidator { field: String },

    /// A validator is neither a function, a boolean, nor a fixed message.
    #[error("expected validatorFn of type function or boolean for key: {field}, but got {actual}")]
    InvalidValidator { field: String, actual: &'static str },

    /// A validator was the flag `true`, which has no meaning.
    #[error("validatorFn for key: {field} is `true`; only `false` may disable validation")]
    InvalidValidatorFlag { field: String },

    /// A function reference names a validator that is not registered.
    #[error("validatorFn for key: {field} references unknown validator '{name}'")]
    UnknownValidator { field: String, name: String },

    /// A schema field has no rule.
    #[error("expected a rule for key: {field}")]
    MissingRule { field: String },

    /// A rule names a field the schema does not declare.
    #[error("rule for key: {field} does not match any schema field")]
    UnknownRuleField { field: String },

    /// No submit callback was supplied.
    #[error("expected an on_submit callback to be present")]
    MissingSubmitHandler,

    /// A change targeted a field the schema does not declare.
    #[error("field '{field}' is not declared in the form schema")]
    UnknownField { field: String },
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl FormError {
    /// The field this error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::NonStringDefault { field, .. }
            | Self::RuleNotObject { field, .. }
            | Self::MissingValidator { field }
            | Self::InvalidValidator { field, .. }
            | Self::InvalidValidatorFlag { field }
            | Self::UnknownValidator { field, .. }
            | Self::MissingRule { field }
            | Self::UnknownRuleField { field }
            | Self::UnknownField { field } => Some(field),
            _ => None,
        }
    }
}
