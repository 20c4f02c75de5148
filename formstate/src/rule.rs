//! Per-field validation rules.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::FormError;
use crate::state::FieldValues;

/// A validation function: `(value, all_values) -> error message`.
///
/// `None` or an empty message means the value is valid.
pub type ValidatorFn = Arc<dyn Fn(&str, &FieldValues) -> Option<String> + Send + Sync>;

/// The validation behavior attached to one field.
#[derive(Clone)]
pub enum Rule {
    /// Evaluate a function against the field value and all current values.
    Function(ValidatorFn),
    /// The field is always in error with this message.
    FixedMessage(String),
    /// The field is always valid.
    AlwaysValid,
}

impl Rule {
    /// Create a rule from a validation function.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&str, &FieldValues) -> Option<String> + Send + Sync + 'static,
    {
        Self::Function(Arc::new(f))
    }

    /// Create a rule that always fails with `message`.
    pub fn fixed(message: impl Into<String>) -> Self {
        Self::FixedMessage(message.into())
    }

    /// Create a rule that always passes.
    pub fn always_valid() -> Self {
        Self::AlwaysValid
    }

    /// Create a rule from a boolean disable flag.
    ///
    /// `false` disables validation for the field. `true` is rejected.
    pub fn from_flag(field: &str, flag: bool) -> Result<Self, FormError> {
        if flag {
            Err(FormError::InvalidValidatorFlag {
                field: field.to_string(),
            })
        } else {
            Ok(Self::AlwaysValid)
        }
    }

    /// Evaluate the rule. Returns the error message, if any.
    pub fn evaluate(&self, value: &str, values: &FieldValues) -> Option<String> {
        let message = match self {
            Self::Function(f) => f(value, values),
            Self::FixedMessage(message) => Some(message.clone()),
            Self::AlwaysValid => None,
        };
        message.filter(|m| !m.is_empty())
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(_) => f.write_str("Function(..)"),
            Self::FixedMessage(message) => f.debug_tuple("FixedMessage").field(message).finish(),
            Self::AlwaysValid => f.write_str("AlwaysValid"),
        }
    }
}

/// One rule per field, keyed by field name.
#[derive(Debug, Clone, Default)]
pub struct RuleSet(IndexMap<String, Rule>);

impl RuleSet {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Set the rule for a field, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, rule: Rule) {
        self.0.insert(key.into(), rule);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, rule: Rule) -> Self {
        self.insert(key, rule);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Rule> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Rule)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (K, Rule)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, r)| (k.into(), r)).collect())
    }
}
