//! The form engine: value state, error state and submit gating.

use std::fmt;

use log::{debug, trace, warn};

use crate::config::{FormConfig, UnknownFieldPolicy};
use crate::declaration::{FormDeclaration, ValidatorRegistry};
use crate::error::FormError;
use crate::outcome::SubmitOutcome;
use crate::rule::{Rule, RuleSet};
use crate::state::{FieldErrors, FieldValues, Schema};

/// Callback run with the submitted values when every field passes.
pub type SubmitHandler = Box<dyn FnMut(FieldValues)>;

/// Callback run with the new error state when a submit fails.
pub type ErrorsHandler = Box<dyn FnMut(FieldErrors)>;

/// Tracks the values and errors of one form.
///
/// Built with [`FormEngine::builder`]. The set of fields is fixed by the
/// schema for the lifetime of the engine.
///
/// # Example
///
/// ```no_run
/// # use formstate::prelude::*;
/// # fn main() -> Result<(), FormError> {
/// let mut form = FormEngine::builder()
///     .field("email", "")
///     .rule("email", Rule::function(|value, _| {
///         required_error(value, None).or_else(|| email_format_error(value, None))
///     }))
///     .on_submit(|values| println!("signed in as {}", values.get("email").unwrap_or_default()))
///     .build()?;
///
/// form.change("email", "a@b.com")?;
/// assert!(form.submit().is_submitted());
/// # Ok(())
/// # }
/// ```
pub struct FormEngine {
    schema: Schema,
    rules: RuleSet,
    values: FieldValues,
    errors: FieldErrors,
    config: FormConfig,
    on_submit: SubmitHandler,
    on_errors: Option<ErrorsHandler>,
}

impl FormEngine {
    /// Start building a form.
    pub fn builder() -> FormBuilder {
        FormBuilder::new()
    }

    /// Replace the value of one field.
    ///
    /// No validation runs and the error state is left as it is.
    pub fn change(&mut self, key: &str, value: impl Into<String>) -> Result<(), FormError> {
        if self.values.replace(key, value.into()) {
            trace!("form field '{}' changed", key);
            return Ok(());
        }

        match self.config.unknown_fields {
            UnknownFieldPolicy::Reject => Err(FormError::UnknownField {
                field: key.to_string(),
            }),
            UnknownFieldPolicy::Ignore => {
                warn!("ignoring change to undeclared form field '{}'", key);
                Ok(())
            }
        }
    }

    /// Validate every field and call `on_submit` or `on_errors`.
    ///
    /// All fields are evaluated against the same snapshot of values, in
    /// schema order. The error state is replaced with the fresh result either
    /// way, so it is all clear after a successful submit.
    pub fn submit(&mut self) -> SubmitOutcome {
        let errors = self.evaluate();
        let failed = errors.error_count();
        self.errors = errors;

        if failed == 0 {
            debug!("form submit accepted ({} fields)", self.values.len());
            (self.on_submit)(self.values.clone());
            return SubmitOutcome::Submitted;
        }

        debug!(
            "form submit rejected: {} of {} fields failed",
            failed,
            self.values.len()
        );
        if let Some(on_errors) = self.on_errors.as_mut() {
            on_errors(self.errors.clone());
        }
        SubmitOutcome::Rejected {
            errors: self.errors.clone(),
        }
    }

    /// Clear every field error.
    pub fn clear_errors(&mut self) {
        debug!("form errors cleared");
        self.errors = FieldErrors::cleared(self.schema.keys());
    }

    /// Restore every field to its schema default.
    pub fn clear_state(&mut self) {
        debug!("form values reset to defaults");
        self.values = self.schema.clone();
    }

    /// Current values of all fields.
    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    /// Current errors of all fields.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Current value of one field.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key)
    }

    /// Current error of one field.
    pub fn error(&self, key: &str) -> Option<&str> {
        self.errors.get(key)
    }

    /// Check if any field currently has an error.
    pub fn has_errors(&self) -> bool {
        self.errors.has_errors()
    }

    /// Check if any value differs from its default.
    pub fn is_dirty(&self) -> bool {
        self.values != self.schema
    }

    /// The defaults the form was built with.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Field names in schema order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.schema.keys()
    }

    /// Options the form was built with.
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    fn evaluate(&self) -> FieldErrors {
        let mut errors = FieldErrors::cleared(self.schema.keys());
        for (key, value) in self.values.iter() {
            let message = self
                .rules
                .get(key)
                .and_then(|rule| rule.evaluate(value, &self.values));
            errors.set(key, message);
        }
        errors
    }
}

impl fmt::Debug for FormEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormEngine")
            .field("values", &self.values)
            .field("errors", &self.errors)
            .field("rules", &self.rules)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`FormEngine`].
///
/// Nothing is checked until [`build`](Self::build), which either returns a
/// fully usable engine or the first configuration error found.
#[derive(Default)]
pub struct FormBuilder {
    schema: Option<Schema>,
    rules: Option<RuleSet>,
    on_submit: Option<SubmitHandler>,
    on_errors: Option<ErrorsHandler>,
    config: FormConfig,
    pending_error: Option<FormError>,
}

impl FormBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the schema, replacing any fields added so far.
    pub fn schema(mut self, schema: impl Into<Schema>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Add one field with its default value.
    pub fn field(mut self, key: impl Into<String>, default: impl Into<String>) -> Self {
        self.schema
            .get_or_insert_with(Schema::new)
            .insert(key, default);
        self
    }

    /// Set the rule set, replacing any rules added so far.
    pub fn rules(mut self, rules: RuleSet) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Add the rule for one field.
    pub fn rule(mut self, key: impl Into<String>, rule: Rule) -> Self {
        self.rules.get_or_insert_with(RuleSet::new).insert(key, rule);
        self
    }

    /// Take schema and rules from a declaration.
    ///
    /// Resolution errors are reported by [`build`](Self::build).
    pub fn declaration(mut self, declaration: &FormDeclaration, registry: &ValidatorRegistry) -> Self {
        match declaration.resolve(registry) {
            Ok((schema, rules)) => {
                self.schema = Some(schema);
                self.rules = Some(rules);
            }
            Err(err) => {
                self.pending_error.get_or_insert(err);
            }
        }
        self
    }

    /// Set the callback run when every field passes.
    pub fn on_submit<F>(mut self, f: F) -> Self
    where
        F: FnMut(FieldValues) + 'static,
    {
        self.on_submit = Some(Box::new(f));
        self
    }

    /// Set the callback run when a submit fails.
    pub fn on_errors<F>(mut self, f: F) -> Self
    where
        F: FnMut(FieldErrors) + 'static,
    {
        self.on_errors = Some(Box::new(f));
        self
    }

    /// Set the engine options. Defaults apply when not called.
    pub fn config(mut self, config: FormConfig) -> Self {
        self.config = config;
        self
    }

    /// Check the configuration and create the engine.
    pub fn build(self) -> Result<FormEngine, FormError> {
        if let Some(err) = self.pending_error {
            return Err(err);
        }

        let schema = self.schema.ok_or(FormError::MissingSchema)?;
        if schema.is_empty() {
            return Err(FormError::EmptySchema);
        }

        let rules = self.rules.ok_or(FormError::MissingRules)?;
        if rules.is_empty() {
            return Err(FormError::EmptyRules);
        }
        if let Some(field) = schema.keys().find(|k| !rules.contains(k)) {
            return Err(FormError::MissingRule {
                field: field.to_string(),
            });
        }
        if let Some(field) = rules.keys().find(|k| !schema.contains(k)) {
            return Err(FormError::UnknownRuleField {
                field: field.to_string(),
            });
        }

        let on_submit = self.on_submit.ok_or(FormError::MissingSubmitHandler)?;

        debug!("form built with fields {:?}", schema.keys().collect::<Vec<_>>());
        Ok(FormEngine {
            errors: FieldErrors::cleared(schema.keys()),
            values: schema.clone(),
            schema,
            rules,
            config: self.config,
            on_submit,
            on_errors: self.on_errors,
        })
    }
}
