//! Forms declared as data.
//!
//! A declaration is a JSON document with a `schema` and a `rules` object:
//!
//! ```json
//! {
//!   "schema": { "email": "", "password": "" },
//!   "rules": {
//!     "email": { "validatorFn": { "first_of": [{ "function": "required" }, { "function": "email" }] } },
//!     "password": { "validatorFn": { "function": "required", "message": "Password please" } }
//!   }
//! }
//! ```
//!
//! Function references are resolved against a [`ValidatorRegistry`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::FormError;
use crate::rule::{Rule, RuleSet};
use crate::state::{FieldValues, Schema};
use crate::types::{
    FIRST_OF_KEY, FUNCTION_KEY, MESSAGE_KEY, is_boolean, is_function, is_object, type_name,
};
use crate::validators::{email_format_error, required_error};

/// Key holding the validator inside a rule object.
pub const VALIDATOR_KEY: &str = "validatorFn";

/// A named validator: `(value, all_values, custom_message) -> error message`.
pub type NamedValidatorFn =
    Arc<dyn Fn(&str, &FieldValues, Option<&str>) -> Option<String> + Send + Sync>;

/// Named validators that declarations can reference.
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    validators: HashMap<String, NamedValidatorFn>,
}

impl ValidatorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding `required` and `email`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("required", |value, _, message| {
            required_error(value, message)
        });
        registry.register("email", |value, _, message| {
            email_format_error(value, message)
        });
        registry
    }

    /// Register a validator under `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&str, &FieldValues, Option<&str>) -> Option<String> + Send + Sync + 'static,
    {
        self.validators.insert(name.into(), Arc::new(f));
        self
    }

    pub fn get(&self, name: &str) -> Option<&NamedValidatorFn> {
        self.validators.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ValidatorRegistry")
            .field("validators", &names)
            .finish()
    }
}

/// A reference to one or more registered validators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionRef {
    /// A single validator with an optional custom message.
    Named {
        name: String,
        message: Option<String>,
    },
    /// The first error produced by the listed references, in order.
    FirstOf(Vec<FunctionRef>),
}

impl FunctionRef {
    fn from_json(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        if let Some(name) = map.get(FUNCTION_KEY).and_then(Value::as_str) {
            return Some(Self::Named {
                name: name.to_string(),
                message: map
                    .get(MESSAGE_KEY)
                    .and_then(Value::as_str)
                    .map(str::to_string),
            });
        }
        let items = map.get(FIRST_OF_KEY)?.as_array()?;
        items
            .iter()
            .map(Self::from_json)
            .collect::<Option<Vec<_>>>()
            .map(Self::FirstOf)
    }

    /// Flatten into `(validator, message)` pairs in evaluation order.
    fn resolve(
        &self,
        field: &str,
        registry: &ValidatorRegistry,
        out: &mut Vec<(NamedValidatorFn, Option<String>)>,
    ) -> Result<(), FormError> {
        match self {
            Self::Named { name, message } => {
                let validator =
                    registry
                        .get(name)
                        .cloned()
                        .ok_or_else(|| FormError::UnknownValidator {
                            field: field.to_string(),
                            name: name.clone(),
                        })?;
                out.push((validator, message.clone()));
            }
            Self::FirstOf(refs) => {
                for r in refs {
                    r.resolve(field, registry, out)?;
                }
            }
        }
        Ok(())
    }
}

/// The declared form of one field's validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleDeclaration {
    Function(FunctionRef),
    FixedMessage(String),
    AlwaysValid,
}

impl RuleDeclaration {
    fn from_json(field: &str, value: &Value) -> Result<Self, FormError> {
        if !is_object(value) {
            return Err(FormError::RuleNotObject {
                field: field.to_string(),
                actual: type_name(value),
            });
        }

        let validator = value
            .get(VALIDATOR_KEY)
            .ok_or_else(|| FormError::MissingValidator {
                field: field.to_string(),
            })?;

        if is_function(validator) {
            return FunctionRef::from_json(validator).map(Self::Function).ok_or_else(|| {
                FormError::InvalidValidator {
                    field: field.to_string(),
                    actual: type_name(validator),
                }
            });
        }

        if is_boolean(validator) {
            Rule::from_flag(field, validator.as_bool() == Some(true))?;
            return Ok(Self::AlwaysValid);
        }

        match validator {
            Value::String(message) => Ok(Self::FixedMessage(message.clone())),
            _ => Err(FormError::InvalidValidator {
                field: field.to_string(),
                actual: type_name(validator),
            }),
        }
    }

    fn resolve(&self, field: &str, registry: &ValidatorRegistry) -> Result<Rule, FormError> {
        match self {
            Self::Function(function) => {
                let mut chain = Vec::new();
                function.resolve(field, registry, &mut chain)?;
                Ok(Rule::function(move |value, values| {
                    chain.iter().find_map(|(validator, message)| {
                        validator(value, values, message.as_deref()).filter(|m| !m.is_empty())
                    })
                }))
            }
            Self::FixedMessage(message) => Ok(Rule::fixed(message.clone())),
            Self::AlwaysValid => Ok(Rule::AlwaysValid),
        }
    }
}

/// A shape-checked form declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDeclaration {
    schema: Schema,
    rules: IndexMap<String, RuleDeclaration>,
}

impl FormDeclaration {
    /// Check the shape of a JSON declaration.
    pub fn from_json(value: &Value) -> Result<Self, FormError> {
        let Value::Object(root) = value else {
            return Err(FormError::DeclarationNotObject {
                actual: type_name(value),
            });
        };

        let schema = parse_schema(root)?;
        let rules = parse_rules(root)?;
        Ok(Self { schema, rules })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rule(&self, field: &str) -> Option<&RuleDeclaration> {
        self.rules.get(field)
    }

    /// Resolve function references and produce the schema and rule set.
    pub fn resolve(&self, registry: &ValidatorRegistry) -> Result<(Schema, RuleSet), FormError> {
        let mut rules = RuleSet::new();
        for (field, declaration) in &self.rules {
            rules.insert(field.clone(), declaration.resolve(field, registry)?);
        }
        Ok((self.schema.clone(), rules))
    }
}

impl FromStr for FormDeclaration {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_json(&value)
    }
}

fn parse_schema(root: &Map<String, Value>) -> Result<Schema, FormError> {
    let schema = match root.get("schema") {
        None | Some(Value::Null) => return Err(FormError::MissingSchema),
        Some(value) if !is_object(value) => {
            return Err(FormError::SchemaNotObject {
                actual: type_name(value),
            });
        }
        Some(value) => value,
    };

    let mut values = FieldValues::new();
    for (field, default) in schema.as_object().into_iter().flatten() {
        match default.as_str() {
            Some(default) => values.insert(field.clone(), default),
            None => {
                return Err(FormError::NonStringDefault {
                    field: field.clone(),
                    actual: type_name(default),
                });
            }
        }
    }

    if values.is_empty() {
        return Err(FormError::EmptySchema);
    }
    Ok(values)
}

fn parse_rules(root: &Map<String, Value>) -> Result<IndexMap<String, RuleDeclaration>, FormError> {
    let rules = match root.get("rules") {
        None | Some(Value::Null) => return Err(FormError::MissingRules),
        Some(value) if !is_object(value) => {
            return Err(FormError::RulesNotObject {
                actual: type_name(value),
            });
        }
        Some(value) => value,
    };

    let mut declarations = IndexMap::new();
    for (field, rule) in rules.as_object().into_iter().flatten() {
        declarations.insert(field.clone(), RuleDeclaration::from_json(field, rule)?);
    }

    if declarations.is_empty() {
        return Err(FormError::EmptyRules);
    }
    Ok(declarations)
}
