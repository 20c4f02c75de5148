//! Field value and field error containers.
//!
//! Both containers keep their keys in schema order, so iterating them
//! (and evaluating rules over them) is deterministic.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default values for every field of a form.
///
/// A schema has the same shape as the values it seeds: field name to string.
pub type Schema = FieldValues;

/// Current value of every field, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldValues(IndexMap<String, String>);

impl FieldValues {
    /// Create an empty value map.
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Get the value of a field.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Check if a field exists.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert or replace a field value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Replace the value of an existing field.
    ///
    /// Returns `false` without inserting when the field does not exist.
    pub(crate) fn replace(&mut self, key: &str, value: String) -> bool {
        match self.0.get_mut(key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Field names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterate over `(field, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume into the underlying ordered map.
    pub fn into_inner(self) -> IndexMap<String, String> {
        self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for FieldValues {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Current error of every field, in schema order.
///
/// `None` means the field has no error. A stored message is never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(IndexMap<String, Option<String>>);

impl FieldErrors {
    /// Create an error map with every given field set to "no error".
    pub fn cleared<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        Self(keys.into_iter().map(|k| (k.to_string(), None)).collect())
    }

    /// Get the error message of a field, if it has one.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Option::as_deref)
    }

    /// Check if a field is tracked by this map.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Record the result for one field. Empty messages count as no error.
    pub(crate) fn set(&mut self, key: &str, message: Option<String>) {
        let message = message.filter(|m| !m.is_empty());
        match self.0.get_mut(key) {
            Some(slot) => *slot = message,
            None => {
                self.0.insert(key.to_string(), message);
            }
        }
    }

    /// Check if any field has an error.
    pub fn has_errors(&self) -> bool {
        self.0.values().any(Option::is_some)
    }

    /// Number of fields with an error.
    pub fn error_count(&self) -> usize {
        self.0.values().filter(|m| m.is_some()).count()
    }

    /// Iterate over fields that have an error, as `(field, message)`.
    pub fn messages(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter_map(|(k, m)| m.as_deref().map(|m| (k.as_str(), m)))
    }

    /// Iterate over every field, as `(field, message)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, m)| (k.as_str(), m.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, const N: usize> From<[(K, Option<&str>); N]> for FieldErrors {
    fn from(pairs: [(K, Option<&str>); N]) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(k, m)| (k.into(), m.filter(|m| !m.is_empty()).map(str::to_string)))
                .collect(),
        )
    }
}
