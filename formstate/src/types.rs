//! Type predicates for loosely-typed form declarations.
//!
//! Declarations arrive as JSON, so the shape of each value has to be checked
//! before it is turned into a [`Rule`](crate::Rule). A validator function is
//! written as a reference object, in one of two forms:
//!
//! - plain: `{"function": "required"}`, optionally with `"message": "..."`
//! - composite: `{"first_of": [<function reference>, ...]}`
//!
//! A function reference is still a JSON object: callers that need to tell the
//! two apart check [`is_function`] first.

use serde_json::Value;

/// Key naming a registered validator in a plain function reference.
pub const FUNCTION_KEY: &str = "function";
/// Key carrying a custom message in a plain function reference.
pub const MESSAGE_KEY: &str = "message";
/// Key listing the references of a composite function reference.
pub const FIRST_OF_KEY: &str = "first_of";

pub fn is_string(value: &Value) -> bool {
    matches!(value, Value::String(_))
}

pub fn is_number(value: &Value) -> bool {
    matches!(value, Value::Number(_))
}

pub fn is_boolean(value: &Value) -> bool {
    matches!(value, Value::Bool(_))
}

/// A key/value object. `null` and arrays are not objects.
pub fn is_object(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

/// A plain or composite function reference.
pub fn is_function(value: &Value) -> bool {
    let Value::Object(map) = value else {
        return false;
    };

    if let Some(name) = map.get(FUNCTION_KEY) {
        let message_ok = map.get(MESSAGE_KEY).is_none_or(is_string);
        let no_extra = map.keys().all(|k| k == FUNCTION_KEY || k == MESSAGE_KEY);
        return is_string(name) && message_ok && no_extra;
    }

    match map.get(FIRST_OF_KEY) {
        Some(Value::Array(items)) => {
            map.len() == 1 && !items.is_empty() && items.iter().all(is_function)
        }
        _ => false,
    }
}

/// Name of a value's type, for error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_null_is_not_an_object() {
        assert!(!is_object(&Value::Null));
        assert!(!is_object(&json!([])));
        assert!(is_object(&json!({})));
        assert!(is_object(&json!({"email": ""})));
        assert!(is_object(&json!({"function": "", "message": "m"})));
    }

    #[test]
    fn test_scalar_predicates() {
        assert!(is_string(&json!("x")));
        assert!(!is_string(&json!(1)));
        assert!(is_number(&json!(1)));
        assert!(is_number(&json!(1.5)));
        assert!(!is_number(&json!("1")));
        assert!(is_boolean(&json!(false)));
        assert!(!is_boolean(&json!("false")));
    }

    #[test]
    fn test_plain_function_reference() {
        assert!(is_function(&json!({"function": "required"})));
        assert!(is_function(&json!({"function": "required", "message": "Needed"})));
        assert!(!is_function(&json!({"function": 3})));
        assert!(!is_function(&json!({"function": "required", "message": 3})));
        assert!(!is_function(&json!({"function": "required", "extra": true})));
        assert!(!is_function(&json!("required")));
    }

    #[test]
    fn test_composite_function_reference() {
        let composite = json!({"first_of": [{"function": "required"}, {"function": "email"}]});
        assert!(is_function(&composite));
        assert!(is_object(&composite));
        assert!(!is_function(&json!({"first_of": []})));
        assert!(!is_function(&json!({"first_of": ["required"]})));
        assert!(is_function(&json!({"first_of": [composite]})));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(type_name(&json!(null)), "null");
        assert_eq!(type_name(&json!(2)), "number");
        assert_eq!(type_name(&json!({"function": "email"})), "object");
        assert_eq!(type_name(&json!({"a": 1})), "object");
    }
}
