use std::cell::RefCell;
use std::rc::Rc;

use formstate::validators::{EMAIL_MESSAGE, REQUIRED_MESSAGE};
use formstate::{
    FieldValues, FormDeclaration, FormEngine, FormError, FunctionRef, RuleDeclaration,
    ValidatorRegistry,
};
use serde_json::json;

const SIGNUP: &str = r#"{
    "schema": { "email": "", "password": "", "legacy": "", "nickname": "" },
    "rules": {
        "email": { "validatorFn": { "first_of": [{ "function": "required" }, { "function": "email" }] } },
        "password": { "validatorFn": { "function": "required", "message": "Password please" } },
        "legacy": { "validatorFn": "This field is disabled" },
        "nickname": { "validatorFn": false }
    }
}"#;

fn build(declaration: &FormDeclaration) -> Result<FormEngine, FormError> {
    FormEngine::builder()
        .declaration(declaration, &ValidatorRegistry::with_builtins())
        .on_submit(|_| {})
        .build()
}

#[test]
fn test_parse_rule_variants() {
    let declaration: FormDeclaration = SIGNUP.parse().unwrap();

    assert_eq!(
        declaration.rule("email"),
        Some(&RuleDeclaration::Function(FunctionRef::FirstOf(vec![
            FunctionRef::Named {
                name: "required".to_string(),
                message: None
            },
            FunctionRef::Named {
                name: "email".to_string(),
                message: None
            },
        ])))
    );
    assert_eq!(
        declaration.rule("legacy"),
        Some(&RuleDeclaration::FixedMessage("This field is disabled".to_string()))
    );
    assert_eq!(declaration.rule("nickname"), Some(&RuleDeclaration::AlwaysValid));
}

#[test]
fn test_schema_keeps_declared_order() {
    let declaration: FormDeclaration = SIGNUP.parse().unwrap();
    let keys: Vec<&str> = declaration.schema().keys().collect();
    assert_eq!(keys, vec!["email", "password", "legacy", "nickname"]);
}

#[test]
fn test_declared_form_validates() {
    let declaration: FormDeclaration = SIGNUP.parse().unwrap();
    let mut form = build(&declaration).unwrap();

    form.submit();
    assert_eq!(form.error("email"), Some(REQUIRED_MESSAGE));
    assert_eq!(form.error("password"), Some("Password please"));
    assert_eq!(form.error("legacy"), Some("This field is disabled"));
    assert_eq!(form.error("nickname"), None);

    form.change("email", "bad").unwrap();
    form.submit();
    assert_eq!(form.error("email"), Some(EMAIL_MESSAGE));
}

#[test]
fn test_declared_form_submits() {
    let declaration: FormDeclaration = r#"{
        "schema": { "email": "", "nickname": "anon" },
        "rules": {
            "email": { "validatorFn": { "function": "email" } },
            "nickname": { "validatorFn": false }
        }
    }"#
    .parse()
    .unwrap();

    let submitted: Rc<RefCell<Vec<FieldValues>>> = Rc::default();
    let mut form = FormEngine::builder()
        .declaration(&declaration, &ValidatorRegistry::with_builtins())
        .on_submit({
            let submitted = Rc::clone(&submitted);
            move |values| submitted.borrow_mut().push(values)
        })
        .build()
        .unwrap();

    form.change("email", "a@b.com").unwrap();
    assert!(form.submit().is_submitted());
    assert_eq!(
        *submitted.borrow(),
        vec![FieldValues::from([("email", "a@b.com"), ("nickname", "anon")])]
    );
}

#[test]
fn test_custom_registered_validator() {
    let declaration = FormDeclaration::from_json(&json!({
        "schema": { "password": "", "confirm": "" },
        "rules": {
            "password": { "validatorFn": { "function": "required" } },
            "confirm": { "validatorFn": { "function": "matches_password", "message": "No match" } }
        }
    }))
    .unwrap();

    let mut registry = ValidatorRegistry::with_builtins();
    registry.register("matches_password", |value, values, message| {
        (Some(value) != values.get("password")).then(|| message.unwrap_or("mismatch").to_string())
    });

    let mut form = FormEngine::builder()
        .declaration(&declaration, &registry)
        .on_submit(|_| {})
        .build()
        .unwrap();

    form.change("password", "a").unwrap();
    form.change("confirm", "b").unwrap();
    form.submit();
    assert_eq!(form.error("confirm"), Some("No match"));
}

#[test]
fn test_unknown_validator_fails_build() {
    let declaration = FormDeclaration::from_json(&json!({
        "schema": { "name": "" },
        "rules": { "name": { "validatorFn": { "function": "nope" } } }
    }))
    .unwrap();

    let err = build(&declaration).unwrap_err();
    assert_eq!(
        err,
        FormError::UnknownValidator {
            field: "name".to_string(),
            name: "nope".to_string()
        }
    );
}

#[test]
fn test_true_flag_rejected() {
    let err = FormDeclaration::from_json(&json!({
        "schema": { "name": "" },
        "rules": { "name": { "validatorFn": true } }
    }))
    .unwrap_err();
    assert_eq!(
        err,
        FormError::InvalidValidatorFlag {
            field: "name".to_string()
        }
    );
}

#[test]
fn test_schema_shape_errors() {
    let cases = [
        (json!({ "rules": {} }), FormError::MissingSchema),
        (json!({ "schema": null, "rules": {} }), FormError::MissingSchema),
        (
            json!({ "schema": [], "rules": {} }),
            FormError::SchemaNotObject { actual: "array" },
        ),
        (
            json!({ "schema": "email", "rules": {} }),
            FormError::SchemaNotObject { actual: "string" },
        ),
        (json!({ "schema": {}, "rules": {} }), FormError::EmptySchema),
        (
            json!({ "schema": { "age": 3 }, "rules": {} }),
            FormError::NonStringDefault {
                field: "age".to_string(),
                actual: "number",
            },
        ),
    ];

    for (value, expected) in cases {
        assert_eq!(FormDeclaration::from_json(&value).unwrap_err(), expected);
    }
}

#[test]
fn test_rules_shape_errors() {
    let schema = json!({ "name": "" });
    let cases = [
        (json!({ "schema": schema }), FormError::MissingRules),
        (
            json!({ "schema": schema, "rules": 1 }),
            FormError::RulesNotObject { actual: "number" },
        ),
        (json!({ "schema": schema, "rules": {} }), FormError::EmptyRules),
        (
            json!({ "schema": schema, "rules": { "name": "required" } }),
            FormError::RuleNotObject {
                field: "name".to_string(),
                actual: "string",
            },
        ),
        (
            json!({ "schema": schema, "rules": { "name": {} } }),
            FormError::MissingValidator {
                field: "name".to_string(),
            },
        ),
        (
            json!({ "schema": schema, "rules": { "name": { "validatorFn": 42 } } }),
            FormError::InvalidValidator {
                field: "name".to_string(),
                actual: "number",
            },
        ),
        (
            json!({ "schema": schema, "rules": { "name": { "validatorFn": { "function": 1 } } } }),
            FormError::InvalidValidator {
                field: "name".to_string(),
                actual: "object",
            },
        ),
    ];

    for (value, expected) in cases {
        assert_eq!(FormDeclaration::from_json(&value).unwrap_err(), expected);
    }
}

#[test]
fn test_declaration_must_be_object() {
    let err = FormDeclaration::from_json(&json!([1, 2])).unwrap_err();
    assert_eq!(err, FormError::DeclarationNotObject { actual: "array" });
}

#[test]
fn test_invalid_json_is_parse_error() {
    let err = "{ not json".parse::<FormDeclaration>().unwrap_err();
    assert!(matches!(err, FormError::Parse(_)));
}

#[test]
fn test_rule_without_schema_field_fails_build() {
    let declaration = FormDeclaration::from_json(&json!({
        "schema": { "name": "" },
        "rules": {
            "name": { "validatorFn": false },
            "ghost": { "validatorFn": false }
        }
    }))
    .unwrap();

    let err = build(&declaration).unwrap_err();
    assert_eq!(err.field(), Some("ghost"));
}

#[test]
fn test_fields_named_like_function_keys() {
    let declaration = FormDeclaration::from_json(&json!({
        "schema": { "function": "f", "message": "m" },
        "rules": {
            "function": { "validatorFn": false },
            "message": { "validatorFn": { "function": "required" } }
        }
    }))
    .unwrap();

    let keys: Vec<&str> = declaration.schema().keys().collect();
    assert_eq!(keys, vec!["function", "message"]);

    let mut form = build(&declaration).unwrap();
    form.change("message", "").unwrap();
    form.submit();
    assert_eq!(form.error("function"), None);
    assert_eq!(form.error("message"), Some(REQUIRED_MESSAGE));
}

#[test]
fn test_rules_map_with_function_key_reports_rule_entry() {
    let err = FormDeclaration::from_json(&json!({
        "schema": { "function": "" },
        "rules": { "function": "required" }
    }))
    .unwrap_err();
    assert_eq!(
        err,
        FormError::RuleNotObject {
            field: "function".to_string(),
            actual: "string",
        }
    );
}
