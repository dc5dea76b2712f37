//! Schema validator tests: required-first ordering, numeric coercion,
//! first-fault messages, and the permissive defaults.

use std::collections::BTreeMap;

use mcp_tool_server::schema;
use mcp_tool_server::validate::{validate, ValidationError};
use mcp_tool_server::value::Value;

fn args(entries: &[(&str, Value)]) -> BTreeMap<String, Value> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

// ---------------------------------------------------------------------------
// Required fields
// ---------------------------------------------------------------------------

#[test]
fn missing_required_field_fails_first() {
    let schema = schema::object(
        [("x", schema::integer(None, None, None))],
        &["x"],
    );

    let err = validate(&args(&[]), &schema).unwrap_err();
    assert_eq!(err, ValidationError::MissingArgument("x".to_string()));
}

#[test]
fn required_check_precedes_type_checks() {
    // `count` is present but wrong-typed; the missing `name` must win anyway.
    let schema = schema::object(
        [
            ("name", schema::string(None, None)),
            ("count", schema::integer(None, None, None)),
        ],
        &["name", "count"],
    );

    let err = validate(&args(&[("count", Value::from("not a number"))]), &schema).unwrap_err();
    assert_eq!(err, ValidationError::MissingArgument("name".to_string()));
}

#[test]
fn required_fields_reported_in_declaration_order() {
    let schema = schema::object(
        [
            ("zebra", schema::string(None, None)),
            ("apple", schema::string(None, None)),
        ],
        &["zebra", "apple"],
    );

    // "zebra" is declared first and must be reported first, despite sorting
    // after "apple" lexicographically.
    let err = validate(&args(&[]), &schema).unwrap_err();
    assert_eq!(err, ValidationError::MissingArgument("zebra".to_string()));
}

// ---------------------------------------------------------------------------
// Numeric coercion and bounds
// ---------------------------------------------------------------------------

#[test]
fn integer_field_accepts_zero_fraction_double() {
    let schema = schema::object([("n", schema::integer(None, None, None))], &[]);

    assert!(validate(&args(&[("n", Value::Int(5))]), &schema).is_ok());
    assert!(validate(&args(&[("n", Value::Double(5.0))]), &schema).is_ok());

    let err = validate(&args(&[("n", Value::Double(5.5))]), &schema).unwrap_err();
    assert!(err.to_string().contains("expected integer"), "{err}");
}

#[test]
fn integer_above_maximum_reports_bound() {
    let schema = schema::object([("count", schema::integer(None, Some(1), Some(10)))], &[]);

    let err = validate(&args(&[("count", Value::Int(100))]), &schema).unwrap_err();
    assert!(err.to_string().contains("must be <= 10"), "{err}");
}

#[test]
fn integer_below_minimum_reports_bound() {
    let schema = schema::object([("count", schema::integer(None, Some(1), Some(10)))], &[]);

    let err = validate(&args(&[("count", Value::Int(0))]), &schema).unwrap_err();
    assert!(err.to_string().contains("must be >= 1"), "{err}");
}

#[test]
fn integer_type_mismatch_reports_expected_type() {
    let schema = schema::object([("count", schema::integer(None, Some(1), Some(10)))], &[]);

    let err = validate(&args(&[("count", Value::from("five"))]), &schema).unwrap_err();
    assert!(err.to_string().contains("expected integer"), "{err}");
}

#[test]
fn bounds_are_inclusive() {
    let schema = schema::object([("count", schema::integer(None, Some(1), Some(10)))], &[]);

    assert!(validate(&args(&[("count", Value::Int(1))]), &schema).is_ok());
    assert!(validate(&args(&[("count", Value::Int(10))]), &schema).is_ok());
}

#[test]
fn number_field_widens_int_and_applies_bounds() {
    let schema = schema::object([("ratio", schema::number(None, Some(0.0), Some(1.0)))], &[]);

    assert!(validate(&args(&[("ratio", Value::Int(1))]), &schema).is_ok());
    assert!(validate(&args(&[("ratio", Value::Double(0.25))]), &schema).is_ok());

    let err = validate(&args(&[("ratio", Value::Double(1.5))]), &schema).unwrap_err();
    assert!(err.to_string().contains("must be <= 1"), "{err}");

    let err = validate(&args(&[("ratio", Value::Bool(true))]), &schema).unwrap_err();
    assert!(err.to_string().contains("expected number"), "{err}");
}

// ---------------------------------------------------------------------------
// Strings, enums, booleans, objects
// ---------------------------------------------------------------------------

#[test]
fn string_enum_membership() {
    let schema = schema::object(
        [("level", schema::string(None, Some(&["debug", "info", "warn"])))],
        &[],
    );

    assert!(validate(&args(&[("level", Value::from("info"))]), &schema).is_ok());

    let err = validate(&args(&[("level", Value::from("trace"))]), &schema).unwrap_err();
    assert_eq!(
        err,
        ValidationError::NotInEnum {
            path: "level".to_string(),
            value: "trace".to_string(),
        }
    );
}

#[test]
fn boolean_field_rejects_other_variants() {
    let schema = schema::object([("flag", schema::boolean(None))], &[]);

    assert!(validate(&args(&[("flag", Value::Bool(false))]), &schema).is_ok());

    let err = validate(&args(&[("flag", Value::Int(1))]), &schema).unwrap_err();
    assert!(err.to_string().contains("expected boolean"), "{err}");
}

#[test]
fn object_field_checks_variant_only() {
    let schema = schema::object([("meta", schema::object([], &[]))], &[]);

    assert!(validate(&args(&[("meta", Value::Object(BTreeMap::new()))]), &schema).is_ok());

    let err = validate(&args(&[("meta", Value::from("nope"))]), &schema).unwrap_err();
    assert!(err.to_string().contains("expected object"), "{err}");
}

// ---------------------------------------------------------------------------
// Arrays
// ---------------------------------------------------------------------------

#[test]
fn array_elements_validated_with_indexed_path() {
    let schema = schema::object(
        [("tags", schema::array(schema::string(None, None), None))],
        &[],
    );

    let good = Value::Array(vec![Value::from("a"), Value::from("b")]);
    assert!(validate(&args(&[("tags", good)]), &schema).is_ok());

    let bad = Value::Array(vec![Value::from("a"), Value::Int(2)]);
    let err = validate(&args(&[("tags", bad)]), &schema).unwrap_err();
    assert_eq!(
        err,
        ValidationError::TypeMismatch {
            path: "tags[1]".to_string(),
            expected: "string",
        }
    );
}

#[test]
fn non_array_value_for_array_field_fails() {
    let schema = schema::object(
        [("tags", schema::array(schema::string(None, None), None))],
        &[],
    );

    let err = validate(&args(&[("tags", Value::from("solo"))]), &schema).unwrap_err();
    assert!(err.to_string().contains("expected array"), "{err}");
}

// ---------------------------------------------------------------------------
// Permissive defaults
// ---------------------------------------------------------------------------

#[test]
fn unknown_arguments_pass_silently() {
    let schema = schema::object([("known", schema::string(None, None))], &[]);

    let provided = args(&[
        ("known", Value::from("ok")),
        ("extra", Value::Int(99)),
    ]);
    assert!(validate(&provided, &schema).is_ok());
}

#[test]
fn unrecognized_declared_type_passes() {
    let mut property = BTreeMap::new();
    property.insert("type".to_string(), Value::from("uuid"));
    let schema = schema::object([("id", Value::Object(property))], &[]);

    assert!(validate(&args(&[("id", Value::Int(12))]), &schema).is_ok());
}

#[test]
fn non_object_schema_is_a_no_op() {
    let provided = args(&[("anything", Value::Bool(true))]);

    assert!(validate(&provided, &schema::string(None, None)).is_ok());
    assert!(validate(&provided, &schema::empty()).is_ok());
}
