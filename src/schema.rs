//! Builders for tool input schemas.
//!
//! A schema is plain data — a [`Value`] tree in the JSON Schema subset the
//! validator understands. Schemas are built once at tool registration time
//! and read-only afterwards.

use std::collections::BTreeMap;

use crate::value::Value;

/// An object schema with named properties and a required-field list.
///
/// The declaration order of `required` is preserved; the validator reports
/// missing fields in that order.
pub fn object(
    properties: impl IntoIterator<Item = (&'static str, Value)>,
    required: &[&str],
) -> Value {
    let props: BTreeMap<String, Value> = properties
        .into_iter()
        .map(|(name, schema)| (name.to_string(), schema))
        .collect();

    let mut schema = BTreeMap::new();
    schema.insert("type".to_string(), Value::from("object"));
    schema.insert("properties".to_string(), Value::Object(props));
    if !required.is_empty() {
        let names = required.iter().map(|name| Value::from(*name)).collect();
        schema.insert("required".to_string(), Value::Array(names));
    }
    Value::Object(schema)
}

/// A string schema, optionally restricted to an allowed set of values.
pub fn string(description: Option<&str>, allowed: Option<&[&str]>) -> Value {
    let mut schema = BTreeMap::new();
    schema.insert("type".to_string(), Value::from("string"));
    if let Some(desc) = description {
        schema.insert("description".to_string(), Value::from(desc));
    }
    if let Some(values) = allowed {
        let members = values.iter().map(|v| Value::from(*v)).collect();
        schema.insert("enum".to_string(), Value::Array(members));
    }
    Value::Object(schema)
}

/// An integer schema with optional inclusive bounds.
pub fn integer(description: Option<&str>, minimum: Option<i64>, maximum: Option<i64>) -> Value {
    let mut schema = BTreeMap::new();
    schema.insert("type".to_string(), Value::from("integer"));
    if let Some(desc) = description {
        schema.insert("description".to_string(), Value::from(desc));
    }
    if let Some(min) = minimum {
        schema.insert("minimum".to_string(), Value::Int(min));
    }
    if let Some(max) = maximum {
        schema.insert("maximum".to_string(), Value::Int(max));
    }
    Value::Object(schema)
}

/// A number schema accepting integral or fractional values, with optional bounds.
pub fn number(description: Option<&str>, minimum: Option<f64>, maximum: Option<f64>) -> Value {
    let mut schema = BTreeMap::new();
    schema.insert("type".to_string(), Value::from("number"));
    if let Some(desc) = description {
        schema.insert("description".to_string(), Value::from(desc));
    }
    if let Some(min) = minimum {
        schema.insert("minimum".to_string(), Value::Double(min));
    }
    if let Some(max) = maximum {
        schema.insert("maximum".to_string(), Value::Double(max));
    }
    Value::Object(schema)
}

/// A boolean schema.
pub fn boolean(description: Option<&str>) -> Value {
    let mut schema = BTreeMap::new();
    schema.insert("type".to_string(), Value::from("boolean"));
    if let Some(desc) = description {
        schema.insert("description".to_string(), Value::from(desc));
    }
    Value::Object(schema)
}

/// An array schema whose elements must match `items`.
pub fn array(items: Value, description: Option<&str>) -> Value {
    let mut schema = BTreeMap::new();
    schema.insert("type".to_string(), Value::from("array"));
    schema.insert("items".to_string(), items);
    if let Some(desc) = description {
        schema.insert("description".to_string(), Value::from(desc));
    }
    Value::Object(schema)
}

/// The unconstrained schema `{}` — accepts anything.
pub fn empty() -> Value {
    Value::Object(BTreeMap::new())
}
