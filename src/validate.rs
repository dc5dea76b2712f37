//! Recursive validation of tool arguments against a declared input schema.
//!
//! First-fault policy: validation stops at the earliest violation and never
//! accumulates. Required fields are checked before any type check, in the
//! order they were declared in the schema.

use std::collections::BTreeMap;

use crate::value::Value;

/// A single constraint violation. The display string is the human-readable
/// message surfaced to the client.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required argument: {0}")]
    MissingArgument(String),
    #[error("{path}: expected {expected}")]
    TypeMismatch { path: String, expected: &'static str },
    #[error("{path}: must be >= {minimum}")]
    BelowMinimum { path: String, minimum: f64 },
    #[error("{path}: must be <= {maximum}")]
    AboveMaximum { path: String, maximum: f64 },
    #[error("{path}: {value:?} is not one of the allowed values")]
    NotInEnum { path: String, value: String },
}

/// Validate `arguments` against an object-rooted schema.
///
/// Schemas whose declared `type` is not `"object"` validate trivially — only
/// tool input schemas are object-rooted in this subset. Arguments without a
/// corresponding `properties` entry pass silently (forward compatibility).
pub fn validate(
    arguments: &BTreeMap<String, Value>,
    schema: &Value,
) -> Result<(), ValidationError> {
    if schema.get("type").and_then(Value::string_value) != Some("object") {
        return Ok(());
    }

    // Required fields first, in declaration order.
    if let Some(required) = schema.get("required").and_then(Value::array_value) {
        for name in required.iter().filter_map(Value::string_value) {
            if !arguments.contains_key(name) {
                return Err(ValidationError::MissingArgument(name.to_string()));
            }
        }
    }

    let properties = schema.get("properties");
    for (name, value) in arguments {
        if let Some(property) = properties.and_then(|p| p.get(name)) {
            check_value(name, value, property)?;
        }
    }

    Ok(())
}

/// Check one value against one property schema. `path` labels the value in
/// error messages; array elements extend it as `name[index]`.
fn check_value(path: &str, value: &Value, schema: &Value) -> Result<(), ValidationError> {
    let declared = match schema.get("type").and_then(Value::string_value) {
        Some(t) => t,
        // No declared type, nothing to enforce.
        None => return Ok(()),
    };

    match declared {
        "string" => {
            let s = value.string_value().ok_or(ValidationError::TypeMismatch {
                path: path.to_string(),
                expected: "string",
            })?;
            if let Some(allowed) = schema.get("enum").and_then(Value::array_value) {
                let member = allowed
                    .iter()
                    .filter_map(Value::string_value)
                    .any(|candidate| candidate == s);
                if !member {
                    return Err(ValidationError::NotInEnum {
                        path: path.to_string(),
                        value: s.to_string(),
                    });
                }
            }
            Ok(())
        }

        "integer" => {
            // A double with no fractional remainder coerces to an integer.
            let numeric = match value {
                Value::Int(i) => *i as f64,
                Value::Double(d) if d.fract() == 0.0 => *d,
                _ => {
                    return Err(ValidationError::TypeMismatch {
                        path: path.to_string(),
                        expected: "integer",
                    });
                }
            };
            check_bounds(path, numeric, schema)
        }

        "number" => {
            let numeric = value.double_value().ok_or(ValidationError::TypeMismatch {
                path: path.to_string(),
                expected: "number",
            })?;
            check_bounds(path, numeric, schema)
        }

        "boolean" => match value {
            Value::Bool(_) => Ok(()),
            _ => Err(ValidationError::TypeMismatch {
                path: path.to_string(),
                expected: "boolean",
            }),
        },

        "array" => {
            let items = value.array_value().ok_or(ValidationError::TypeMismatch {
                path: path.to_string(),
                expected: "array",
            })?;
            if let Some(item_schema) = schema.get("items") {
                for (index, item) in items.iter().enumerate() {
                    check_value(&format!("{path}[{index}]"), item, item_schema)?;
                }
            }
            Ok(())
        }

        "object" => match value {
            Value::Object(_) => Ok(()),
            _ => Err(ValidationError::TypeMismatch {
                path: path.to_string(),
                expected: "object",
            }),
        },

        // Unrecognized declared types are unconstrained.
        _ => Ok(()),
    }
}

/// Bounds are evaluated only after type coercion succeeds; violations are
/// strict inequalities.
fn check_bounds(path: &str, numeric: f64, schema: &Value) -> Result<(), ValidationError> {
    if let Some(minimum) = schema.get("minimum").and_then(Value::double_value) {
        if numeric < minimum {
            return Err(ValidationError::BelowMinimum {
                path: path.to_string(),
                minimum,
            });
        }
    }
    if let Some(maximum) = schema.get("maximum").and_then(Value::double_value) {
        if numeric > maximum {
            return Err(ValidationError::AboveMaximum {
                path: path.to_string(),
                maximum,
            });
        }
    }
    Ok(())
}
