//! JSON Schema helpers for MCP tool input validation.
//!
//! Validation is structural only: required keys, JSON types, and string
//! enums. No length or range constraints are enforced here.

use serde_json::Value;
use thiserror::Error;

/// Schema validation errors.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The input does not match the expected schema.
    #[error("schema validation failed: {message}")]
    ValidationFailed { message: String },
    /// The schema itself is malformed.
    #[error("invalid schema: {message}")]
    InvalidSchema { message: String },
}

impl SchemaError {
    fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }
}

/// Checks that a JSON value contains required properties from a schema.
pub fn validate_required_fields(schema: &Value, input: &Value) -> Result<(), SchemaError> {
    let required = match schema.get("required") {
        Some(Value::Array(arr)) => arr,
        _ => return Ok(()),
    };

    let input_obj = input
        .as_object()
        .ok_or_else(|| SchemaError::validation("input must be an object"))?;

    for field in required {
        let field_name = field.as_str().ok_or_else(|| SchemaError::InvalidSchema {
            message: "required field names must be strings".to_string(),
        })?;
        if !input_obj.contains_key(field_name) {
            return Err(SchemaError::validation(format!(
                "missing required field: {field_name}"
            )));
        }
    }

    Ok(())
}

/// Validates `input` against an object schema.
///
/// Checks required fields, then the `type` (and `enum`, and array `items`
/// type) of every declared property that is present. Undeclared properties
/// are ignored.
pub fn validate_arguments(schema: &Value, input: &Value) -> Result<(), SchemaError> {
    if !input.is_object() {
        return Err(SchemaError::validation("input must be an object"));
    }
    validate_required_fields(schema, input)?;

    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Ok(());
    };

    for (name, prop_schema) in properties {
        if let Some(value) = input.get(name) {
            validate_property(name, prop_schema, value)?;
        }
    }

    Ok(())
}

fn validate_property(name: &str, schema: &Value, value: &Value) -> Result<(), SchemaError> {
    if let Some(expected) = schema.get("type").and_then(Value::as_str) {
        if !matches_type(expected, value) {
            return Err(SchemaError::validation(format!(
                "field '{name}' must be of type {expected}"
            )));
        }
    }

    if let Some(Value::Array(allowed)) = schema.get("enum") {
        if !allowed.contains(value) {
            let options = allowed
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(SchemaError::validation(format!(
                "field '{name}' must be one of: {options}"
            )));
        }
    }

    if let (Some(items), Value::Array(elements)) = (schema.get("items"), value) {
        for (i, element) in elements.iter().enumerate() {
            validate_property(&format!("{name}[{i}]"), items, element)?;
        }
    }

    Ok(())
}

fn matches_type(expected: &str, value: &Value) -> bool {
    match expected {
        "string" => value.is_string(),
        "boolean" => value.is_boolean(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        _ => true,
    }
}
