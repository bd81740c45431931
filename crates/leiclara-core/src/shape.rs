//! Result-shape contract.
//!
//! Both the local engine and the remote adapter must produce a result with
//! all six keys present. Validation runs in three steps:
//!
//! 1. Key existence (`validate`)
//! 2. JSON Schema type check against `schema/result.schema.json`
//! 3. Typed deserialization into [`ResultShape`], rejecting unknown keys

use serde_json::Value as JsonValue;
use std::sync::OnceLock;
use thiserror::Error;

use crate::types::ResultShape;

/// Wire keys every result must carry, in canonical order.
pub const REQUIRED_KEYS: [&str; 6] = [
    "textoSimplificado",
    "resumoExecutivo",
    "clausulasImportantes",
    "glossario",
    "pontosAtencao",
    "perguntasSugeridas",
];

/// Embedded result schema (loaded at compile time).
const RESULT_SCHEMA_JSON: &str = include_str!("../schema/result.schema.json");

/// Compiled JSON Schema validator (initialized once, reused).
static COMPILED_SCHEMA: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

/// Errors from result-shape validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("Result is not a JSON object")]
    NotAnObject,

    #[error("Incomplete result: missing {}", .missing.join(", "))]
    Incomplete { missing: Vec<String> },

    #[error("Result does not match schema: {}", .0.join("; "))]
    Schema(Vec<String>),

    #[error("Failed to load result schema: {0}")]
    SchemaUnavailable(String),

    #[error("Failed to decode result: {0}")]
    Deserialize(String),
}

/// Check that every required key is present on the candidate.
///
/// Existence only: values are not inspected here.
pub fn validate(candidate: &JsonValue) -> Result<(), ShapeError> {
    let object = candidate.as_object().ok_or(ShapeError::NotAnObject)?;

    let missing: Vec<String> = REQUIRED_KEYS
        .iter()
        .filter(|key| !object.contains_key(**key))
        .map(|key| key.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ShapeError::Incomplete { missing })
    }
}

fn get_validator() -> Result<&'static jsonschema::Validator, ShapeError> {
    let result = COMPILED_SCHEMA.get_or_init(|| {
        let schema_value: JsonValue = match serde_json::from_str(RESULT_SCHEMA_JSON) {
            Ok(v) => v,
            Err(e) => return Err(format!("Invalid schema JSON: {}", e)),
        };

        match jsonschema::options().build(&schema_value) {
            Ok(v) => Ok(v),
            Err(e) => Err(format!("Failed to compile schema: {}", e)),
        }
    });

    match result {
        Ok(v) => Ok(v),
        Err(e) => Err(ShapeError::SchemaUnavailable(e.clone())),
    }
}

/// Type-check a candidate against the result schema.
///
/// Returns every violation with its instance path.
pub fn check_schema(candidate: &JsonValue) -> Result<(), ShapeError> {
    let validator = get_validator()?;

    let errors: Vec<String> = validator
        .iter_errors(candidate)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ShapeError::Schema(errors))
    }
}

impl ResultShape {
    /// Validate and decode a JSON value into a typed result.
    pub fn from_value(value: JsonValue) -> Result<Self, ShapeError> {
        validate(&value)?;
        check_schema(&value)?;
        serde_json::from_value(value).map_err(|e| ShapeError::Deserialize(e.to_string()))
    }

    /// Serialize to the wire representation.
    pub fn to_value(&self) -> JsonValue {
        // A struct of strings and vectors always serializes.
        serde_json::to_value(self).unwrap_or(JsonValue::Null)
    }
}
