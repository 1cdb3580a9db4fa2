//! Conversion of raw provider output into typed results.
//!
//! Providers answer with loosely typed JSON. Every response passes through
//! exactly one of these functions before the rest of the crate sees it.

use intentrs_core::{
    ClassificationResult, ClassifierError, ConversationalClassificationResult, Result,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Validate a single-turn response.
pub fn normalize_classification(value: Value) -> Result<ClassificationResult> {
    normalize(value, &["message", "category"])
}

/// Validate a conversational response.
pub fn normalize_conversational(value: Value) -> Result<ConversationalClassificationResult> {
    normalize(
        value,
        &[
            "message",
            "reasoning",
            "intent_transition",
            "intent",
            "confidence",
        ],
    )
}

fn normalize<T: DeserializeOwned>(value: Value, required: &[&str]) -> Result<T> {
    let Value::Object(fields) = value else {
        return Err(ClassifierError::validation(format!(
            "expected a JSON object, got {}",
            describe(&value)
        )));
    };

    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|name| fields.get(*name).is_none_or(Value::is_null))
        .collect();
    if !missing.is_empty() {
        return Err(ClassifierError::validation(format!(
            "missing field(s): {}",
            missing.join(", ")
        )));
    }

    serde_json::from_value(Value::Object(fields))
        .map_err(|e| ClassifierError::validation(e.to_string()))
}

const fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
