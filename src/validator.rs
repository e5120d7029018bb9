//! Request-body validation against operation schemas.

use serde_json::json;
use serde_json::Value;
use tracing::warn;

/// A single validation failure, pointing at the offending field.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    /// JSON body shape used for 400 responses.
    pub fn to_details(errors: &[FieldError]) -> Value {
        json!({
            "error": "validation_failed",
            "details": errors,
        })
    }
}

/// Validate `body` against `schema`, collecting every failure rather than
/// stopping at the first.
///
/// Returns `Err` only when the schema itself fails to compile; callers treat
/// that as "allow through" after logging, since a broken spec schema should
/// not brick the route.
pub fn validate_body(schema: &Value, body: &Value) -> anyhow::Result<Vec<FieldError>> {
    let validator = jsonschema::validator_for(schema).map_err(|e| {
        warn!(error = %e, "request schema failed to compile; skipping validation");
        anyhow::anyhow!("schema compile error: {e}")
    })?;
    let errors = validator
        .iter_errors(body)
        .map(|err| {
            let path = err.instance_path().to_string();
            FieldError {
                field: if path.is_empty() { "/".to_string() } else { path },
                message: err.to_string(),
            }
        })
        .collect();
    Ok(errors)
}
