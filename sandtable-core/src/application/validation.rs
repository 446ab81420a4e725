// sandtable-core/src/application/validation.rs
//
// Validates request documents (JSON) against a named admin operation.

use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{info, instrument};

use crate::domain::validation::{ValidationResult, validate};
use crate::error::SandtableError;
use crate::infrastructure::error::InfrastructureError;

/// Parses `json` and runs the validator registered for `operation`.
/// Malformed JSON is an infrastructure error; an unknown operation is an invalid result.
pub fn validate_document(operation: &str, json: &str) -> Result<ValidationResult, SandtableError> {
    let data: Value = serde_json::from_str(json).map_err(InfrastructureError::JsonError)?;
    let result = validate(operation, &data);
    info!(
        operation,
        valid = result.is_valid(),
        errors = result.errors().len(),
        "Request validated"
    );
    Ok(result)
}

#[instrument(skip(path), fields(path = %path.display()))]
pub fn validate_request_file(
    path: &Path,
    operation: &str,
) -> Result<ValidationResult, SandtableError> {
    let content = fs::read_to_string(path)?;
    validate_document(operation, &content)
}
