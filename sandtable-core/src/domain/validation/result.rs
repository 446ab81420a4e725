// sandtable-core/src/domain/validation/result.rs

use serde::Serialize;

use crate::domain::error::DomainError;

/// Outcome of a validator run. Errors keep rule evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<DomainError>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn from_errors(errors: Vec<DomainError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings: Vec::new(),
        }
    }

    pub fn single(error: DomainError) -> Self {
        Self::from_errors(vec![error])
    }

    pub fn push(&mut self, error: DomainError) {
        self.errors.push(error);
        self.is_valid = false;
    }

    pub fn push_result(&mut self, outcome: Result<(), DomainError>) {
        if let Err(error) = outcome {
            self.push(error);
        }
    }

    pub fn warn(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Appends another result's errors and warnings after this one's.
    pub fn merge(&mut self, other: ValidationResult) {
        for error in other.errors {
            self.push(error);
        }
        self.warnings.extend(other.warnings);
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn errors(&self) -> &[DomainError] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn first_error(&self) -> Option<&DomainError> {
        self.errors.first()
    }

    /// Fail-fast view: the first error wins.
    pub fn into_result(self) -> Result<(), DomainError> {
        match self.errors.into_iter().next() {
            Some(first) => Err(first),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::error::ValidationCode;

    #[test]
    fn test_first_error_follows_push_order() {
        let mut result = ValidationResult::valid();
        assert!(result.first_error().is_none());

        result.push(DomainError::validation(ValidationCode::InvalidUserId, "first"));
        result.push(DomainError::validation(ValidationCode::InvalidEmail, "second"));
        let first = result.first_error().unwrap();
        assert_eq!(first.message(), "first");
        assert_eq!(result.into_result().unwrap_err().message(), "first");
    }

    #[test]
    fn test_is_valid_tracks_errors() {
        let mut result = ValidationResult::valid();
        assert!(result.is_valid());
        result.warn("page size defaulted");
        assert!(result.is_valid());

        result.push(DomainError::validation(ValidationCode::InvalidEmail, "bad"));
        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 1);
    }

    #[test]
    fn test_into_result_returns_first_error() {
        let result = ValidationResult::from_errors(vec![
            DomainError::validation(ValidationCode::InvalidUserId, "first"),
            DomainError::validation(ValidationCode::InvalidActivityId, "second"),
        ]);
        let err = result.into_result().unwrap_err();
        assert_eq!(err.message(), "first");

        assert!(ValidationResult::from_errors(vec![]).into_result().is_ok());
    }

    #[test]
    fn test_merge_preserves_order() {
        let mut left = ValidationResult::single(DomainError::validation(
            ValidationCode::InvalidUserId,
            "a",
        ));
        let right = ValidationResult::single(DomainError::validation(
            ValidationCode::InvalidTeamId,
            "b",
        ));
        left.merge(right);
        let messages: Vec<&str> = left.errors().iter().map(|e| e.message()).collect();
        assert_eq!(messages, vec!["a", "b"]);
    }
}
