// sandtable-core/src/domain/validation/rules.rs

use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use super::result::ValidationResult;
use crate::domain::error::{DomainError, ValidationCode};

pub type CustomValidator = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Declarative constraints for one named field.
///
/// Checks run in a fixed order and the first failure wins:
/// required, (absent → stop), min length, max length, pattern, custom predicate.
#[derive(Clone, Default)]
pub struct FieldRule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Regex>,
    pub custom: Option<CustomValidator>,
    /// Replaces the user-facing message of any failure on this field.
    pub error_message: Option<String>,
    /// Replaces the per-check default code of any failure on this field.
    pub code: Option<ValidationCode>,
}

impl FieldRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn custom<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(predicate));
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn code(mut self, code: ValidationCode) -> Self {
        self.code = Some(code);
        self
    }

    fn failure(
        &self,
        field: &str,
        default_code: ValidationCode,
        constraint: &str,
        message: String,
    ) -> DomainError {
        let err = DomainError::validation(self.code.unwrap_or(default_code), message)
            .with_detail("field", field)
            .with_detail("constraint", constraint);
        match &self.error_message {
            Some(text) => err.with_user_message(text.clone()),
            None => err,
        }
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("required", &self.required)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("pattern", &self.pattern.as_ref().map(|p| p.as_str()))
            .field("custom", &self.custom.is_some())
            .field("error_message", &self.error_message)
            .field("code", &self.code)
            .finish()
    }
}

/// Field name → rule, evaluated in insertion order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<(String, FieldRule)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.rules.push((name.into(), rule));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Missing, null and empty-string values all count as absent.
pub fn is_absent(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

pub fn validate_field(
    value: Option<&Value>,
    field: &str,
    rule: &FieldRule,
) -> Result<(), DomainError> {
    if is_absent(value) {
        if rule.required {
            return Err(rule.failure(
                field,
                ValidationCode::MissingRequiredField,
                "required",
                format!("Field '{}' is required", field),
            ));
        }
        return Ok(());
    }

    let Some(value) = value else {
        return Ok(());
    };

    if let Value::String(text) = value {
        let length = text.chars().count();

        if let Some(min) = rule.min_length.filter(|min| length < *min) {
            return Err(rule
                .failure(
                    field,
                    ValidationCode::FieldTooShort,
                    "minLength",
                    format!(
                        "Field '{}' must be at least {} characters (got {})",
                        field, min, length
                    ),
                )
                .with_detail("min", min)
                .with_detail("actual", length));
        }

        if let Some(max) = rule.max_length.filter(|max| length > *max) {
            return Err(rule
                .failure(
                    field,
                    ValidationCode::FieldTooLong,
                    "maxLength",
                    format!(
                        "Field '{}' must be at most {} characters (got {})",
                        field, max, length
                    ),
                )
                .with_detail("max", max)
                .with_detail("actual", length));
        }

        if let Some(pattern) = rule.pattern.as_ref().filter(|p| !p.is_match(text)) {
            return Err(rule.failure(
                field,
                ValidationCode::PatternMismatch,
                "pattern",
                format!(
                    "Field '{}' does not match pattern {}",
                    field,
                    pattern.as_str()
                ),
            ));
        }
    }

    if let Some(predicate) = &rule.custom {
        if !predicate(value) {
            return Err(rule.failure(
                field,
                ValidationCode::CustomRuleFailed,
                "custom",
                format!("Field '{}' failed custom validation", field),
            ));
        }
    }

    Ok(())
}

/// Checks every rule; one failing field never hides another.
pub fn validate_fields(data: &Value, rules: &RuleSet) -> ValidationResult {
    let mut result = ValidationResult::valid();
    for (field, rule) in rules.iter() {
        result.push_result(validate_field(data.get(field), field, rule));
    }
    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorCode;
    use serde_json::json;

    fn code_of(err: &DomainError) -> ErrorCode {
        err.code()
    }

    #[test]
    fn test_required_rejects_absent_values() {
        let rule = FieldRule::required();
        for value in [None, Some(json!(null)), Some(json!(""))] {
            let err = validate_field(value.as_ref(), "name", &rule).unwrap_err();
            assert_eq!(
                code_of(&err),
                ErrorCode::Validation(ValidationCode::MissingRequiredField)
            );
            assert!(err.message().contains("name"));
        }
    }

    #[test]
    fn test_optional_absent_value_skips_remaining_checks() {
        let rule = FieldRule::new().min_length(3).custom(|_| false);
        assert!(validate_field(None, "nickname", &rule).is_ok());
        assert!(validate_field(Some(&json!("")), "nickname", &rule).is_ok());
    }

    #[test]
    fn test_checks_short_circuit_in_order() {
        let rule = FieldRule::required()
            .min_length(3)
            .max_length(5)
            .pattern(Regex::new(r"^\d+$").unwrap())
            .custom(|_| false);

        let short = validate_field(Some(&json!("ab")), "pin", &rule).unwrap_err();
        assert_eq!(code_of(&short), ErrorCode::Validation(ValidationCode::FieldTooShort));

        let long = validate_field(Some(&json!("abcdef")), "pin", &rule).unwrap_err();
        assert_eq!(code_of(&long), ErrorCode::Validation(ValidationCode::FieldTooLong));
        assert_eq!(long.detail("max"), Some(&json!(5)));

        let pattern = validate_field(Some(&json!("abcd")), "pin", &rule).unwrap_err();
        assert_eq!(
            code_of(&pattern),
            ErrorCode::Validation(ValidationCode::PatternMismatch)
        );

        let custom = validate_field(Some(&json!("1234")), "pin", &rule).unwrap_err();
        assert_eq!(
            code_of(&custom),
            ErrorCode::Validation(ValidationCode::CustomRuleFailed)
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let rule = FieldRule::new().max_length(3);
        assert!(validate_field(Some(&json!("队伍名")), "team", &rule).is_ok());
    }

    #[test]
    fn test_overrides_apply_to_every_failure() {
        let rule = FieldRule::required()
            .code(ValidationCode::InvalidUserId)
            .message("Pick a user");
        let err = validate_field(None, "userId", &rule).unwrap_err();
        assert_eq!(code_of(&err), ErrorCode::Validation(ValidationCode::InvalidUserId));
        assert_eq!(err.user_message(), "Pick a user");
        assert_eq!(err.detail("field"), Some(&json!("userId")));
    }

    #[test]
    fn test_validate_fields_collects_every_failure_in_declared_order() {
        let rules = RuleSet::new()
            .field("A", FieldRule::required())
            .field("B", FieldRule::required())
            .field("C", FieldRule::new().pattern(Regex::new(r"^\d+$").unwrap()));
        let data = json!({ "A": "", "C": "xyz" });

        let result = validate_fields(&data, &rules);
        assert!(!result.is_valid());
        let fields: Vec<&Value> = result
            .errors()
            .iter()
            .map(|e| e.detail("field").unwrap())
            .collect();
        assert_eq!(fields, vec![&json!("A"), &json!("B"), &json!("C")]);
    }
}
