// sandtable-core/src/domain/validation/checks.rs
//
// Single-purpose validators with fixed codes and messages.

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use validator::ValidateEmail;

use super::requests::{
    ActivityStatus, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_IDENTIFIER_LENGTH, MAX_PAGE_SIZE, UserType,
};
use super::result::ValidationResult;
use super::rules::FieldRule;
use crate::domain::error::{DomainError, ValidationCode};

fn uuid_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
            .unwrap_or_else(|_| {
                // Hardcoded pattern; fall back to a regex that never matches.
                Regex::new("$^").unwrap_or_else(|_| unreachable!())
            })
    })
}

pub fn is_uuid(value: &str) -> bool {
    uuid_regex().is_match(value)
}

/// Backend IDs are either strict UUIDs or opaque non-blank strings of bounded length.
pub fn is_identifier(value: &str) -> bool {
    is_uuid(value) || (!value.trim().is_empty() && value.chars().count() <= MAX_IDENTIFIER_LENGTH)
}

/// Rule for a required identifier field; every failure reports `code`.
pub fn identifier_rule(code: ValidationCode) -> FieldRule {
    FieldRule::required()
        .custom(|value| value.as_str().is_some_and(is_identifier))
        .code(code)
}

/// Same as [`identifier_rule`] without the presence requirement.
pub fn optional_identifier_rule(code: ValidationCode) -> FieldRule {
    FieldRule::new()
        .custom(|value| value.as_str().is_some_and(is_identifier))
        .code(code)
}

pub fn validate_uuid(value: &str, field: &str) -> Result<(), DomainError> {
    if is_uuid(value) {
        return Ok(());
    }
    Err(
        DomainError::validation(
            ValidationCode::InvalidUuid,
            format!("Field '{}' must be a UUID, got '{}'", field, value),
        )
        .with_detail("field", field),
    )
}

pub fn validate_email(value: &str) -> Result<(), DomainError> {
    if value.to_string().validate_email() {
        return Ok(());
    }
    Err(DomainError::validation(
        ValidationCode::InvalidEmail,
        format!("'{}' is not a valid email address", value),
    )
    .with_detail("field", "email"))
}

/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Both bounds must parse and `start` must be strictly before `end`.
pub fn validate_date_range(start: &str, end: &str) -> Result<(), DomainError> {
    let range_error = |message: String| {
        DomainError::validation(ValidationCode::InvalidDateRange, message)
            .with_detail("startDate", start)
            .with_detail("endDate", end)
    };

    let start_ts =
        parse_date(start).ok_or_else(|| range_error(format!("Invalid start date '{}'", start)))?;
    let end_ts =
        parse_date(end).ok_or_else(|| range_error(format!("Invalid end date '{}'", end)))?;

    if start_ts >= end_ts {
        return Err(range_error(format!(
            "Start date '{}' must be earlier than end date '{}'",
            start, end
        )));
    }
    Ok(())
}

pub fn validate_user_type(value: &Value) -> Result<UserType, DomainError> {
    value
        .as_i64()
        .and_then(|raw| UserType::try_from(raw).ok())
        .ok_or_else(|| {
            DomainError::validation(
                ValidationCode::InvalidUserType,
                format!("User type must be one of 1, 2, 3, got {}", value),
            )
            .with_detail("field", "userType")
            .with_detail("value", value.clone())
        })
}

pub fn validate_activity_status(value: &str) -> Result<ActivityStatus, DomainError> {
    value.parse::<ActivityStatus>().map_err(|_| {
        let allowed: Vec<&str> = ActivityStatus::ALL.iter().map(|s| s.as_str()).collect();
        DomainError::validation(
            ValidationCode::InvalidActivityStatus,
            format!(
                "Activity status '{}' is not one of [{}]",
                value,
                allowed.join(", ")
            ),
        )
        .with_detail("field", "status")
        .with_detail("value", value)
    })
}

/// `page >= 1` and `1 <= page_size <= 100`. Both bounds are reported.
pub fn validate_pagination(page: i64, page_size: i64) -> ValidationResult {
    let mut result = ValidationResult::valid();
    if page < 1 {
        result.push(
            DomainError::validation(
                ValidationCode::InvalidPagination,
                format!("Page must be a positive integer, got {}", page),
            )
            .with_detail("field", "page")
            .with_detail("value", page),
        );
    }
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        result.push(
            DomainError::validation(
                ValidationCode::InvalidPagination,
                format!(
                    "Page size must be between 1 and {}, got {}",
                    MAX_PAGE_SIZE, page_size
                ),
            )
            .with_detail("field", "pageSize")
            .with_detail("value", page_size),
        );
    }
    result
}

fn read_page_value(value: Option<&Value>, field: &str, default: i64) -> Result<i64, DomainError> {
    match value {
        None | Some(Value::Null) => Ok(default),
        Some(v) => v.as_i64().ok_or_else(|| {
            DomainError::validation(
                ValidationCode::InvalidPagination,
                format!("Field '{}' must be an integer, got {}", field, v),
            )
            .with_detail("field", field)
            .with_detail("value", v.clone())
        }),
    }
}

/// Pagination read from a raw payload: absent values take defaults, non-integers fail.
pub fn validate_pagination_values(
    page: Option<&Value>,
    page_size: Option<&Value>,
) -> ValidationResult {
    let mut result = ValidationResult::valid();

    let page = read_page_value(page, "page", DEFAULT_PAGE)
        .map_err(|e| result.push(e))
        .unwrap_or(DEFAULT_PAGE);
    let page_size = read_page_value(page_size, "pageSize", DEFAULT_PAGE_SIZE)
        .map_err(|e| result.push(e))
        .unwrap_or(DEFAULT_PAGE_SIZE);

    result.merge(validate_pagination(page, page_size));
    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_uuid_detection() {
        assert!(is_uuid("3f2b8c1e-9d4a-4b6f-8e2a-1c3d5e7f9a0b"));
        assert!(is_uuid("3F2B8C1E-9D4A-4B6F-8E2A-1C3D5E7F9A0B"));
        assert!(!is_uuid("3f2b8c1e-9d4a-4b6f-7e2a-1c3d5e7f9a0b"));
        assert!(!is_uuid("u1"));
        assert!(validate_uuid("u1", "activityId").is_err());
    }

    #[test]
    fn test_identifier_accepts_opaque_ids() {
        assert!(is_identifier("u1"));
        assert!(is_identifier(&"x".repeat(255)));
        assert!(!is_identifier(&"x".repeat(256)));
        assert!(!is_identifier("   "));
    }

    #[test]
    fn test_email() {
        assert!(validate_email("teacher@school.edu").is_ok());
        let err = validate_email("not-an-email").unwrap_err();
        assert_eq!(err.code(), ErrorCode::Validation(ValidationCode::InvalidEmail));
    }

    #[test]
    fn test_date_range() {
        assert!(validate_date_range("2024-01-01", "2024-02-01").is_ok());
        assert!(validate_date_range("2024-01-01T08:00:00Z", "2024-01-01T09:00:00+00:00").is_ok());
        assert!(validate_date_range("2024-02-01", "2024-01-01").is_err());
        assert!(validate_date_range("2024-01-01", "2024-01-01").is_err());
        let err = validate_date_range("yesterday", "2024-01-01").unwrap_err();
        assert!(err.message().contains("start date"));
    }

    #[test]
    fn test_closed_sets() {
        assert_eq!(validate_user_type(&json!(1)).unwrap(), UserType::Student);
        assert!(validate_user_type(&json!(4)).is_err());
        assert!(validate_user_type(&json!("1")).is_err());
        assert_eq!(
            validate_activity_status("finished").unwrap(),
            ActivityStatus::Finished
        );
        assert!(validate_activity_status("archived").is_err());
    }

    #[test]
    fn test_pagination_bounds() {
        assert!(!validate_pagination(0, 10).is_valid());
        assert!(!validate_pagination(1, 101).is_valid());
        assert!(!validate_pagination(1, 0).is_valid());
        assert!(validate_pagination(1, 1).is_valid());
        assert!(validate_pagination(3, 100).is_valid());
        assert_eq!(validate_pagination(0, 0).errors().len(), 2);
    }

    #[test]
    fn test_pagination_values_from_payload() {
        assert!(validate_pagination_values(None, None).is_valid());
        assert!(!validate_pagination_values(Some(&json!(1.5)), None).is_valid());
        let result = validate_pagination_values(Some(&json!("2")), Some(&json!(500)));
        assert_eq!(result.errors().len(), 2);
    }
}
