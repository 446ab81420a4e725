// sandtable-core/src/domain/validation/operations.rs
//
// Whole-request validators for the admin operations and the name-based dispatcher.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::checks::{
    identifier_rule, optional_identifier_rule, validate_activity_status, validate_date_range,
    validate_email, validate_pagination_values, validate_user_type, validate_uuid,
};
use super::requests::{
    AdminRequest, EXPORTABLE_FIELDS, ExportFormat, MAX_BULK_USERS, MAX_IDENTIFIER_LENGTH,
    MAX_KEYWORD_LENGTH, MAX_REASON_LENGTH, SortOrder, TEAM_SORT_FIELDS, TeamStatus,
    USER_SORT_FIELDS, UserStatus,
};
use super::result::ValidationResult;
use super::rules::{FieldRule, RuleSet, is_absent, validate_field, validate_fields};
use crate::domain::error::{DomainError, ValidationCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SearchUsers,
    SearchTeams,
    AssignUser,
    TransferUser,
    BulkAssign,
    Export,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Self::SearchUsers,
        Self::SearchTeams,
        Self::AssignUser,
        Self::TransferUser,
        Self::BulkAssign,
        Self::Export,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SearchUsers => "searchUsers",
            Self::SearchTeams => "searchTeams",
            Self::AssignUser => "assignUser",
            Self::TransferUser => "transferUser",
            Self::BulkAssign => "bulkAssign",
            Self::Export => "export",
        }
    }

    pub fn validate(&self, data: &Value) -> ValidationResult {
        if !data.is_object() {
            return ValidationResult::single(
                DomainError::validation(
                    ValidationCode::InvalidRequest,
                    format!("Payload for '{}' must be a JSON object", self),
                )
                .with_detail("operation", self.as_str()),
            );
        }
        match self {
            Self::SearchUsers => validate_search_users(data),
            Self::SearchTeams => validate_search_teams(data),
            Self::AssignUser => validate_assignment(data),
            Self::TransferUser => validate_transfer(data),
            Self::BulkAssign => validate_bulk_assignment(data),
            Self::Export => validate_export(data),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("Unknown operation: {}", s))
    }
}

/// Entry point by name. Unknown names produce an invalid result, never a panic or Err.
pub fn validate(operation: &str, data: &Value) -> ValidationResult {
    match operation.parse::<Operation>() {
        Ok(op) => op.validate(data),
        Err(reason) => ValidationResult::single(
            DomainError::validation(ValidationCode::UnknownOperation, reason)
                .with_detail("operation", operation),
        ),
    }
}

/// Validates a typed request through its operation's validator.
pub fn validate_request<R: AdminRequest>(request: &R) -> ValidationResult {
    match serde_json::to_value(request) {
        Ok(data) => R::OPERATION.validate(&data),
        Err(e) => ValidationResult::single(DomainError::validation(
            ValidationCode::InvalidRequest,
            format!("Request for '{}' could not be serialized: {}", R::OPERATION, e),
        )),
    }
}

/// Guard for imperative call sites: the first error wins.
pub fn ensure_valid<R: AdminRequest>(request: &R) -> Result<(), DomainError> {
    validate_request(request).into_result()
}

fn reason_rule() -> FieldRule {
    FieldRule::new()
        .max_length(MAX_REASON_LENGTH)
        .custom(Value::is_string)
}

fn keyword_rule() -> FieldRule {
    FieldRule::new()
        .max_length(MAX_KEYWORD_LENGTH)
        .custom(Value::is_string)
}

/// Text of an optional string field; absent values yield `None`.
fn optional_text<'a>(
    data: &'a Value,
    field: &str,
    code: ValidationCode,
) -> Result<Option<&'a str>, DomainError> {
    let value = data.get(field);
    if is_absent(value) {
        return Ok(None);
    }
    match value {
        Some(Value::String(text)) => Ok(Some(text.as_str())),
        Some(other) => Err(DomainError::validation(
            code,
            format!("Field '{}' must be a string, got {}", field, other),
        )
        .with_detail("field", field)
        .with_detail("value", other.clone())),
        None => Ok(None),
    }
}

fn one_of_error(
    code: ValidationCode,
    field: &str,
    value: &Value,
    allowed: &[&str],
) -> DomainError {
    DomainError::validation(
        code,
        format!(
            "Field '{}' has unsupported value {}; expected one of [{}]",
            field,
            value,
            allowed.join(", ")
        ),
    )
    .with_detail("field", field)
    .with_detail("value", value.clone())
}

/// Optional string constrained to a closed set.
fn check_one_of<F>(
    data: &Value,
    field: &str,
    code: ValidationCode,
    allowed: &[&str],
    accepts: F,
) -> Result<(), DomainError>
where
    F: Fn(&str) -> bool,
{
    let value = data.get(field);
    if is_absent(value) {
        return Ok(());
    }
    match value {
        Some(Value::String(s)) if accepts(s) => Ok(()),
        Some(other) => Err(one_of_error(code, field, other, allowed)),
        None => Ok(()),
    }
}

fn check_sorting(data: &Value, sort_fields: &[&str]) -> ValidationResult {
    let mut result = ValidationResult::valid();
    result.push_result(check_one_of(
        data,
        "sortBy",
        ValidationCode::InvalidSortField,
        sort_fields,
        |s| sort_fields.iter().any(|f| *f == s),
    ));
    let orders: Vec<&str> = SortOrder::ALL.iter().map(|o| o.as_str()).collect();
    result.push_result(check_one_of(
        data,
        "sortOrder",
        ValidationCode::InvalidSortOrder,
        &orders,
        |s| s.parse::<SortOrder>().is_ok(),
    ));
    result
}

fn check_user_type(data: &Value) -> Result<(), DomainError> {
    match data.get("userType") {
        value if is_absent(value) => Ok(()),
        Some(value) => validate_user_type(value).map(|_| ()),
        None => Ok(()),
    }
}

/// Order is only checked when both bounds are present.
fn check_date_range(data: &Value) -> Result<(), DomainError> {
    let start = optional_text(data, "startDate", ValidationCode::InvalidDateRange)?;
    let end = optional_text(data, "endDate", ValidationCode::InvalidDateRange)?;
    match (start, end) {
        (Some(start), Some(end)) => validate_date_range(start, end),
        _ => Ok(()),
    }
}

pub fn validate_search_users(data: &Value) -> ValidationResult {
    let mut result = validate_pagination_values(data.get("page"), data.get("pageSize"));

    result.push_result(validate_field(data.get("keyword"), "keyword", &keyword_rule()));
    result.push_result(check_user_type(data));

    let statuses: Vec<&str> = UserStatus::ALL.iter().map(|s| s.as_str()).collect();
    result.push_result(check_one_of(
        data,
        "status",
        ValidationCode::InvalidFilter,
        &statuses,
        |s| s.parse::<UserStatus>().is_ok(),
    ));

    match optional_text(data, "email", ValidationCode::InvalidEmail) {
        Ok(Some(email)) => result.push_result(validate_email(email)),
        Ok(None) => {}
        Err(e) => result.push(e),
    }

    result.merge(validate_fields(
        data,
        &RuleSet::new()
            .field("activityId", optional_identifier_rule(ValidationCode::InvalidActivityId))
            .field("teamId", optional_identifier_rule(ValidationCode::InvalidTeamId)),
    ));

    result.push_result(check_date_range(data));
    result.merge(check_sorting(data, USER_SORT_FIELDS));
    result
}

pub fn validate_search_teams(data: &Value) -> ValidationResult {
    let mut result = validate_pagination_values(data.get("page"), data.get("pageSize"));

    result.push_result(validate_field(data.get("keyword"), "keyword", &keyword_rule()));
    result.push_result(validate_field(
        data.get("activityId"),
        "activityId",
        &optional_identifier_rule(ValidationCode::InvalidActivityId),
    ));

    let statuses: Vec<&str> = TeamStatus::ALL.iter().map(|s| s.as_str()).collect();
    result.push_result(check_one_of(
        data,
        "status",
        ValidationCode::InvalidFilter,
        &statuses,
        |s| s.parse::<TeamStatus>().is_ok(),
    ));

    // Activity status filter, used by the "teams of running activities" view.
    match optional_text(data, "activityStatus", ValidationCode::InvalidActivityStatus) {
        Ok(Some(status)) => result.push_result(validate_activity_status(status).map(|_| ())),
        Ok(None) => {}
        Err(e) => result.push(e),
    }

    result.merge(check_sorting(data, TEAM_SORT_FIELDS));
    result
}

pub fn validate_assignment(data: &Value) -> ValidationResult {
    validate_fields(
        data,
        &RuleSet::new()
            .field("userId", identifier_rule(ValidationCode::InvalidUserId))
            .field("activityId", identifier_rule(ValidationCode::InvalidActivityId))
            .field("teamId", optional_identifier_rule(ValidationCode::InvalidTeamId))
            .field("reason", reason_rule()),
    )
}

pub fn validate_transfer(data: &Value) -> ValidationResult {
    validate_fields(
        data,
        &RuleSet::new()
            .field("userId", identifier_rule(ValidationCode::InvalidUserId))
            .field("activityId", identifier_rule(ValidationCode::InvalidActivityId))
            .field(
                "fromActivityId",
                optional_identifier_rule(ValidationCode::InvalidActivityId),
            )
            .field("reason", reason_rule()),
    )
}

pub fn validate_bulk_assignment(data: &Value) -> ValidationResult {
    let mut result = ValidationResult::valid();

    match data.get("userIds") {
        None | Some(Value::Null) => result.push(
            DomainError::validation(ValidationCode::EmptyUserList, "Field 'userIds' is required")
                .with_detail("field", "userIds"),
        ),
        Some(Value::Array(ids)) => {
            if ids.is_empty() {
                result.push(
                    DomainError::validation(
                        ValidationCode::EmptyUserList,
                        "Field 'userIds' must contain at least one user",
                    )
                    .with_detail("field", "userIds"),
                );
            } else if ids.len() > MAX_BULK_USERS {
                result.push(
                    DomainError::validation(
                        ValidationCode::TooManyUsers,
                        format!(
                            "At most {} users can be assigned at once, got {}",
                            MAX_BULK_USERS,
                            ids.len()
                        ),
                    )
                    .with_detail("field", "userIds")
                    .with_detail("max", MAX_BULK_USERS)
                    .with_detail("actual", ids.len()),
                );
            }

            let entry_rule = FieldRule::required()
                .max_length(MAX_IDENTIFIER_LENGTH)
                .custom(|v| v.as_str().is_some_and(|s| !s.trim().is_empty()))
                .code(ValidationCode::InvalidUserId);
            for (index, id) in ids.iter().enumerate() {
                if let Err(e) = validate_field(Some(id), &format!("userIds[{}]", index), &entry_rule)
                {
                    result.push(e.with_detail("index", index));
                }
            }
        }
        Some(other) => result.push(
            DomainError::validation(
                ValidationCode::InvalidRequest,
                format!("Field 'userIds' must be an array, got {}", other),
            )
            .with_detail("field", "userIds"),
        ),
    }

    result.merge(validate_fields(
        data,
        &RuleSet::new()
            .field("activityId", identifier_rule(ValidationCode::InvalidActivityId))
            .field("reason", reason_rule()),
    ));
    result
}

pub fn validate_export(data: &Value) -> ValidationResult {
    let mut result = ValidationResult::valid();

    let formats: Vec<&str> = ExportFormat::ALL.iter().map(|f| f.as_str()).collect();
    match data.get("format") {
        Some(Value::String(s)) if s.parse::<ExportFormat>().is_ok() => {}
        Some(other) => result.push(one_of_error(
            ValidationCode::InvalidExportFormat,
            "format",
            other,
            &formats,
        )),
        None => result.push(one_of_error(
            ValidationCode::InvalidExportFormat,
            "format",
            &Value::Null,
            &formats,
        )),
    }

    result.push_result(check_user_type(data));

    match data.get("activityId") {
        value if is_absent(value) => {}
        None => {}
        Some(Value::String(id)) => result.push_result(validate_uuid(id, "activityId")),
        Some(other) => result.push(
            DomainError::validation(
                ValidationCode::InvalidUuid,
                format!("Field 'activityId' must be a UUID string, got {}", other),
            )
            .with_detail("field", "activityId"),
        ),
    }

    match data.get("fields") {
        None | Some(Value::Null) => {}
        Some(Value::Array(fields)) => {
            for (index, field) in fields.iter().enumerate() {
                let known = field
                    .as_str()
                    .is_some_and(|f| EXPORTABLE_FIELDS.iter().any(|allowed| *allowed == f));
                if !known {
                    result.push(
                        one_of_error(
                            ValidationCode::InvalidExportField,
                            "fields",
                            field,
                            EXPORTABLE_FIELDS,
                        )
                        .with_detail("index", index),
                    );
                }
            }
        }
        Some(other) => result.push(
            DomainError::validation(
                ValidationCode::InvalidRequest,
                format!("Field 'fields' must be an array, got {}", other),
            )
            .with_detail("field", "fields"),
        ),
    }

    result.push_result(check_date_range(data));
    result
}
