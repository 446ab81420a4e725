// sandtable-core/src/domain/error/messages.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use super::code::{
    BusinessCode, ConflictCode, ErrorCode, NotFoundCode, PermissionCode, SystemCode,
    ValidationCode,
};
use super::kind::ErrorKind;

/// Languages with a message table. English is the fallback for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }

    /// Parses a BCP-47-ish tag ("zh-CN", "en_US", "zh"). Only the primary subtag matters.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match primary.as_str() {
            "en" => Some(Self::En),
            "zh" => Some(Self::Zh),
            _ => None,
        }
    }

    /// Absent or unsupported tags resolve to English.
    pub fn resolve(tag: Option<&str>) -> Self {
        tag.and_then(Self::from_tag).unwrap_or_default()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Displayable sentence for a kind. Total over ErrorKind, so every error has a user message.
pub fn default_user_message(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Validation => "The submitted data is invalid. Please check your input.",
        ErrorKind::Network => "Network connection failed. Please check your connection and try again.",
        ErrorKind::Permission => "You do not have permission to perform this operation.",
        ErrorKind::BusinessLogic => "The operation could not be completed due to a business rule.",
        ErrorKind::NotFound => "The requested resource was not found.",
        ErrorKind::Conflict => "The data was modified by someone else. Please refresh and try again.",
        ErrorKind::ServerError => "The server encountered an error. Please try again later.",
        ErrorKind::Timeout => "The request timed out. Please try again.",
        ErrorKind::RateLimit => "Too many requests. Please wait a moment and try again.",
    }
}

/// Shown when a failure cannot be classified at all.
pub const GENERIC_USER_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

const EN: &[(ErrorCode, &str)] = &[
    (ErrorCode::Validation(ValidationCode::InvalidUserId), "The user ID is invalid."),
    (ErrorCode::Validation(ValidationCode::InvalidActivityId), "The activity ID is invalid."),
    (ErrorCode::Validation(ValidationCode::InvalidTeamId), "The team ID is invalid."),
    (ErrorCode::Validation(ValidationCode::InvalidEmail), "The email address is invalid."),
    (ErrorCode::Validation(ValidationCode::InvalidDateRange), "The start date must be earlier than the end date."),
    (ErrorCode::Validation(ValidationCode::InvalidPagination), "Page must be at least 1 and page size between 1 and 100."),
    (ErrorCode::Validation(ValidationCode::InvalidUserType), "The user type is invalid."),
    (ErrorCode::Validation(ValidationCode::InvalidActivityStatus), "The activity status is invalid."),
    (ErrorCode::Validation(ValidationCode::MissingRequiredField), "A required field is missing."),
    (ErrorCode::Validation(ValidationCode::FieldTooShort), "A field is shorter than allowed."),
    (ErrorCode::Validation(ValidationCode::FieldTooLong), "A field is longer than allowed."),
    (ErrorCode::Validation(ValidationCode::PatternMismatch), "A field has an invalid format."),
    (ErrorCode::Validation(ValidationCode::CustomRuleFailed), "A field failed validation."),
    (ErrorCode::Validation(ValidationCode::InvalidSortField), "The sort field is not supported."),
    (ErrorCode::Validation(ValidationCode::InvalidSortOrder), "The sort order must be asc or desc."),
    (ErrorCode::Validation(ValidationCode::InvalidFilter), "A filter value is not supported."),
    (ErrorCode::Validation(ValidationCode::InvalidExportFormat), "The export format must be csv, excel or json."),
    (ErrorCode::Validation(ValidationCode::InvalidExportField), "An export field is not supported."),
    (ErrorCode::Validation(ValidationCode::EmptyUserList), "Select at least one user."),
    (ErrorCode::Validation(ValidationCode::TooManyUsers), "At most 100 users can be processed at once."),
    (ErrorCode::Validation(ValidationCode::InvalidUuid), "The identifier is not a valid UUID."),
    (ErrorCode::Validation(ValidationCode::InvalidRequest), "The request is malformed."),
    (ErrorCode::Validation(ValidationCode::UnknownOperation), "The requested operation is not supported."),
    (ErrorCode::Permission(PermissionCode::Unauthorized), "Please sign in to continue."),
    (ErrorCode::Permission(PermissionCode::InsufficientPermissions), "You do not have permission to perform this operation."),
    (ErrorCode::Permission(PermissionCode::TokenExpired), "Your session has expired. Please sign in again."),
    (ErrorCode::Permission(PermissionCode::AccessDenied), "Access to this resource is denied."),
    (ErrorCode::BusinessLogic(BusinessCode::UserAlreadyAssigned), "The user is already assigned to this activity."),
    (ErrorCode::BusinessLogic(BusinessCode::TeamFull), "The team is full."),
    (ErrorCode::BusinessLogic(BusinessCode::ActivityNotActive), "The activity is not active."),
    (ErrorCode::BusinessLogic(BusinessCode::ActivityEnded), "The activity has already ended."),
    (ErrorCode::BusinessLogic(BusinessCode::TransferNotAllowed), "The user cannot be transferred to this activity."),
    (ErrorCode::BusinessLogic(BusinessCode::UserHasTeam), "The user already belongs to a team."),
    (ErrorCode::BusinessLogic(BusinessCode::BulkPartialFailure), "Some users could not be processed."),
    (ErrorCode::NotFound(NotFoundCode::UserNotFound), "The user was not found."),
    (ErrorCode::NotFound(NotFoundCode::ActivityNotFound), "The activity was not found."),
    (ErrorCode::NotFound(NotFoundCode::TeamNotFound), "The team was not found."),
    (ErrorCode::NotFound(NotFoundCode::AssignmentNotFound), "The assignment was not found."),
    (ErrorCode::NotFound(NotFoundCode::ResourceNotFound), "The requested resource was not found."),
    (ErrorCode::Conflict(ConflictCode::ConcurrentModification), "The data was modified by someone else. Please refresh and try again."),
    (ErrorCode::Conflict(ConflictCode::DuplicateAssignment), "This assignment already exists."),
    (ErrorCode::Conflict(ConflictCode::ResourceConflict), "The request conflicts with the current state of the resource."),
    (ErrorCode::System(SystemCode::NetworkError), "Network connection failed. Please check your connection and try again."),
    (ErrorCode::System(SystemCode::RequestTimeout), "The request timed out. Please try again."),
    (ErrorCode::System(SystemCode::InternalServerError), "The server encountered an error. Please try again later."),
    (ErrorCode::System(SystemCode::ServiceUnavailable), "The service is temporarily unavailable. Please try again later."),
    (ErrorCode::System(SystemCode::RateLimited), "Too many requests. Please wait a moment and try again."),
];

// Partial on purpose: anything missing here falls back to English.
const ZH: &[(ErrorCode, &str)] = &[
    (ErrorCode::Validation(ValidationCode::InvalidUserId), "用户ID无效。"),
    (ErrorCode::Validation(ValidationCode::InvalidActivityId), "活动ID无效。"),
    (ErrorCode::Validation(ValidationCode::InvalidPagination), "页码必须大于等于1，每页数量必须在1到100之间。"),
    (ErrorCode::Validation(ValidationCode::MissingRequiredField), "缺少必填字段。"),
    (ErrorCode::Validation(ValidationCode::TooManyUsers), "一次最多只能处理100个用户。"),
    (ErrorCode::Validation(ValidationCode::EmptyUserList), "请至少选择一个用户。"),
    (ErrorCode::Permission(PermissionCode::Unauthorized), "请先登录。"),
    (ErrorCode::Permission(PermissionCode::InsufficientPermissions), "您没有执行此操作的权限。"),
    (ErrorCode::Permission(PermissionCode::TokenExpired), "登录已过期，请重新登录。"),
    (ErrorCode::BusinessLogic(BusinessCode::UserAlreadyAssigned), "该用户已分配到此活动。"),
    (ErrorCode::BusinessLogic(BusinessCode::TeamFull), "团队人数已满。"),
    (ErrorCode::BusinessLogic(BusinessCode::ActivityNotActive), "活动未开始或已暂停。"),
    (ErrorCode::BusinessLogic(BusinessCode::ActivityEnded), "活动已结束。"),
    (ErrorCode::NotFound(NotFoundCode::UserNotFound), "用户不存在。"),
    (ErrorCode::NotFound(NotFoundCode::ActivityNotFound), "活动不存在。"),
    (ErrorCode::NotFound(NotFoundCode::TeamNotFound), "团队不存在。"),
    (ErrorCode::Conflict(ConflictCode::ConcurrentModification), "数据已被他人修改，请刷新后重试。"),
    (ErrorCode::System(SystemCode::NetworkError), "网络连接失败，请检查网络后重试。"),
    (ErrorCode::System(SystemCode::RequestTimeout), "请求超时，请重试。"),
    (ErrorCode::System(SystemCode::InternalServerError), "服务器错误，请稍后重试。"),
    (ErrorCode::System(SystemCode::ServiceUnavailable), "服务暂时不可用，请稍后重试。"),
];

fn table() -> &'static HashMap<(ErrorCode, Language), &'static str> {
    static TABLE: OnceLock<HashMap<(ErrorCode, Language), &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| {
        EN.iter()
            .map(|(code, msg)| ((*code, Language::En), *msg))
            .chain(ZH.iter().map(|(code, msg)| ((*code, Language::Zh), *msg)))
            .collect()
    })
}

/// Outcome of a localized lookup, keeping the fallback explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLookup {
    Exact(&'static str),
    EnglishFallback(&'static str),
    Missing,
}

impl MessageLookup {
    pub fn text(&self) -> Option<&'static str> {
        match *self {
            Self::Exact(text) | Self::EnglishFallback(text) => Some(text),
            Self::Missing => None,
        }
    }
}

pub fn lookup_message(code: ErrorCode, language: Language) -> MessageLookup {
    let table = table();
    if let Some(text) = table.get(&(code, language)) {
        return MessageLookup::Exact(*text);
    }
    match table.get(&(code, Language::En)) {
        Some(text) => MessageLookup::EnglishFallback(*text),
        None => MessageLookup::Missing,
    }
}

/// Localized text for a code, or the kind's default sentence when no table has it.
pub fn localized_message(code: ErrorCode, kind: ErrorKind, language: Language) -> &'static str {
    lookup_message(code, language)
        .text()
        .unwrap_or_else(|| default_user_message(kind))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_message_is_total_and_non_empty() {
        for kind in ErrorKind::ALL {
            assert!(!default_user_message(kind).is_empty());
        }
    }

    #[test]
    fn test_every_code_has_an_english_message() {
        for code in ErrorCode::all() {
            assert!(
                matches!(lookup_message(code, Language::En), MessageLookup::Exact(_)),
                "{} has no English message",
                code
            );
        }
    }

    #[test]
    fn test_language_tags() {
        assert_eq!(Language::from_tag("zh-CN"), Some(Language::Zh));
        assert_eq!(Language::from_tag("zh_TW"), Some(Language::Zh));
        assert_eq!(Language::from_tag("EN-us"), Some(Language::En));
        assert_eq!(Language::from_tag("fr"), None);
        assert_eq!(Language::resolve(Some("fr-FR")), Language::En);
        assert_eq!(Language::resolve(None), Language::En);
    }

    #[test]
    fn test_missing_translation_falls_back_to_english() {
        let code = ErrorCode::Validation(ValidationCode::InvalidExportField);
        assert_eq!(
            lookup_message(code, Language::Zh),
            MessageLookup::EnglishFallback("An export field is not supported.")
        );

        let translated = ErrorCode::BusinessLogic(BusinessCode::TeamFull);
        assert_eq!(
            lookup_message(translated, Language::Zh),
            MessageLookup::Exact("团队人数已满。")
        );
    }
}
