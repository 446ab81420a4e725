// sandtable-core/src/application/factory.rs
//
// Turns raw failures into DomainErrors with stable codes.
// HTTP failures are classified in two stages: status code first, then the backend's
// `businessCode` (when it is known) overrides the status-based result.

use serde_json::{Value, json};
use tracing::debug;

use crate::domain::error::{
    BusinessCode, ConflictCode, DomainError, ErrorCode, ErrorKind, Language, NotFoundCode,
    PermissionCode, SystemCode, ValidationCode, localized_message,
};
use crate::ports::transport::HttpFailure;

const TIMEOUT_CODES: &[&str] = &["ECONNABORTED", "ETIMEDOUT"];
const NETWORK_CODES: &[&str] = &["ERR_NETWORK", "ECONNREFUSED", "ECONNRESET", "ENOTFOUND"];

/// Backend business codes the console knows how to present.
pub fn business_classification(business_code: i64) -> Option<(ErrorKind, ErrorCode)> {
    let classified = match business_code {
        1001 => (ErrorKind::BusinessLogic, BusinessCode::UserAlreadyAssigned.into()),
        1002 => (ErrorKind::BusinessLogic, BusinessCode::ActivityNotActive.into()),
        1003 => (ErrorKind::BusinessLogic, BusinessCode::ActivityEnded.into()),
        1004 => (ErrorKind::BusinessLogic, BusinessCode::TransferNotAllowed.into()),
        2001 => (ErrorKind::Permission, PermissionCode::InsufficientPermissions.into()),
        2002 => (ErrorKind::Permission, PermissionCode::TokenExpired.into()),
        3001 => (ErrorKind::BusinessLogic, BusinessCode::TeamFull.into()),
        3002 => (ErrorKind::BusinessLogic, BusinessCode::UserHasTeam.into()),
        4001 => (ErrorKind::NotFound, NotFoundCode::UserNotFound.into()),
        4002 => (ErrorKind::NotFound, NotFoundCode::ActivityNotFound.into()),
        4003 => (ErrorKind::NotFound, NotFoundCode::TeamNotFound.into()),
        4004 => (ErrorKind::NotFound, NotFoundCode::AssignmentNotFound.into()),
        5001 => (ErrorKind::Conflict, ConflictCode::ConcurrentModification.into()),
        5002 => (ErrorKind::Conflict, ConflictCode::DuplicateAssignment.into()),
        _ => return None,
    };
    Some(classified)
}

/// Stage 1: HTTP status, then transport hints when the status says nothing.
pub fn status_classification(failure: &HttpFailure) -> (ErrorKind, ErrorCode) {
    match failure.status() {
        Some(400) => (ErrorKind::Validation, ValidationCode::InvalidRequest.into()),
        Some(401) => (ErrorKind::Permission, PermissionCode::Unauthorized.into()),
        Some(403) => (ErrorKind::Permission, PermissionCode::InsufficientPermissions.into()),
        Some(404) => (ErrorKind::NotFound, NotFoundCode::ResourceNotFound.into()),
        Some(409) => (ErrorKind::Conflict, ConflictCode::ResourceConflict.into()),
        Some(429) => (ErrorKind::RateLimit, SystemCode::RateLimited.into()),
        Some(503) => (ErrorKind::ServerError, SystemCode::ServiceUnavailable.into()),
        Some(500..=599) => (ErrorKind::ServerError, SystemCode::InternalServerError.into()),
        _ => transport_classification(failure),
    }
}

fn transport_classification(failure: &HttpFailure) -> (ErrorKind, ErrorCode) {
    let code = failure.code.as_deref().unwrap_or_default();
    let mentions_timeout = failure.message.to_lowercase().contains("timeout");

    if TIMEOUT_CODES.iter().any(|c| *c == code) || mentions_timeout {
        (ErrorKind::Timeout, SystemCode::RequestTimeout.into())
    } else if NETWORK_CODES.iter().any(|c| *c == code)
        || (failure.request_sent && failure.response.is_none())
    {
        (ErrorKind::Network, SystemCode::NetworkError.into())
    } else {
        (ErrorKind::ServerError, SystemCode::InternalServerError.into())
    }
}

pub struct ErrorFactory;

impl ErrorFactory {
    /// Classifies a failed HTTP call. `details` always records status, endpoint,
    /// business code, response body and the client's message.
    pub fn from_http_error(
        failure: &HttpFailure,
        endpoint: Option<&str>,
        language: Language,
    ) -> DomainError {
        let (mut kind, mut code) = status_classification(failure);

        let business_code = failure.response.as_ref().and_then(|r| r.business_code());
        if let Some((business_kind, business_error)) =
            business_code.and_then(business_classification)
        {
            debug!(
                business_code = ?business_code,
                status = ?failure.status(),
                "Business code overrides HTTP status classification"
            );
            kind = business_kind;
            code = business_error;
        }

        let message = failure
            .response
            .as_ref()
            .and_then(|r| r.message())
            .map(str::to_string)
            .unwrap_or_else(|| failure.message.clone());

        DomainError::new(kind, code, message)
            .with_user_message(localized_message(code, kind, language))
            .with_detail("status", failure.status().map_or(Value::Null, Value::from))
            .with_detail("endpoint", endpoint.map_or(Value::Null, Value::from))
            .with_detail("businessCode", business_code.map_or(Value::Null, Value::from))
            .with_detail(
                "responseData",
                failure
                    .response
                    .as_ref()
                    .map_or(Value::Null, |r| r.data.clone()),
            )
            .with_detail("originalError", failure.message.clone())
    }

    pub fn validation(
        code: ValidationCode,
        field: &str,
        message: impl Into<String>,
        language: Language,
    ) -> DomainError {
        Self::localized(ErrorKind::Validation, code.into(), message, language)
            .with_detail("field", field)
    }

    pub fn permission(action: &str, resource: &str, language: Language) -> DomainError {
        Self::localized(
            ErrorKind::Permission,
            PermissionCode::InsufficientPermissions.into(),
            format!("Not allowed to {} {}", action, resource),
            language,
        )
        .with_detail("action", action)
        .with_detail("resource", resource)
    }

    pub fn business(
        code: BusinessCode,
        message: impl Into<String>,
        context: Value,
        language: Language,
    ) -> DomainError {
        Self::localized(ErrorKind::BusinessLogic, code.into(), message, language)
            .with_detail("context", context)
    }

    pub fn not_found(code: NotFoundCode, id: &str, language: Language) -> DomainError {
        Self::localized(
            ErrorKind::NotFound,
            code.into(),
            format!("{} '{}'", code.name(), id),
            language,
        )
        .with_detail("id", id)
    }

    /// Anything that is neither a DomainError nor an HTTP failure.
    pub fn unexpected(message: impl Into<String>, language: Language) -> DomainError {
        let message = message.into();
        Self::localized(
            ErrorKind::ServerError,
            SystemCode::InternalServerError.into(),
            message.clone(),
            language,
        )
        .with_detail("originalError", json!(message))
    }

    fn localized(
        kind: ErrorKind,
        code: ErrorCode,
        message: impl Into<String>,
        language: Language,
    ) -> DomainError {
        DomainError::new(kind, code, message)
            .with_user_message(localized_message(code, kind, language))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classify(failure: &HttpFailure) -> DomainError {
        ErrorFactory::from_http_error(failure, Some("/admin/users/assign"), Language::En)
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (400, ErrorKind::Validation),
            (401, ErrorKind::Permission),
            (403, ErrorKind::Permission),
            (404, ErrorKind::NotFound),
            (409, ErrorKind::Conflict),
            (429, ErrorKind::RateLimit),
            (500, ErrorKind::ServerError),
            (502, ErrorKind::ServerError),
            (503, ErrorKind::ServerError),
        ];
        for (status, kind) in cases {
            let err = classify(&HttpFailure::with_response(status, Value::Null));
            assert_eq!(err.kind(), kind, "status {}", status);
        }
        let unavailable = classify(&HttpFailure::with_response(503, Value::Null));
        assert_eq!(
            unavailable.code(),
            ErrorCode::System(SystemCode::ServiceUnavailable)
        );
    }

    #[test]
    fn test_business_code_overrides_status() {
        let failure = HttpFailure::with_response(400, json!({ "businessCode": 1001 }));
        let err = classify(&failure);
        assert_eq!(err.kind(), ErrorKind::BusinessLogic);
        assert_eq!(
            err.code(),
            ErrorCode::BusinessLogic(BusinessCode::UserAlreadyAssigned)
        );
        assert!(err.user_message().contains("already assigned"));
    }

    #[test]
    fn test_unknown_business_code_keeps_status_classification() {
        let failure = HttpFailure::with_response(409, json!({ "businessCode": 9999 }));
        let err = classify(&failure);
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.detail("businessCode"), Some(&json!(9999)));
    }

    #[test]
    fn test_details_preserve_diagnostics() {
        let body = json!({ "businessCode": 3001, "message": "team t9 has 6/6 members" });
        let err = classify(&HttpFailure::with_response(409, body.clone()));

        assert_eq!(err.code(), ErrorCode::BusinessLogic(BusinessCode::TeamFull));
        assert_eq!(err.message(), "team t9 has 6/6 members");
        assert_eq!(err.detail("status"), Some(&json!(409)));
        assert_eq!(err.detail("endpoint"), Some(&json!("/admin/users/assign")));
        assert_eq!(err.detail("businessCode"), Some(&json!(3001)));
        assert_eq!(err.detail("responseData"), Some(&body));
        assert_eq!(
            err.detail("originalError"),
            Some(&json!("Request failed with status code 409"))
        );
    }

    #[test]
    fn test_transport_fallbacks() {
        let timeout = classify(&HttpFailure::no_response(
            Some("ECONNABORTED"),
            "timeout of 10000ms exceeded",
        ));
        assert_eq!(timeout.kind(), ErrorKind::Timeout);

        let network = classify(&HttpFailure::no_response(Some("ERR_NETWORK"), "Network Error"));
        assert_eq!(network.kind(), ErrorKind::Network);

        let silent = classify(&HttpFailure::no_response(None, "socket hang up"));
        assert_eq!(silent.kind(), ErrorKind::Network);

        let unknown = classify(&HttpFailure {
            message: "something odd".into(),
            ..Default::default()
        });
        assert_eq!(unknown.kind(), ErrorKind::ServerError);
        assert_eq!(unknown.detail("status"), Some(&Value::Null));
    }

    #[test]
    fn test_localized_user_message_with_fallback() {
        let failure = HttpFailure::with_response(400, json!({ "businessCode": 4001 }));
        let zh = ErrorFactory::from_http_error(&failure, None, Language::Zh);
        assert_eq!(zh.user_message(), "用户不存在。");

        // No Chinese entry for ASSIGNMENT_NOT_FOUND: English text is used.
        let failure = HttpFailure::with_response(404, json!({ "businessCode": 4004 }));
        let fallback = ErrorFactory::from_http_error(&failure, None, Language::Zh);
        assert_eq!(fallback.user_message(), "The assignment was not found.");
    }

    #[test]
    fn test_helpers() {
        let err = ErrorFactory::permission("export", "activity a1", Language::En);
        assert_eq!(err.kind(), ErrorKind::Permission);
        assert_eq!(err.detail("resource"), Some(&json!("activity a1")));

        let err = ErrorFactory::not_found(NotFoundCode::TeamNotFound, "t1", Language::Zh);
        assert_eq!(err.user_message(), "团队不存在。");

        let err = ErrorFactory::validation(
            ValidationCode::InvalidEmail,
            "email",
            "'x' is not a valid email address",
            Language::En,
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.detail("field"), Some(&json!("email")));

        let err = ErrorFactory::business(
            BusinessCode::TeamFull,
            "team t1 has no free seat",
            json!({ "teamId": "t1", "capacity": 5 }),
            Language::En,
        );
        assert_eq!(err.kind(), ErrorKind::BusinessLogic);
        assert_eq!(err.code(), ErrorCode::BusinessLogic(BusinessCode::TeamFull));
        assert_eq!(err.detail("context"), Some(&json!({ "teamId": "t1", "capacity": 5 })));
        assert!(!err.user_message().is_empty());

        let err = ErrorFactory::unexpected("index out of bounds", Language::En);
        assert_eq!(err.kind(), ErrorKind::ServerError);
        assert_eq!(err.detail("originalError"), Some(&json!("index out of bounds")));
    }
}
