// sandtable-core/src/domain/error/domain_error.rs

use chrono::{DateTime, Utc};
use miette::{Diagnostic, Severity};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

use super::code::{
    BusinessCode, ErrorCode, NotFoundCode, PermissionCode, SystemCode, ValidationCode,
};
use super::kind::ErrorKind;
use super::messages::default_user_message;

/// Diagnostic context attached to an error. Never shown to end users.
pub type ErrorDetails = Map<String, Value>;

/// A classified failure: stable code, developer message and a displayable user message.
///
/// Built once where the failure is detected, then only read. `user_message` is never empty:
/// when no explicit text is supplied it is derived from the kind.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("[{code}] {message}")]
pub struct DomainError {
    #[serde(rename = "type")]
    kind: ErrorKind,
    code: ErrorCode,
    code_name: &'static str,
    message: String,
    user_message: String,
    details: ErrorDetails,
    timestamp: DateTime<Utc>,
}

impl DomainError {
    pub fn new(kind: ErrorKind, code: impl Into<ErrorCode>, message: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            kind,
            code,
            code_name: code.name(),
            message: message.into(),
            user_message: default_user_message(kind).to_string(),
            details: ErrorDetails::new(),
            timestamp: Utc::now(),
        }
    }

    /// Uses the code's own kind.
    pub fn from_code(code: impl Into<ErrorCode>, message: impl Into<String>) -> Self {
        let code = code.into();
        Self::new(code.default_kind(), code, message)
    }

    pub fn validation(code: ValidationCode, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, code, message)
    }

    pub fn permission(code: PermissionCode, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Permission, code, message)
    }

    pub fn business(code: BusinessCode, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BusinessLogic, code, message)
    }

    pub fn not_found(code: NotFoundCode, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, code, message)
    }

    pub fn network(code: SystemCode, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, code, message)
    }

    /// Blank text keeps the derived default.
    pub fn with_user_message(mut self, user_message: impl Into<String>) -> Self {
        let user_message = user_message.into();
        if !user_message.trim().is_empty() {
            self.user_message = user_message;
        }
        self
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn with_details(mut self, details: ErrorDetails) -> Self {
        self.details.extend(details);
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn user_message(&self) -> &str {
        &self.user_message
    }

    pub fn details(&self) -> &ErrorDetails {
        &self.details
    }

    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.get(key)
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Plain-object form for logs and API payloads.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| {
            serde_json::json!({
                "type": self.kind,
                "code": self.code.value(),
                "message": self.message,
                "userMessage": self.user_message,
            })
        })
    }
}

impl Diagnostic for DomainError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!(
            "sandtable::{}::{}",
            self.kind.as_str().to_lowercase(),
            self.code.name().to_lowercase()
        )))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.user_message))
    }

    fn severity(&self) -> Option<Severity> {
        match self.kind {
            ErrorKind::Validation => Some(Severity::Warning),
            _ => Some(Severity::Error),
        }
    }
}
