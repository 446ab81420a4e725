// sandtable-core/src/application/handler.rs
//
// Single normalization point for failures raised anywhere in the admin console.

use std::sync::OnceLock;
use tracing::{error, warn};

use super::factory::ErrorFactory;
use crate::domain::error::{
    DomainError, ErrorCode, ErrorKind, GENERIC_USER_MESSAGE, Language, SystemCode,
};
use crate::error::SandtableError;
use crate::infrastructure::config::AppConfig;
use crate::ports::transport::HttpFailure;

/// Anything a caller may hand to the handler.
#[derive(Debug, Clone)]
pub enum RawFailure {
    Domain(DomainError),
    Http(HttpFailure),
    Other { message: String },
}

impl From<DomainError> for RawFailure {
    fn from(err: DomainError) -> Self {
        RawFailure::Domain(err)
    }
}

impl From<HttpFailure> for RawFailure {
    fn from(err: HttpFailure) -> Self {
        RawFailure::Http(err)
    }
}

impl From<anyhow::Error> for RawFailure {
    fn from(err: anyhow::Error) -> Self {
        let err = match err.downcast::<DomainError>() {
            Ok(domain) => return RawFailure::Domain(domain),
            Err(other) => other,
        };
        match err.downcast::<HttpFailure>() {
            Ok(http) => RawFailure::Http(http),
            Err(other) => RawFailure::Other {
                message: format!("{:#}", other),
            },
        }
    }
}

impl From<SandtableError> for RawFailure {
    fn from(err: SandtableError) -> Self {
        match err {
            SandtableError::Domain(domain) => RawFailure::Domain(domain),
            other => RawFailure::Other {
                message: other.to_string(),
            },
        }
    }
}

impl From<String> for RawFailure {
    fn from(message: String) -> Self {
        RawFailure::Other { message }
    }
}

impl From<&str> for RawFailure {
    fn from(message: &str) -> Self {
        RawFailure::Other {
            message: message.to_string(),
        }
    }
}

/// Retry advice only: NETWORK, TIMEOUT, and SERVER_ERROR when the service is unavailable.
pub fn should_retry(error: &DomainError) -> bool {
    match error.kind() {
        ErrorKind::Network | ErrorKind::Timeout => true,
        ErrorKind::ServerError => {
            error.code() == ErrorCode::System(SystemCode::ServiceUnavailable)
        }
        _ => false,
    }
}

#[derive(Debug, Clone, Default)]
pub struct ErrorHandler {
    config: AppConfig,
}

static GLOBAL: OnceLock<ErrorHandler> = OnceLock::new();

impl ErrorHandler {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Process-wide handler. Built from defaults unless [`ErrorHandler::install_global`] ran first.
    pub fn global() -> &'static ErrorHandler {
        GLOBAL.get_or_init(ErrorHandler::default)
    }

    pub fn install_global(config: AppConfig) -> Result<&'static ErrorHandler, SandtableError> {
        GLOBAL.set(ErrorHandler::new(config)).map_err(|_| {
            SandtableError::InternalError("Global error handler already initialized".to_string())
        })?;
        Ok(Self::global())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// An explicit tag wins over the configured language.
    pub fn language(&self, tag: Option<&str>) -> Language {
        match tag {
            Some(tag) => Language::resolve(Some(tag)),
            None => self.config.language(),
        }
    }

    /// DomainErrors pass through untouched. HTTP failures are classified with `context`
    /// as the endpoint; everything else becomes SERVER_ERROR.
    pub fn process_error(
        &self,
        failure: impl Into<RawFailure>,
        context: Option<&str>,
        language: Option<&str>,
    ) -> DomainError {
        let language = self.language(language);
        match failure.into() {
            RawFailure::Domain(err) => err,
            RawFailure::Http(http) => ErrorFactory::from_http_error(&http, context, language),
            RawFailure::Other { message } => {
                let err = ErrorFactory::unexpected(message, language);
                match context {
                    Some(context) => err.with_detail("context", context),
                    None => err,
                }
            }
        }
    }

    /// One structured event per error. Infrastructure kinds log at ERROR, the rest at WARN.
    pub fn log_error(&self, err: &DomainError, context: Option<&str>) {
        if !self.config.log_errors {
            return;
        }

        let details = serde_json::to_string(err.details()).unwrap_or_default();
        let context = context.unwrap_or_default();
        let timestamp = err.timestamp().to_rfc3339();

        if err.kind().is_infrastructure() {
            error!(
                kind = %err.kind(),
                code = err.code().value(),
                code_name = err.code().name(),
                message = err.message(),
                user_message = err.user_message(),
                details = %details,
                timestamp = %timestamp,
                context = context,
                environment = %self.config.environment,
                version = env!("CARGO_PKG_VERSION"),
                "Admin operation failed"
            );
        } else {
            warn!(
                kind = %err.kind(),
                code = err.code().value(),
                code_name = err.code().name(),
                message = err.message(),
                user_message = err.user_message(),
                details = %details,
                timestamp = %timestamp,
                context = context,
                environment = %self.config.environment,
                version = env!("CARGO_PKG_VERSION"),
                "Admin operation rejected"
            );
        }
    }

    /// Never empty: the DomainError's user message, else the response body's message,
    /// else a generic sentence.
    pub fn get_user_message(&self, failure: &RawFailure) -> String {
        let message = match failure {
            RawFailure::Domain(err) => Some(err.user_message()),
            RawFailure::Http(http) => http.response.as_ref().and_then(|r| r.message()),
            RawFailure::Other { .. } => None,
        };
        message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(GENERIC_USER_MESSAGE)
            .to_string()
    }

    pub fn should_retry(&self, err: &DomainError) -> bool {
        should_retry(err)
    }
}
