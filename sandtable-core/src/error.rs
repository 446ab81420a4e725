// sandtable-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SandtableError {
    // --- DOMAIN (classified, user-displayable) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE (IO, parsing, config) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl From<std::io::Error> for SandtableError {
    fn from(err: std::io::Error) -> Self {
        SandtableError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<serde_json::Error> for SandtableError {
    fn from(err: serde_json::Error) -> Self {
        SandtableError::Infrastructure(InfrastructureError::JsonError(err))
    }
}
