// sandtable-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(sandtable::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(sandtable::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration not found at '{0}'")]
    #[diagnostic(code(sandtable::infra::config_missing))]
    ConfigNotFound(String),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(sandtable::infra::config_invalid),
        help("language must be 2-16 characters and environment 1-32 characters.")
    )]
    InvalidConfig(#[from] validator::ValidationErrors),

    // --- REQUEST DOCUMENTS ---
    #[error("JSON Parsing Error: {0}")]
    #[diagnostic(
        code(sandtable::infra::json),
        help("Request documents must be a single JSON object.")
    )]
    JsonError(#[from] serde_json::Error),
}
