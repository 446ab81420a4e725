pub mod error;
pub mod validation;

// Re-exports to keep imports short elsewhere
pub use error::{DomainError, ErrorCode, ErrorKind, Language};
pub use validation::{ValidationResult, validate};
