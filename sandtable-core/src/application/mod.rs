// sandtable-core/src/application/mod.rs

pub mod factory;
pub mod handler;
pub mod service;
pub mod validation;

// --- RE-EXPORTS (FACADE PATTERN) ---
// `use sandtable_core::application::{ErrorHandler, AdminService};`

pub use factory::ErrorFactory;
pub use handler::{ErrorHandler, RawFailure, should_retry};
pub use service::AdminService;
pub use validation::{validate_document, validate_request_file};
