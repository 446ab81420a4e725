// sandtable-core/src/lib.rs

// 1. Documentation is uneven for now
#![allow(missing_docs)]
// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// The admin backend contract and the shape of transport failures.
pub mod ports;

// 2. Domain
// Error taxonomy, validation rules, request DTOs. Depends on nothing else in the crate.
pub mod domain;

// 3. Infrastructure (Adapters)
// Config files, environment overrides.
pub mod infrastructure;

// 4. Application (Use Cases)
// Error factory, error handler, validated admin service.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use application::{AdminService, ErrorFactory, ErrorHandler, RawFailure, should_retry};
pub use domain::{DomainError, ErrorCode, ErrorKind, Language, ValidationResult, validate};
pub use error::SandtableError;
