// sandtable-core/src/ports/mod.rs

pub mod admin_api;
pub mod transport;

pub use admin_api::AdminApi;
pub use transport::{HttpFailure, HttpResponse};
