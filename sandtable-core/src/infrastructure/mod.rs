// sandtable-core/src/infrastructure/mod.rs

pub mod config;
pub mod error;

pub use config::{AppConfig, load_app_config, load_app_config_file};
pub use error::InfrastructureError;
