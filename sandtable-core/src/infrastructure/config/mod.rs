pub mod app;

pub use app::{
    AppConfig, CONFIG_CANDIDATES, apply_env_overrides, apply_env_overrides_from, load_app_config,
    load_app_config_file, load_app_config_file_with, load_app_config_with,
};
