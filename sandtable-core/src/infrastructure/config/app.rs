// sandtable-core/src/infrastructure/config/app.rs

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::error::Language;
use crate::infrastructure::error::InfrastructureError;

pub const CONFIG_CANDIDATES: [&str; 2] = ["sandtable.yaml", "sandtable.yml"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// Language tag for user-facing messages (`en`, `zh-CN`, ...).
    #[validate(length(min = 2, max = 16))]
    #[serde(default = "default_language")]
    pub language: String,

    /// Reported with every logged error.
    #[validate(length(min = 1, max = 32))]
    #[serde(default = "default_environment")]
    pub environment: String,

    #[serde(default = "default_log_errors")]
    pub log_errors: bool,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_log_errors() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            environment: default_environment(),
            log_errors: default_log_errors(),
        }
    }
}

impl AppConfig {
    pub fn language(&self) -> Language {
        Language::resolve(Some(self.language.as_str()))
    }

    /// Replaces the language tag (e.g. from a CLI flag) and re-checks the bounds.
    pub fn with_language(
        mut self,
        language: impl Into<String>,
    ) -> Result<Self, InfrastructureError> {
        self.language = language.into();
        self.validate()?;
        Ok(self)
    }
}

/// Looks for `sandtable.yaml` / `sandtable.yml` in `dir`. Without a file the defaults apply;
/// environment overrides apply either way.
pub fn load_app_config(dir: &Path) -> Result<AppConfig, InfrastructureError> {
    load_app_config_with(dir, env_lookup)
}

pub fn load_app_config_file(path: &Path) -> Result<AppConfig, InfrastructureError> {
    load_app_config_file_with(path, env_lookup)
}

/// Same as [`load_app_config`] with an explicit source for the overrides.
#[instrument(skip(dir, lookup))]
pub fn load_app_config_with<F>(dir: &Path, lookup: F) -> Result<AppConfig, InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    match find_config(dir) {
        Some(path) => load_app_config_file_with(&path, lookup),
        None => {
            info!(dir = ?dir, "No sandtable config file, using defaults");
            let mut config = AppConfig::default();
            apply_env_overrides_from(&mut config, lookup);
            config.validate()?;
            Ok(config)
        }
    }
}

#[instrument(skip(lookup))]
pub fn load_app_config_file_with<F>(
    path: &Path,
    lookup: F,
) -> Result<AppConfig, InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    if !path.exists() {
        return Err(InfrastructureError::ConfigNotFound(
            path.display().to_string(),
        ));
    }
    info!(path = ?path, "Loading sandtable config");

    let content = fs::read_to_string(path)?;
    // An empty file parses as YAML null.
    let mut config: AppConfig = if content.trim().is_empty() {
        AppConfig::default()
    } else {
        serde_yaml::from_str(&content)?
    };

    apply_env_overrides_from(&mut config, lookup);
    config.validate()?;
    Ok(config)
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn find_config(dir: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
}

pub fn apply_env_overrides(config: &mut AppConfig) {
    apply_env_overrides_from(config, env_lookup);
}

/// Layering: `SANDTABLE_LANGUAGE` and `SANDTABLE_ENV` win over the file.
pub fn apply_env_overrides_from<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("SANDTABLE_LANGUAGE") {
        info!(old = ?config.language, new = ?val, "Overriding language via ENV");
        config.language = val;
    }
    if let Some(val) = lookup("SANDTABLE_ENV") {
        info!(old = ?config.environment, new = ?val, "Overriding environment via ENV");
        config.environment = val;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_load_from_directory() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("sandtable.yml"),
            "language: zh-CN\nenvironment: staging\nlog_errors: false\n",
        )?;

        let config = load_app_config_with(dir.path(), no_env)?;
        assert_eq!(config.environment, "staging");
        assert!(!config.log_errors);
        assert_eq!(config.language(), Language::Zh);
        Ok(())
    }

    #[test]
    fn test_partial_file_takes_defaults() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("sandtable.yaml");
        fs::write(&path, "environment: production\n")?;

        let config: AppConfig = serde_yaml::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(config.language, "en");
        assert!(config.log_errors);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_reported() {
        let dir = tempdir().unwrap();
        let err = load_app_config_file_with(&dir.path().join("nope.yaml"), no_env).unwrap_err();
        assert!(matches!(err, InfrastructureError::ConfigNotFound(_)));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sandtable.yaml");
        fs::write(&path, "language: x\nenvironment: ''\n").unwrap();

        let err = load_app_config_file_with(&path, no_env).unwrap_err();
        assert!(matches!(err, InfrastructureError::InvalidConfig(_)));
    }

    #[test]
    fn test_broken_yaml_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sandtable.yaml");
        fs::write(&path, "language: [unclosed\n").unwrap();

        let err = load_app_config_file_with(&path, no_env).unwrap_err();
        assert!(matches!(err, InfrastructureError::YamlError(_)));
    }

    #[test]
    fn test_env_lookup_layers_over_file_and_defaults() -> anyhow::Result<()> {
        let env: HashMap<&str, &str> = HashMap::from([("SANDTABLE_ENV", "ci")]);
        let lookup = |key: &str| env.get(key).map(|v| v.to_string());

        let empty = tempdir()?;
        let config = load_app_config_with(empty.path(), lookup)?;
        assert_eq!(config.language, "en");
        assert_eq!(config.environment, "ci");

        let dir = tempdir()?;
        let path = dir.path().join("sandtable.yaml");
        fs::write(&path, "language: zh\nenvironment: staging\n")?;
        let config = load_app_config_file_with(&path, lookup)?;
        assert_eq!(config.language, "zh");
        assert_eq!(config.environment, "ci");

        let config = load_app_config_file_with(&path, no_env)?;
        assert_eq!(config.environment, "staging");
        Ok(())
    }

    #[test]
    fn test_language_override_is_validated() {
        let config = AppConfig::default().with_language("zh-CN").unwrap();
        assert_eq!(config.language(), Language::Zh);

        let err = AppConfig::default().with_language("x").unwrap_err();
        assert!(matches!(err, InfrastructureError::InvalidConfig(_)));

        let err = AppConfig::default()
            .with_language("a-language-tag-that-is-far-too-long")
            .unwrap_err();
        assert!(matches!(err, InfrastructureError::InvalidConfig(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> =
            HashMap::from([("SANDTABLE_LANGUAGE", "zh"), ("SANDTABLE_ENV", "ci")]);
        let mut config = AppConfig::default();

        apply_env_overrides_from(&mut config, |key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.language, "zh");
        assert_eq!(config.environment, "ci");
        assert!(config.log_errors);
    }
}
