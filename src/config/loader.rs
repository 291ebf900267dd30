//! Configuration loading from disk and the environment.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load, override from the environment and validate.
///
/// Without a path, defaults are used as the base.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => AppConfig::default(),
    };

    let config = apply_overrides(config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply `INERTIA_ROOT_VIEW`, `INERTIA_PUBLIC_PATH`, `INERTIA_RESOURCES_PATH`
/// and `SCHEME` from `lookup`.
pub fn apply_overrides<F>(mut config: AppConfig, lookup: F) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(root_view) = lookup("INERTIA_ROOT_VIEW") {
        config.inertia.root_view = root_view;
    }
    if let Some(public_path) = lookup("INERTIA_PUBLIC_PATH") {
        config.inertia.public_path = PathBuf::from(public_path);
    }
    if let Some(resources_path) = lookup("INERTIA_RESOURCES_PATH") {
        config.inertia.resources_path = PathBuf::from(resources_path);
    }
    if let Some(scheme) = lookup("SCHEME") {
        config.inertia.default_scheme = scheme;
    }
    config
}
