//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `logging.controller_logging_enabled`.
pub const ENV_CONTROLLER_LOGGING: &str = "CALL_LOGGER_CONTROLLER_LOGGING_ENABLED";
/// Environment variable overriding `logging.method_logging_enabled`.
pub const ENV_METHOD_LOGGING: &str = "CALL_LOGGER_METHOD_LOGGING_ENABLED";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value {value:?} for {var}, expected true or false")]
    Env { var: &'static str, value: String },

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

/// Values given on the command line. They win over file and environment.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
}

/// Load and validate configuration from a TOML file, applying environment
/// overrides.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    load(Some(path), &CliOverrides::default())
}

/// Load the file (or defaults), then apply environment and command-line
/// overrides before validating the result.
pub fn load(path: Option<&Path>, overrides: &CliOverrides) -> Result<AppConfig, ConfigError> {
    let config = match path {
        Some(path) => toml::from_str(&fs::read_to_string(path)?)?,
        None => AppConfig::default(),
    };
    finalize(config, overrides, |var| std::env::var(var).ok())
}

fn finalize<F>(
    mut config: AppConfig,
    overrides: &CliOverrides,
    lookup: F,
) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    apply_env_overrides(&mut config, lookup)?;
    if let Some(bind_address) = &overrides.bind_address {
        config.server.bind_address = bind_address.clone();
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Override the interception flags from variables resolved by `lookup`.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(enabled) = flag(&lookup, ENV_CONTROLLER_LOGGING)? {
        config.logging.controller_logging_enabled = enabled;
    }
    if let Some(enabled) = flag(&lookup, ENV_METHOD_LOGGING)? {
        config.logging.method_logging_enabled = enabled;
    }
    Ok(())
}

fn flag<F>(lookup: &F, var: &'static str) -> Result<Option<bool>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(Some(true)),
        "false" => Ok(Some(false)),
        _ => Err(ConfigError::Env { var, value }),
    }
}
