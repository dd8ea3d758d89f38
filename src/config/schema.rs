//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Interception keys also accept their kebab-case spelling
//! (`controller-logging-enabled`).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::interception::request::DEFAULT_AUTHORIZATION_PREFIX;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,

    /// Which interceptors are installed and how they redact.
    pub logging: LoggingConfig,

    /// Log output settings.
    pub observability: ObservabilityConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Maximum request body size in bytes (multipart uploads included).
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Interception configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Install the controller call wrapper.
    #[serde(alias = "controller-logging-enabled")]
    pub controller_logging_enabled: bool,

    /// Install the marked-method wrapper.
    #[serde(alias = "method-logging-enabled")]
    pub method_logging_enabled: bool,

    /// Characters of the `Authorization` header kept in logs.
    #[serde(alias = "authorization-prefix-len")]
    pub authorization_prefix_len: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            controller_logging_enabled: true,
            method_logging_enabled: true,
            authorization_prefix_len: DEFAULT_AUTHORIZATION_PREFIX,
        }
    }
}

/// Output format of the log sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Pretty or JSON lines.
    pub format: LogFormat,

    /// Hand log writes to a background worker instead of writing inline.
    pub non_blocking: bool,

    /// Directory for daily rolling log files. `None` logs to stdout only.
    pub log_dir: Option<PathBuf>,

    /// Base name of the log files.
    pub log_file_name: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "debug".to_string(),
            format: LogFormat::Pretty,
            non_blocking: true,
            log_dir: None,
            log_file_name: "call-logger".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.logging.controller_logging_enabled);
        assert!(config.logging.method_logging_enabled);
        assert_eq!(config.logging.authorization_prefix_len, 10);
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.observability.format, LogFormat::Pretty);
    }

    #[test]
    fn test_kebab_case_flags() {
        let config: AppConfig = toml::from_str(
            r#"
            [logging]
            controller-logging-enabled = false
            "#,
        )
        .unwrap();
        assert!(!config.logging.controller_logging_enabled);
        assert!(config.logging.method_logging_enabled);
    }

    #[test]
    fn test_full_config() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            bind_address = "127.0.0.1:9000"
            request_timeout_secs = 5

            [logging]
            method_logging_enabled = false
            authorization_prefix_len = 4

            [observability]
            log_level = "info"
            format = "json"
            log_dir = "/var/log/app"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1:9000");
        assert_eq!(config.server.request_timeout_secs, 5);
        assert!(!config.logging.method_logging_enabled);
        assert_eq!(config.logging.authorization_prefix_len, 4);
        assert_eq!(config.observability.format, LogFormat::Json);
        assert_eq!(
            config.observability.log_dir.as_deref(),
            Some(std::path::Path::new("/var/log/app"))
        );
    }
}
