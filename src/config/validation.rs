//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

use crate::config::schema::AppConfig;

/// A semantic problem with an otherwise well-formed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server.bind_address {0:?} is not a host:port address")]
    BindAddress(String),

    #[error("server.request_timeout_secs must be greater than zero")]
    RequestTimeout,

    #[error("logging.authorization_prefix_len must be greater than zero")]
    AuthorizationPrefix,

    #[error("observability.log_level {0:?} is not one of trace, debug, info, warn, error")]
    LogLevel(String),

    #[error("observability.log_file_name must not be empty when log_dir is set")]
    LogFileName,
}

pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !is_bind_address(&config.server.bind_address) {
        errors.push(ValidationError::BindAddress(
            config.server.bind_address.clone(),
        ));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::RequestTimeout);
    }
    if config.logging.authorization_prefix_len == 0 {
        errors.push(ValidationError::AuthorizationPrefix);
    }
    if tracing::Level::from_str(&config.observability.log_level).is_err() {
        errors.push(ValidationError::LogLevel(
            config.observability.log_level.clone(),
        ));
    }
    if config.observability.log_dir.is_some() && config.observability.log_file_name.is_empty() {
        errors.push(ValidationError::LogFileName);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A socket address, or `host:port` with a hostname the listener resolves.
fn is_bind_address(address: &str) -> bool {
    if SocketAddr::from_str(address).is_ok() {
        return true;
    }
    match address.rsplit_once(':') {
        Some((host, port)) => {
            !host.is_empty()
                && !host.contains(|c: char| c.is_whitespace() || c == ':')
                && port.parse::<u16>().is_ok()
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = AppConfig::default();
        config.server.bind_address = "not-an-address".into();
        config.server.request_timeout_secs = 0;
        config.logging.authorization_prefix_len = 0;
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BindAddress("not-an-address".into()),
                ValidationError::RequestTimeout,
                ValidationError::AuthorizationPrefix,
                ValidationError::LogLevel("loud".into()),
            ]
        );
    }

    #[test]
    fn test_bind_address_forms() {
        assert!(is_bind_address("127.0.0.1:8080"));
        assert!(is_bind_address("[::1]:8080"));
        assert!(is_bind_address("localhost:8080"));
        assert!(!is_bind_address("localhost"));
        assert!(!is_bind_address(":8080"));
        assert!(!is_bind_address("localhost:http"));
        assert!(!is_bind_address("local host:8080"));
    }

    #[test]
    fn test_log_file_name_required_with_dir() {
        let mut config = AppConfig::default();
        config.observability.log_dir = Some("/tmp/logs".into());
        config.observability.log_file_name.clear();
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::LogFileName]
        );
    }
}
