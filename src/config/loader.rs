//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::JoinConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
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

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<JoinConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    load_config_str(&content)
}

/// Parse and validate configuration from TOML text.
pub fn load_config_str(content: &str) -> Result<JoinConfig, ConfigError> {
    let config: JoinConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = load_config_str("").unwrap();
        assert_eq!(config.fetch.retries, 1);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_partial_sections() {
        let config = load_config_str(
            r#"
            [sources]
            favorites_url = "http://127.0.0.1:9000/favs.json"

            [fetch]
            timeout_ms = 250

            [demo]
            leg_delay_ms = [1000, 5000]
            "#,
        )
        .unwrap();
        assert_eq!(config.sources.favorites_url, "http://127.0.0.1:9000/favs.json");
        assert!(config.sources.messages_url.ends_with("user-messages.json"));
        assert_eq!(config.fetch.timeout_ms, 250);
        assert_eq!(config.fetch.retries, 1);
        assert_eq!(config.demo.leg_delay_ms, Some((1000, 5000)));
    }

    #[test]
    fn test_syntax_error_is_parse_error() {
        let err = load_config_str("[fetch\nretries = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_semantic_error_is_validation_error() {
        let err = load_config_str("[fetch]\ntimeout_ms = 0\n").unwrap_err();
        assert!(err.to_string().contains("fetch.timeout_ms must be greater than zero"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/json-join.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
