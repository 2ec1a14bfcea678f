//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check endpoints are absolute http(s) URLs
//! - Validate value ranges (timeouts > 0, retry bounds)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: JoinConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;
use url::Url;

use crate::config::schema::JoinConfig;

/// Upper bound on `fetch.retries`.
pub const MAX_RETRIES: u32 = 5;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid URL '{value}': {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("fetch.retries must be at most {MAX_RETRIES}, got {0}")]
    TooManyRetries(u32),

    #[error("{field}: min {min} exceeds max {max}")]
    InvertedRange {
        field: &'static str,
        min: u64,
        max: u64,
    },
}

/// Parse an endpoint URL, accepting only http and https.
pub fn parse_endpoint(field: &'static str, value: &str) -> Result<Url, ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidUrl {
        field,
        value: value.to_string(),
        reason,
    };
    let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &JoinConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = parse_endpoint("sources.messages_url", &config.sources.messages_url) {
        errors.push(e);
    }
    if let Err(e) = parse_endpoint("sources.favorites_url", &config.sources.favorites_url) {
        errors.push(e);
    }

    if config.fetch.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout { field: "fetch.timeout_ms" });
    }
    if config.fetch.connect_timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout { field: "fetch.connect_timeout_ms" });
    }
    if config.fetch.retries > MAX_RETRIES {
        errors.push(ValidationError::TooManyRetries(config.fetch.retries));
    }
    if config.fetch.backoff_base_ms > config.fetch.backoff_max_ms {
        errors.push(ValidationError::InvertedRange {
            field: "fetch.backoff_base_ms",
            min: config.fetch.backoff_base_ms,
            max: config.fetch.backoff_max_ms,
        });
    }

    if let Some((min, max)) = config.demo.leg_delay_ms {
        if min > max {
            errors.push(ValidationError::InvertedRange {
                field: "demo.leg_delay_ms",
                min,
                max,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
