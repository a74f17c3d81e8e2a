//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeout > 0, concurrency limit > 0)
//! - Reject endpoints without a display name
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Duplicate endpoint names are allowed but logged
//! - URLs are not validated; a bad URL becomes a probe error

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::CheckerConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("max_concurrency must be greater than zero")]
    ZeroConcurrency,

    #[error("http.user_agent must not be empty")]
    EmptyUserAgent,

    #[error("endpoint #{index} has an empty name")]
    EmptyEndpointName { index: usize },
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &CheckerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.max_concurrency == Some(0) {
        errors.push(ValidationError::ZeroConcurrency);
    }

    if config.http.user_agent.trim().is_empty() {
        errors.push(ValidationError::EmptyUserAgent);
    }

    let mut seen = HashSet::new();
    for (index, endpoint) in config.endpoints.iter().enumerate() {
        if endpoint.name.trim().is_empty() {
            errors.push(ValidationError::EmptyEndpointName { index: index + 1 });
        } else if !seen.insert(endpoint.name.as_str()) {
            tracing::warn!(name = %endpoint.name, "Duplicate endpoint name");
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::EndpointConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&CheckerConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = CheckerConfig::default();
        config.timeout_secs = 0;
        config.max_concurrency = Some(0);
        config.http.user_agent = " ".into();
        config.endpoints = vec![
            EndpointConfig { name: "ok".into(), url: "http://a".into() },
            EndpointConfig { name: "".into(), url: "http://b".into() },
        ];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::ZeroTimeout,
                ValidationError::ZeroConcurrency,
                ValidationError::EmptyUserAgent,
                ValidationError::EmptyEndpointName { index: 2 },
            ]
        );
    }

    #[test]
    fn test_duplicate_names_are_allowed() {
        let mut config = CheckerConfig::default();
        config.endpoints = vec![
            EndpointConfig { name: "same".into(), url: "http://a".into() },
            EndpointConfig { name: "same".into(), url: "http://b".into() },
        ];
        assert!(validate_config(&config).is_ok());
    }
}
