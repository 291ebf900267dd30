//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (ttl and intervals > 0)
//! - Validate names and addresses the server parses at startup
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: AppConfig → Result<(), Vec<ValidationError>>

use std::fmt;
use std::net::SocketAddr;

use axum::http::HeaderName;

use crate::config::schema::AppConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check every semantic constraint.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let inertia = &config.inertia;

    if inertia.root_view.trim().is_empty() {
        errors.push(ValidationError::new("inertia.root_view", "must not be empty"));
    }
    if inertia.shared_props_ttl_secs == 0 {
        errors.push(ValidationError::new("inertia.shared_props_ttl_secs", "must be greater than 0"));
    }
    if inertia.reap_interval_secs == 0 {
        errors.push(ValidationError::new("inertia.reap_interval_secs", "must be greater than 0"));
    }
    if HeaderName::try_from(inertia.request_id_header.as_str()).is_err() {
        errors.push(ValidationError::new(
            "inertia.request_id_header",
            format!("invalid header name {:?}", inertia.request_id_header),
        ));
    }
    if !matches!(inertia.default_scheme.as_str(), "http" | "https") {
        errors.push(ValidationError::new(
            "inertia.default_scheme",
            format!("expected http or https, got {:?}", inertia.default_scheme),
        ));
    }
    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "server.bind_address",
            format!("invalid socket address {:?}", config.server.bind_address),
        ));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::new("server.request_timeout_secs", "must be greater than 0"));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("invalid socket address {:?}", config.observability.metrics_address),
        ));
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

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AppConfig::default();
        config.inertia.root_view = " ".into();
        config.inertia.reap_interval_secs = 0;
        config.inertia.request_id_header = "bad header".into();
        config.inertia.default_scheme = "ftp".into();
        config.server.bind_address = "nowhere".into();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "inertia.root_view",
                "inertia.reap_interval_secs",
                "inertia.request_id_header",
                "inertia.default_scheme",
                "server.bind_address",
            ]
        );
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = AppConfig::default();
        config.observability.metrics_address = "???".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
