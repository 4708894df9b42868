//! Configuration validation.
//!
//! Serde handles syntax; this checks value ranges and references and
//! returns every problem found, not just the first.

use std::collections::HashSet;

use crate::config::schema::SenderConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    ZeroTimeout(&'static str),
    DuplicateChainId(u64),
    InvalidGatewayUrl { chain_id: u64, url: String },
    UnknownLogLevel(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::ZeroTimeout(field) => write!(f, "{} must be greater than zero", field),
            ValidationError::DuplicateChainId(id) => {
                write!(f, "envelope network {} is listed more than once", id)
            }
            ValidationError::InvalidGatewayUrl { chain_id, url } => {
                write!(f, "gateway URL '{}' for chain {} is not a valid URL", url, chain_id)
            }
            ValidationError::UnknownLogLevel(level) => write!(f, "unknown log level '{}'", level),
        }
    }
}

/// Validate a parsed config.
pub fn validate_config(config: &SenderConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.rpc.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout("rpc.timeout_secs"));
    }
    if config.envelope.key_fetch_timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout("envelope.key_fetch_timeout_secs"));
    }

    let mut seen = HashSet::new();
    for network in &config.envelope.networks {
        if !seen.insert(network.chain_id) {
            errors.push(ValidationError::DuplicateChainId(network.chain_id));
        }
        if url::Url::parse(&network.gateway_url).is_err() {
            errors.push(ValidationError::InvalidGatewayUrl {
                chain_id: network.chain_id,
                url: network.gateway_url.clone(),
            });
        }
    }

    let level = config.observability.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
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
    use crate::config::schema::EnvelopeNetwork;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&SenderConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = SenderConfig::default();
        config.rpc.timeout_secs = Some(0);
        config.observability.log_level = "loud".to_string();
        config.envelope.networks = vec![
            EnvelopeNetwork {
                chain_id: 23295,
                gateway_url: "https://testnet.sapphire.oasis.io".to_string(),
            },
            EnvelopeNetwork {
                chain_id: 23295,
                gateway_url: "not a url".to_string(),
            },
        ];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroTimeout("rpc.timeout_secs")));
        assert!(errors.contains(&ValidationError::DuplicateChainId(23295)));
        assert!(errors.contains(&ValidationError::UnknownLogLevel("loud".to_string())));
    }

    #[test]
    fn test_log_level_is_case_insensitive() {
        let mut config = SenderConfig::default();
        config.observability.log_level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
