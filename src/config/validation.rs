//! Configuration validation.
//!
//! Semantic checks that run before any subsystem starts; serde handles the
//! syntactic ones. Returns all failures, not just the first, so an operator
//! can fix a broken deployment in one pass.

use std::net::SocketAddr;

use alloy::primitives::Address;

use crate::config::schema::GatewayConfig;

/// One rejected configuration field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a loaded configuration. Pure function; no I/O.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address",
            message: format!("'{}' is not a valid socket address", config.listener.bind_address),
        });
    }

    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "listener.request_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.ledger.rpc_url.parse::<url::Url>().is_err() {
        errors.push(ValidationError {
            field: "ledger.rpc_url",
            message: format!("'{}' is not a valid URL", config.ledger.rpc_url),
        });
    }

    if config.ledger.contract_address.is_empty() {
        errors.push(ValidationError {
            field: "ledger.contract_address",
            message: "contract address is required".to_string(),
        });
    } else if config.ledger.contract_address.parse::<Address>().is_err() {
        errors.push(ValidationError {
            field: "ledger.contract_address",
            message: format!(
                "'{}' is not a valid address",
                config.ledger.contract_address
            ),
        });
    }

    if config.ledger.rpc_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "ledger.rpc_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.ledger.confirmation_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "ledger.confirmation_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    } else if config.listener.request_timeout_secs <= config.ledger.confirmation_timeout_secs {
        errors.push(ValidationError {
            field: "listener.request_timeout_secs",
            message: "must exceed ledger.confirmation_timeout_secs".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
