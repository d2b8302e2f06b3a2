//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming the config file path.
pub const CONFIG_PATH_ENV_VAR: &str = "GATEWAY_CONFIG";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration: TOML file if present, then environment overrides,
/// then semantic validation.
///
/// A missing file is not an error. The defaults plus environment cover
/// deployments configured entirely through the environment.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let mut config = if path.exists() {
        let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
        toml::from_str(&content).map_err(ConfigError::Parse)?
    } else {
        GatewayConfig::default()
    };

    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply `RPC_URL`, `CONTRACT_ADDRESS` and `PORT` from the environment.
///
/// The signing key is handled by the wallet, never by config, so it cannot
/// end up serialized or logged with the rest of the settings.
pub fn apply_env_overrides(config: &mut GatewayConfig) {
    if let Ok(url) = std::env::var("RPC_URL") {
        if !url.is_empty() {
            config.ledger.rpc_url = url;
        }
    }
    if let Ok(address) = std::env::var("CONTRACT_ADDRESS") {
        if !address.is_empty() {
            config.ledger.contract_address = address;
        }
    }
    if let Ok(port) = std::env::var("PORT") {
        if !port.is_empty() {
            config.listener.bind_address = format!("0.0.0.0:{}", port);
        }
    }
}
