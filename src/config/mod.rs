//! Configuration subsystem.
//!
//! Read once at startup: TOML file, environment overrides, semantic
//! validation. Nothing here is reloaded at runtime; the gateway handles are
//! built from this configuration exactly once.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError, CONFIG_PATH_ENV_VAR};
pub use schema::{GatewayConfig, LedgerConfig, ListenerConfig};
pub use validation::validate_config;
