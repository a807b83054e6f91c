//! Process configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Environment variable naming the catalog import file.
pub const DATA_VAR: &str = "ITINERARY_DATA";

/// Environment variable holding the listen address.
pub const ADDR_VAR: &str = "ITINERARY_ADDR";

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Errors reading the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset
    #[error("{0} is not set")]
    Missing(&'static str),

    /// A variable has an unusable value
    #[error("invalid {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Catalog file loaded at start-up.
    pub data_file: PathBuf,

    /// Address to listen on.
    pub addr: SocketAddr,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through a variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_file = lookup(DATA_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .ok_or(ConfigError::Missing(DATA_VAR))?;

        let addr = lookup(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr.parse().map_err(|_| ConfigError::Invalid {
            var: ADDR_VAR,
            value: addr.clone(),
        })?;

        Ok(Self { data_file, addr })
    }
}
