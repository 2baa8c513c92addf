//! Server configuration.

use std::net::SocketAddr;

/// Environment variable holding the listen address.
pub const BIND_ADDR_VAR: &str = "SUBWAY_BIND_ADDR";
/// Environment variable holding the default log filter.
pub const LOG_FILTER_VAR: &str = "SUBWAY_LOG";
/// Environment variable enabling the demo network.
pub const SEED_VAR: &str = "SUBWAY_SEED";

/// Error returned when the environment holds an invalid setting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {var}: {message}")]
pub struct ConfigError {
    var: &'static str,
    message: String,
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,

    /// Load the demo network at startup.
    pub seed_demo: bool,
}

impl ServerConfig {
    /// Read configuration from the process environment, falling back to
    /// defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup(BIND_ADDR_VAR) {
            config.bind_addr = addr.trim().parse().map_err(|e| ConfigError {
                var: BIND_ADDR_VAR,
                message: format!("{e}"),
            })?;
        }

        if let Some(filter) = lookup(LOG_FILTER_VAR).filter(|f| !f.trim().is_empty()) {
            config.log_filter = filter;
        }

        if let Some(seed) = lookup(SEED_VAR) {
            config.seed_demo = match seed.trim() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                other => {
                    return Err(ConfigError {
                        var: SEED_VAR,
                        message: format!("expected a boolean, got {other:?}"),
                    });
                }
            };
        }

        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            log_filter: "subway_server=info".to_string(),
            seed_demo: false,
        }
    }
}
