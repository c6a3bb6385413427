//! Crate configuration.
//!
//! Settings load from a TOML document or from environment variables:
//! - `REGIONQL_HOST`: locator hostname of the region store
//! - `REGIONQL_PORT`: locator port
//! - `REGIONQL_STRICT_CASTS`: refuse cast-wrapped predicates (`1`/`true`)

use std::env;

use serde::Deserialize;
use thiserror::Error;

use crate::pushdown::PushdownOptions;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid value for {var}: {value}")]
    InvalidEnvVar { var: String, value: String },
}

/// Identity of one remote store endpoint.
///
/// The connection registry keys its single live session on this identity:
/// two endpoints are the same connection iff they compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 10334,
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub endpoint: Endpoint,
    pub pushdown: PushdownOptions,
}

impl Settings {
    /// Parse settings from a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Build settings from `REGIONQL_*` environment variables, falling back
    /// to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Settings::default();
        if let Ok(host) = env::var("REGIONQL_HOST") {
            settings.endpoint.host = host;
        }
        if let Ok(port) = env::var("REGIONQL_PORT") {
            settings.endpoint.port = port.parse().map_err(|_| ConfigError::InvalidEnvVar {
                var: "REGIONQL_PORT".into(),
                value: port.clone(),
            })?;
        }
        if let Ok(strict) = env::var("REGIONQL_STRICT_CASTS") {
            settings.pushdown.strict_casts = match strict.as_str() {
                "1" | "true" | "TRUE" => true,
                "0" | "false" | "FALSE" => false,
                other => {
                    return Err(ConfigError::InvalidEnvVar {
                        var: "REGIONQL_STRICT_CASTS".into(),
                        value: other.to_string(),
                    })
                }
            };
        }
        Ok(settings)
    }
}
