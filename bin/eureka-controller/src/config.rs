//! Process configuration read from the environment

use eureka_core::config::CONFIG_ENV_VAR;
use eureka_core::{ConfigError, RegistryConfig};
use std::net::SocketAddr;
use std::time::Duration;

pub const METRICS_BIND_ADDRESS: &str = "METRICS_BIND_ADDRESS";
pub const DEFAULT_ENVIRONMENT: &str = "EUREKA_DEFAULT_ENVIRONMENT";
pub const HEARTBEAT_INTERVAL_SECS: &str = "EUREKA_HEARTBEAT_INTERVAL_SECS";
pub const REQUEST_TIMEOUT_SECS: &str = "EUREKA_REQUEST_TIMEOUT_SECS";
pub const LOG_FORMAT: &str = "LOG_FORMAT";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        Self::parse(std::env::var(LOG_FORMAT).ok().as_deref())
    }

    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ControllerConfig {
    pub registry: RegistryConfig,
    pub metrics_addr: SocketAddr,
    pub default_environment: String,
    pub heartbeat_interval: Duration,
    pub request_timeout: Duration,
}

impl ControllerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw = lookup(CONFIG_ENV_VAR).ok_or_else(|| ConfigError::Missing(CONFIG_ENV_VAR.to_string()))?;
        let registry = RegistryConfig::from_json(&raw)?;

        let metrics_addr = match lookup(METRICS_BIND_ADDRESS) {
            Some(raw) => raw.parse().map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                name: METRICS_BIND_ADDRESS.to_string(),
                reason: e.to_string(),
            })?,
            None => SocketAddr::from(([0, 0, 0, 0], 8080)),
        };

        let default_environment = lookup(DEFAULT_ENVIRONMENT)
            .filter(|env| !env.trim().is_empty())
            .unwrap_or_else(|| "qa".to_string());

        Ok(Self {
            registry,
            metrics_addr,
            default_environment,
            heartbeat_interval: seconds(&lookup, HEARTBEAT_INTERVAL_SECS, 10)?,
            request_timeout: seconds(&lookup, REQUEST_TIMEOUT_SECS, 10)?,
        })
    }
}

fn seconds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: u64,
) -> Result<Duration, ConfigError> {
    let secs = match lookup(name) {
        Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidValue {
            name: name.to_string(),
            reason: e.to_string(),
        })?,
        None => default,
    };

    if secs == 0 {
        return Err(ConfigError::InvalidValue {
            name: name.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(Duration::from_secs(secs))
}
