//! Registry connection configuration

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Environment variable holding the JSON registry configuration
pub const CONFIG_ENV_VAR: &str = "EUREKA_CONFIG";

/// Mapping from environment name to registry base URLs.
///
/// Loaded once at startup; there is no runtime reconfiguration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistryConfig {
    pub environments: BTreeMap<String, Vec<String>>,
}

impl RegistryConfig {
    /// Parse and validate a JSON object such as
    /// `{"qa": ["http://eureka-qa:8080/eureka/v2"]}`
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: RegistryConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from [`CONFIG_ENV_VAR`]
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var(CONFIG_ENV_VAR)
            .map_err(|_| ConfigError::Missing(CONFIG_ENV_VAR.to_string()))?;
        Self::from_json(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.environments.is_empty() {
            return Err(ConfigError::NoEnvironments);
        }

        for (environment, addresses) in &self.environments {
            if addresses.iter().all(|a| a.trim().is_empty()) {
                return Err(ConfigError::NoAddresses(environment.clone()));
            }
        }

        Ok(())
    }

    pub fn environment_names(&self) -> impl Iterator<Item = &str> {
        self.environments.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config = RegistryConfig::from_json(
            r#"{"qa": ["http://eureka-qa-1:8080/eureka/v2", "http://eureka-qa-2:8080/eureka/v2"],
                "prod": ["http://eureka-prod:8080/eureka/v2"]}"#,
        )
        .expect("config should parse");

        assert_eq!(config.environments.len(), 2);
        assert_eq!(config.environments["qa"].len(), 2);
        assert_eq!(config.environment_names().collect::<Vec<_>>(), vec!["prod", "qa"]);
    }

    #[test]
    fn test_empty_config_is_rejected() {
        assert!(matches!(
            RegistryConfig::from_json("{}"),
            Err(ConfigError::NoEnvironments)
        ));
    }

    #[test]
    fn test_environment_without_addresses_is_rejected() {
        match RegistryConfig::from_json(r#"{"qa": []}"#) {
            Err(ConfigError::NoAddresses(env)) => assert_eq!(env, "qa"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_config_is_rejected() {
        assert!(matches!(
            RegistryConfig::from_json(r#"["http://eureka:8080"]"#),
            Err(ConfigError::Parse(_))
        ));
    }
}
