//! Eureka REST implementation of the registry client contract

use crate::connection::{transport_error, EurekaConnection};
use crate::wire::{ApplicationResponse, RegisterRequest, WireInstance};
use async_trait::async_trait;
use eureka_core::{Application, ConfigError, Instance, RegistryClient, RegistryConfig, RegistryError};
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Transport timeout applied to every registry request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// EurekaClient talks to one connection set per environment
pub struct EurekaClient {
    connections: HashMap<String, EurekaConnection>,
}

impl EurekaClient {
    pub fn new(config: &RegistryConfig) -> Result<Self, ConfigError> {
        Self::with_timeout(config, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(config: &RegistryConfig, timeout: Duration) -> Result<Self, ConfigError> {
        config.validate()?;

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                name: "http client".to_string(),
                reason: e.to_string(),
            })?;

        let mut connections = HashMap::new();
        for (environment, addresses) in &config.environments {
            connections.insert(
                environment.clone(),
                EurekaConnection::new(http.clone(), environment, addresses)?,
            );
        }

        Ok(Self { connections })
    }

    /// Configured environment names
    pub fn environments(&self) -> impl Iterator<Item = &str> {
        self.connections.keys().map(String::as_str)
    }

    fn connection(&self, environment: &str) -> Result<&EurekaConnection, RegistryError> {
        self.connections
            .get(environment)
            .ok_or_else(|| RegistryError::UnknownEnvironment(environment.to_string()))
    }
}

#[async_trait]
impl RegistryClient for EurekaClient {
    async fn register_instance(&self, environment: &str, instance: &Instance) -> Result<(), RegistryError> {
        let conn = self.connection(environment)?;
        let url = conn.app_url(&instance.app);
        debug!(%environment, %url, instance = %instance.id(), "register");

        let body = RegisterRequest {
            instance: WireInstance::from(instance),
        };
        conn.send(conn.http().post(&url).json(&body)).await?;
        Ok(())
    }

    async fn deregister_instance(&self, environment: &str, instance: &Instance) -> Result<(), RegistryError> {
        let conn = self.connection(environment)?;
        let url = conn.instance_url(&instance.app, instance.id());
        debug!(%environment, %url, "deregister");

        conn.send(conn.http().delete(&url)).await?;
        Ok(())
    }

    async fn heartbeat_instance(&self, environment: &str, instance: &Instance) -> Result<(), RegistryError> {
        let conn = self.connection(environment)?;
        let url = conn.instance_url(&instance.app, instance.id());
        debug!(%environment, %url, "heartbeat");

        conn.send(conn.http().put(&url)).await?;
        Ok(())
    }

    async fn get_application(&self, environment: &str, name: &str) -> Result<Application, RegistryError> {
        let conn = self.connection(environment)?;
        let url = conn.app_url(name);
        debug!(%environment, %url, "get application");

        let response = conn
            .send(conn.http().get(&url).header(ACCEPT, "application/json"))
            .await?;
        let body: ApplicationResponse = response.json().await.map_err(transport_error)?;

        Ok(body.application.into_application(environment))
    }
}
