//! Connection set for one Eureka environment

use eureka_core::{ConfigError, RegistryError};
use rand::seq::SliceRandom;
use reqwest::{Client, RequestBuilder, Response, Url};
use tracing::debug;

/// A set of interchangeable Eureka servers sharing one HTTP client
#[derive(Clone, Debug)]
pub struct EurekaConnection {
    http: Client,
    service_urls: Vec<String>,
}

impl EurekaConnection {
    /// Blank addresses are ignored; at least one valid URL is required.
    pub fn new(http: Client, environment: &str, addresses: &[String]) -> Result<Self, ConfigError> {
        let mut service_urls = Vec::with_capacity(addresses.len());

        for address in addresses.iter().map(|a| a.trim()).filter(|a| !a.is_empty()) {
            let url = Url::parse(address).map_err(|e| ConfigError::InvalidAddress {
                environment: environment.to_string(),
                address: address.to_string(),
                reason: e.to_string(),
            })?;

            if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidAddress {
                    environment: environment.to_string(),
                    address: address.to_string(),
                    reason: "expected an http(s) base URL".to_string(),
                });
            }

            service_urls.push(address.trim_end_matches('/').to_string());
        }

        if service_urls.is_empty() {
            return Err(ConfigError::NoAddresses(environment.to_string()));
        }

        Ok(Self { http, service_urls })
    }

    pub fn service_urls(&self) -> &[String] {
        &self.service_urls
    }

    /// Pick one server per request
    fn select_service_url(&self) -> &str {
        self.service_urls
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub(crate) fn app_url(&self, app: &str) -> String {
        format!("{}/apps/{}", self.select_service_url(), app)
    }

    pub(crate) fn instance_url(&self, app: &str, instance_id: &str) -> String {
        format!("{}/apps/{}/{}", self.select_service_url(), app, instance_id)
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Send a request, mapping any non-success outcome to a [`RegistryError`]
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, RegistryError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "eureka response");

        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(RegistryError::Remote {
                status: status.as_u16(),
                body,
            })
        }
    }
}

pub(crate) fn transport_error(e: reqwest::Error) -> RegistryError {
    match e.status() {
        Some(status) => RegistryError::Remote {
            status: status.as_u16(),
            body: e.to_string(),
        },
        None => RegistryError::Transport(Box::new(e)),
    }
}
