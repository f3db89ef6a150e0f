//! Instance and application value types
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Registry-side status of an instance
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstanceStatus {
    #[default]
    Up,
    Down,
    Starting,
    OutOfService,
    Unknown,
}

impl InstanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceStatus::Up => "UP",
            InstanceStatus::Down => "DOWN",
            InstanceStatus::Starting => "STARTING",
            InstanceStatus::OutOfService => "OUT_OF_SERVICE",
            InstanceStatus::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A port together with its enabled flag
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    pub number: u16,
    pub enabled: bool,
}

/// One network-reachable endpoint belonging to an application
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// Identity key, lower-cased `app:host:port`
    pub instance_id: String,
    pub app: String,
    pub host_name: String,
    pub ip_addr: String,
    pub vip_address: String,
    pub secure_vip_address: String,
    pub port: Port,
    pub secure_port: Port,
    pub home_page_url: String,
    pub status_page_url: String,
    pub health_check_url: String,
    pub status: InstanceStatus,
    pub metadata: BTreeMap<String, String>,
}

impl Instance {
    /// Create an `UP` instance listening on a plain port.
    ///
    /// The host doubles as the IP address and the application name as both
    /// VIP addresses.
    pub fn new(app: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        let app = app.into();
        let host = host.into();

        Self {
            instance_id: Self::identity(&app, &host, port),
            vip_address: app.clone(),
            secure_vip_address: app.clone(),
            ip_addr: host.clone(),
            host_name: host,
            app,
            port: Port { number: port, enabled: true },
            secure_port: Port::default(),
            home_page_url: String::new(),
            status_page_url: String::new(),
            health_check_url: String::new(),
            status: InstanceStatus::Up,
            metadata: BTreeMap::new(),
        }
    }

    /// Normalized identity key for an `(app, host, port)` triple
    pub fn identity(app: &str, host: &str, port: u16) -> String {
        format!("{}:{}:{}", app, host, port).to_lowercase()
    }

    pub fn id(&self) -> &str {
        &self.instance_id
    }

    /// Serve on the secure port instead of the plain one
    pub fn with_secure_port(mut self) -> Self {
        self.secure_port = Port {
            number: self.port.number,
            enabled: true,
        };
        self.port.enabled = false;
        self
    }

    pub fn with_urls(
        mut self,
        home_page_url: impl Into<String>,
        status_page_url: impl Into<String>,
        health_check_url: impl Into<String>,
    ) -> Self {
        self.home_page_url = home_page_url.into();
        self.status_page_url = status_page_url.into();
        self.health_check_url = health_check_url.into();
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// A logical service: a named group of instances owned by one resource
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Identity of the owning resource; the belief-state key
    pub resource_name: String,
    /// Selects the registry connection set
    pub environment: String,
    /// Name the instances are registered under
    pub name: String,
    pub instances: Vec<Instance>,
}

impl Application {
    pub fn new(
        resource_name: impl Into<String>,
        environment: impl Into<String>,
        name: impl Into<String>,
        instances: Vec<Instance>,
    ) -> Self {
        Self {
            resource_name: resource_name.into(),
            environment: environment.into(),
            name: name.into(),
            instances,
        }
    }
}
