//! Eureka REST payloads

use eureka_core::{Application, Instance, InstanceStatus, Port};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

const DEFAULT_DATA_CENTER_CLASS: &str = "com.netflix.appinfo.InstanceInfo$DefaultDataCenterInfo";
const MY_OWN: &str = "MyOwn";

#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest {
    pub instance: WireInstance,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApplicationResponse {
    pub application: WireApplication,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireApplication {
    pub name: String,
    #[serde(default)]
    pub instance: OneOrMany<WireInstance>,
}

/// Eureka collapses single-element lists into a bare object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireInstance {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub instance_id: String,
    pub host_name: String,
    pub app: String,
    pub ip_addr: String,
    #[serde(default)]
    pub vip_address: String,
    #[serde(default)]
    pub secure_vip_address: String,
    pub status: InstanceStatus,
    #[serde(default)]
    pub port: WirePort,
    #[serde(default)]
    pub secure_port: WirePort,
    #[serde(default)]
    pub home_page_url: String,
    #[serde(default)]
    pub status_page_url: String,
    #[serde(default)]
    pub health_check_url: String,
    #[serde(default)]
    pub data_center_info: DataCenterInfo,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct WirePort {
    #[serde(rename = "$")]
    pub number: u16,
    #[serde(
        rename = "@enabled",
        default,
        serialize_with = "serialize_flag",
        deserialize_with = "deserialize_flag"
    )]
    pub enabled: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct DataCenterInfo {
    #[serde(rename = "@class")]
    pub class: String,
    pub name: String,
}

impl Default for DataCenterInfo {
    fn default() -> Self {
        Self {
            class: DEFAULT_DATA_CENTER_CLASS.to_string(),
            name: MY_OWN.to_string(),
        }
    }
}

fn serialize_flag<S: Serializer>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *flag { "true" } else { "false" })
}

fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(flag) => flag,
        Flag::Text(text) => text.eq_ignore_ascii_case("true"),
    })
}

impl From<Port> for WirePort {
    fn from(port: Port) -> Self {
        Self {
            number: port.number,
            enabled: port.enabled,
        }
    }
}

impl From<WirePort> for Port {
    fn from(port: WirePort) -> Self {
        Self {
            number: port.number,
            enabled: port.enabled,
        }
    }
}

impl From<&Instance> for WireInstance {
    fn from(instance: &Instance) -> Self {
        Self {
            instance_id: instance.instance_id.clone(),
            host_name: instance.host_name.clone(),
            app: instance.app.clone(),
            ip_addr: instance.ip_addr.clone(),
            vip_address: instance.vip_address.clone(),
            secure_vip_address: instance.secure_vip_address.clone(),
            status: instance.status,
            port: instance.port.into(),
            secure_port: instance.secure_port.into(),
            home_page_url: instance.home_page_url.clone(),
            status_page_url: instance.status_page_url.clone(),
            health_check_url: instance.health_check_url.clone(),
            data_center_info: DataCenterInfo::default(),
            metadata: instance.metadata.clone(),
        }
    }
}

impl From<WireInstance> for Instance {
    fn from(wire: WireInstance) -> Self {
        let port: Port = wire.port.into();
        let instance_id = if wire.instance_id.is_empty() {
            Instance::identity(&wire.app, &wire.host_name, port.number)
        } else {
            wire.instance_id
        };

        Self {
            instance_id,
            app: wire.app,
            host_name: wire.host_name,
            ip_addr: wire.ip_addr,
            vip_address: wire.vip_address,
            secure_vip_address: wire.secure_vip_address,
            port,
            secure_port: wire.secure_port.into(),
            home_page_url: wire.home_page_url,
            status_page_url: wire.status_page_url,
            health_check_url: wire.health_check_url,
            status: wire.status,
            metadata: wire.metadata,
        }
    }
}

impl WireApplication {
    pub fn into_application(self, environment: &str) -> Application {
        let instances = self.instance.into_vec().into_iter().map(Instance::from).collect();
        Application::new(self.name.clone(), environment, self.name, instances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_payload_shape() {
        let instance = Instance::new("billing", "api.example.com", 443)
            .with_secure_port()
            .with_metadata("zone", "us-east-1a");

        let body = serde_json::to_value(RegisterRequest {
            instance: WireInstance::from(&instance),
        })
        .unwrap();

        assert_eq!(body["instance"]["instanceId"], "billing:api.example.com:443");
        assert_eq!(body["instance"]["status"], "UP");
        assert_eq!(body["instance"]["port"], json!({"$": 443, "@enabled": "false"}));
        assert_eq!(body["instance"]["securePort"], json!({"$": 443, "@enabled": "true"}));
        assert_eq!(body["instance"]["dataCenterInfo"]["name"], "MyOwn");
        assert_eq!(
            body["instance"]["dataCenterInfo"]["@class"],
            DEFAULT_DATA_CENTER_CLASS
        );
        assert_eq!(body["instance"]["metadata"]["zone"], "us-east-1a");
    }

    #[test]
    fn test_single_instance_application() {
        let response: ApplicationResponse = serde_json::from_value(json!({
            "application": {
                "name": "BILLING",
                "instance": {
                    "hostName": "api.example.com",
                    "app": "BILLING",
                    "ipAddr": "10.0.0.1",
                    "status": "DOWN",
                    "port": {"$": 8080, "@enabled": true}
                }
            }
        }))
        .unwrap();

        let app = response.application.into_application("qa");
        assert_eq!(app.name, "BILLING");
        assert_eq!(app.environment, "qa");
        assert_eq!(app.instances.len(), 1);
        assert_eq!(app.instances[0].id(), "billing:api.example.com:8080");
        assert_eq!(app.instances[0].status, InstanceStatus::Down);
        assert!(app.instances[0].port.enabled);
    }

    #[test]
    fn test_application_without_instances() {
        let response: ApplicationResponse =
            serde_json::from_value(json!({"application": {"name": "BILLING"}})).unwrap();

        assert!(response.application.into_application("qa").instances.is_empty());
    }
}
