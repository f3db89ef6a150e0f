use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Zone metadata used when no zone is set
pub const DEFAULT_ZONE: &str = "default-zone";
/// Zone value that suppresses the zone metadata entry
pub const NO_ZONE: &str = "no-zone";

/// EurekaApplication publishes the hosts of an Ingress as instances of a
/// Eureka application
#[derive(CustomResource, Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "discovery.datum.net",
    version = "v1alpha1",
    kind = "EurekaApplication",
    plural = "eurekaapplications",
    shortname = "eureka",
    namespaced,
    derive = "Default",
    derive = "PartialEq",
    status = "EurekaApplicationStatus",
    printcolumn = r#"{"name":"App","type":"string","jsonPath":".spec.appName"}"#,
    printcolumn = r#"{"name":"Environment","type":"string","jsonPath":".spec.environment"}"#,
    printcolumn = r#"{"name":"Instances","type":"integer","jsonPath":".status.instanceCount"}"#,
    printcolumn = r#"{"name":"Disabled","type":"boolean","jsonPath":".spec.disabled"}"#,
)]
#[serde(rename_all = "camelCase")]
pub struct EurekaApplicationSpec {
    /// Name the instances are registered under
    pub app_name: String,

    /// Ingress in the same namespace whose rules provide the instances
    pub ingress_name: String,

    /// Registry environment; the controller default applies when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    /// Zone metadata; "no-zone" disables it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,

    /// Withdraw the application from the registry without deleting the resource
    #[serde(default)]
    pub disabled: bool,

    /// Paths joined onto each instance base URL
    #[serde(default)]
    pub paths: EurekaPaths,
}

/// Home, status and health-check paths
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EurekaPaths {
    #[serde(default)]
    pub home: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub health_check: String,
}

/// Status of a EurekaApplication
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EurekaApplicationStatus {
    /// Last successful reconcile (RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reconcile_time: Option<String>,

    /// Instances handed to the synchronizer on the last reconcile
    #[serde(default)]
    pub instance_count: u32,
}

impl EurekaApplicationSpec {
    /// Zone metadata value, or `None` when the zone is suppressed
    pub fn zone_metadata(&self) -> Option<&str> {
        match self.zone.as_deref() {
            None | Some("") => Some(DEFAULT_ZONE),
            Some(NO_ZONE) => None,
            Some(zone) => Some(zone),
        }
    }

    /// Environment, falling back to `default`
    pub fn environment_or<'a>(&'a self, default: &'a str) -> &'a str {
        match self.environment.as_deref() {
            None | Some("") => default,
            Some(environment) => environment,
        }
    }
}
