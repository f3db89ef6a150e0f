//! Translates EurekaApplication resources into synchronizer calls

use chrono::{DateTime, Utc};
use eureka_api::v1alpha1::{EurekaApplicationSpec, EurekaApplicationStatus};
use eureka_api::EurekaApplication;
use eureka_core::{Application, Instance, SyncError, SynchronizerHandle};
use k8s_openapi::api::core::v1::Service;
use k8s_openapi::api::networking::v1::Ingress;
use kube::api::{Patch, PatchParams};
use kube::{Api, Client, ResourceExt};
use kube_runtime::controller::Action;
use reqwest::Url;
use serde_json::json;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const FINALIZER_NAME: &str = "eurekaapplications.discovery.datum.net/finalizer";

/// Requeue after a successful reconcile so Ingress changes are picked up
pub const REQUEUE_INTERVAL: Duration = Duration::from_secs(300);

const HTTPS_PORT: u16 = 443;
const ZONE_METADATA_KEY: &str = "zone";

/// Status timestamps younger than this many seconds are not rewritten
const STATUS_REFRESH_AFTER_SECS: i64 = 60;

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Kubernetes error: {0}")]
    Kube(#[from] kube::Error),

    #[error("resource {0} has no namespace")]
    MissingNamespace(String),

    #[error("referenced object not found {kind}/{name}")]
    NotFound { kind: &'static str, name: String },

    #[error("service {service} has no port named {port}")]
    NamedPortNotFound { service: String, port: String },

    #[error("invalid host or path set for application {kind} address: {reason}")]
    InvalidUrl { kind: &'static str, reason: String },

    #[error(transparent)]
    Sync(#[from] SyncError),
}

/// A reference to a Service port, by number or by name
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServicePortRef {
    Number(u16),
    Name(String),
}

/// One Ingress rule host routed to a Service backend
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendTarget {
    pub host: String,
    pub service: String,
    pub port: ServicePortRef,
}

/// What a reconcile hands to the synchronizer
#[derive(Clone, Debug, PartialEq)]
pub enum Publication {
    /// Register the application, superseding what was registered before
    Publish(Application),
    /// Deregister everything held for the resource
    Withdraw,
}

impl Publication {
    /// Withdraw disabled resources; otherwise publish the application `build`
    /// resolves to. `build` is not polled for disabled resources.
    pub async fn for_resource<F>(resource: &EurekaApplication, build: F) -> Result<Self, HandlerError>
    where
        F: Future<Output = Result<Application, HandlerError>>,
    {
        if resource.spec.disabled {
            info!(resource = %resource_name(resource), "application disabled, deregistering");
            return Ok(Publication::Withdraw);
        }

        Ok(Publication::Publish(build.await?))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostPort {
    pub host: String,
    pub port: u16,
}

pub struct Handler {
    client: Client,
    synchronizer: SynchronizerHandle,
    default_environment: String,
}

impl Handler {
    pub fn new(client: Client, synchronizer: SynchronizerHandle, default_environment: String) -> Self {
        Self {
            client,
            synchronizer,
            default_environment,
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Publish the desired state of `resource`, or withdraw it when disabled
    pub async fn apply(&self, resource: &EurekaApplication) -> Result<Action, HandlerError> {
        let key = resource_name(resource);

        let publication = Publication::for_resource(resource, self.build_application(resource, &key)).await?;

        let count = publish(&self.synchronizer, &key, publication).await?;
        self.update_status(resource, count).await?;

        Ok(Action::requeue(REQUEUE_INTERVAL))
    }

    /// Withdraw `resource` before its finalizer is removed
    pub async fn cleanup(&self, resource: &EurekaApplication) -> Result<Action, HandlerError> {
        let key = resource_name(resource);
        info!(resource = %key, "resource deleted, deregistering");

        publish(&self.synchronizer, &key, Publication::Withdraw).await?;
        Ok(Action::await_change())
    }

    async fn build_application(
        &self,
        resource: &EurekaApplication,
        key: &str,
    ) -> Result<Application, HandlerError> {
        let namespace = resource
            .namespace()
            .ok_or_else(|| HandlerError::MissingNamespace(key.to_string()))?;

        let ingresses: Api<Ingress> = Api::namespaced(self.client.clone(), &namespace);
        let ingress = ingresses
            .get_opt(&resource.spec.ingress_name)
            .await?
            .ok_or_else(|| HandlerError::NotFound {
                kind: "Ingress",
                name: resource.spec.ingress_name.clone(),
            })?;

        let targets = backend_targets(&ingress);
        let host_ports = self.resolve_ports(&namespace, targets).await?;
        let instances = build_instances(&resource.spec, &host_ports)?;

        Ok(Application::new(
            key,
            resource.spec.environment_or(&self.default_environment),
            resource.spec.app_name.clone(),
            instances,
        ))
    }

    async fn resolve_ports(
        &self,
        namespace: &str,
        targets: Vec<BackendTarget>,
    ) -> Result<Vec<HostPort>, HandlerError> {
        let services: Api<Service> = Api::namespaced(self.client.clone(), namespace);
        let mut fetched: HashMap<String, Service> = HashMap::new();
        let mut host_ports = Vec::with_capacity(targets.len());

        for target in targets {
            let port = match target.port {
                ServicePortRef::Number(port) => port,
                ServicePortRef::Name(name) => {
                    if !fetched.contains_key(&target.service) {
                        let service = services.get_opt(&target.service).await?.ok_or_else(|| {
                            HandlerError::NotFound {
                                kind: "Service",
                                name: target.service.clone(),
                            }
                        })?;
                        fetched.insert(target.service.clone(), service);
                    }

                    fetched
                        .get(&target.service)
                        .and_then(|service| named_port(service, &name))
                        .ok_or(HandlerError::NamedPortNotFound {
                            service: target.service.clone(),
                            port: name,
                        })?
                }
            };

            host_ports.push(HostPort {
                host: target.host,
                port,
            });
        }

        Ok(host_ports)
    }

    async fn update_status(&self, resource: &EurekaApplication, count: usize) -> Result<(), HandlerError> {
        let instance_count = u32::try_from(count).unwrap_or(u32::MAX);
        let now = Utc::now();

        if !status_is_stale(resource.status.as_ref(), instance_count, now) {
            debug!(resource = %resource_name(resource), "status is current");
            return Ok(());
        }

        let Some(namespace) = resource.namespace() else {
            return Err(HandlerError::MissingNamespace(resource_name(resource)));
        };

        let api: Api<EurekaApplication> = Api::namespaced(self.client.clone(), &namespace);
        let status = EurekaApplicationStatus {
            last_reconcile_time: Some(now.to_rfc3339()),
            instance_count,
        };

        api.patch_status(
            &resource.name_any(),
            &PatchParams::default(),
            &Patch::Merge(json!({ "status": status })),
        )
        .await?;

        Ok(())
    }
}

/// Hand `publication` for `key` to the synchronizer, returning the number of
/// instances handed over
pub async fn publish(
    synchronizer: &SynchronizerHandle,
    key: &str,
    publication: Publication,
) -> Result<usize, SyncError> {
    match publication {
        Publication::Publish(app) => {
            let count = app.instances.len();
            info!(resource = %key, app = %app.name, environment = %app.environment, instances = count, "registering application");
            synchronizer.register(app).await?;
            Ok(count)
        }
        Publication::Withdraw => {
            synchronizer.deregister(key).await?;
            Ok(0)
        }
    }
}

/// Belief-state key for a resource: `namespace/name`
pub fn resource_name(resource: &EurekaApplication) -> String {
    match resource.namespace() {
        Some(namespace) => format!("{}/{}", namespace, resource.name_any()),
        None => resource.name_any(),
    }
}

/// Every `(rule host, service backend)` pair of an Ingress.
///
/// Rules without a host and backends that are not Services are skipped.
pub fn backend_targets(ingress: &Ingress) -> Vec<BackendTarget> {
    let rules = ingress
        .spec
        .as_ref()
        .and_then(|spec| spec.rules.as_ref())
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut targets = Vec::new();
    for rule in rules {
        let Some(host) = rule.host.as_deref().filter(|h| !h.is_empty()) else {
            warn!(ingress = %ingress.name_any(), "skipping ingress rule without host");
            continue;
        };
        let Some(http) = rule.http.as_ref() else {
            continue;
        };

        for path in &http.paths {
            let Some(service) = path.backend.service.as_ref() else {
                continue;
            };
            let Some(port) = service.port.as_ref() else {
                continue;
            };

            let port = match (port.name.as_deref(), port.number) {
                (Some(name), _) if !name.is_empty() => ServicePortRef::Name(name.to_string()),
                (_, Some(number)) => match u16::try_from(number) {
                    Ok(number) => ServicePortRef::Number(number),
                    Err(_) => {
                        warn!(host, service = %service.name, number, "skipping invalid backend port");
                        continue;
                    }
                },
                _ => continue,
            };

            targets.push(BackendTarget {
                host: host.to_string(),
                service: service.name.clone(),
                port,
            });
        }
    }

    targets
}

fn named_port(service: &Service, name: &str) -> Option<u16> {
    service
        .spec
        .as_ref()?
        .ports
        .as_ref()?
        .iter()
        .find(|port| port.name.as_deref() == Some(name))
        .and_then(|port| u16::try_from(port.port).ok())
}

/// Build one `UP` instance per host/port
pub fn build_instances(spec: &EurekaApplicationSpec, host_ports: &[HostPort]) -> Result<Vec<Instance>, HandlerError> {
    let zone = spec.zone_metadata();
    let mut instances = Vec::with_capacity(host_ports.len());

    for HostPort { host, port } in host_ports {
        let protocol = if *port == HTTPS_PORT { "https" } else { "http" };
        let base = format!("{}://{}:{}", protocol, host, port);

        let status_url = join_url(&base, &spec.paths.status).map_err(|reason| HandlerError::InvalidUrl {
            kind: "status",
            reason,
        })?;
        let health_check_url =
            join_url(&base, &spec.paths.health_check).map_err(|reason| HandlerError::InvalidUrl {
                kind: "healthcheck",
                reason,
            })?;
        let home_url = join_url(&base, &spec.paths.home).map_err(|reason| HandlerError::InvalidUrl {
            kind: "home",
            reason,
        })?;

        let mut instance = Instance::new(spec.app_name.as_str(), host.as_str(), *port).with_urls(
            home_url,
            status_url,
            health_check_url,
        );
        if let Some(zone) = zone {
            instance = instance.with_metadata(ZONE_METADATA_KEY, zone);
        }
        if *port == HTTPS_PORT {
            instance = instance.with_secure_port();
        }

        instances.push(instance);
    }

    Ok(instances)
}

/// Join `path` onto the path of `base`, cleaning `.`, `..` and repeated slashes.
///
/// The scheme and authority of `base` are kept as written, explicit default
/// ports included. When both paths are empty `base` is returned unchanged.
pub fn join_url(base: &str, path: &str) -> Result<String, String> {
    let url = Url::parse(base).map_err(|e| e.to_string())?;
    if url.cannot_be_a_base() || !url.has_host() {
        return Err(format!("{} is not a base URL", base));
    }

    let authority_start = base.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = base[authority_start..]
        .find(|c: char| matches!(c, '/' | '?' | '#'))
        .map(|i| authority_start + i)
        .unwrap_or(base.len());
    let (origin, rest) = base.split_at(path_start);
    let base_path = rest.split(|c: char| matches!(c, '?' | '#')).next().unwrap_or_default();

    if base_path.is_empty() && path.is_empty() {
        return Ok(origin.to_string());
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in base_path.split('/').chain(path.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            segment => segments.push(segment),
        }
    }

    Ok(format!("{}/{}", origin, segments.join("/")))
}

/// Whether the status should be rewritten
fn status_is_stale(status: Option<&EurekaApplicationStatus>, instance_count: u32, now: DateTime<Utc>) -> bool {
    let Some(status) = status else {
        return true;
    };
    if status.instance_count != instance_count {
        return true;
    }

    match status
        .last_reconcile_time
        .as_deref()
        .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
    {
        Some(last) => now.signed_duration_since(last.with_timezone(&Utc)).num_seconds() >= STATUS_REFRESH_AFTER_SECS,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use eureka_api::v1alpha1::EurekaPaths;
    use eureka_core::{Port, RegistryClient, RegistryError, SyncMetrics, Synchronizer, SynchronizerConfig};
    use std::sync::{Arc, Mutex};

    /// Registry double that records `(operation, instance id)` calls
    #[derive(Default)]
    struct RecordingRegistry {
        calls: Mutex<Vec<(&'static str, String)>>,
    }

    impl RecordingRegistry {
        fn calls(&self) -> Vec<(&'static str, String)> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, op: &'static str, instance: &Instance) -> Result<(), RegistryError> {
            self.calls.lock().unwrap().push((op, instance.id().to_string()));
            Ok(())
        }
    }

    #[async_trait]
    impl RegistryClient for RecordingRegistry {
        async fn register_instance(&self, _environment: &str, instance: &Instance) -> Result<(), RegistryError> {
            self.record("register", instance)
        }

        async fn deregister_instance(&self, _environment: &str, instance: &Instance) -> Result<(), RegistryError> {
            self.record("deregister", instance)
        }

        async fn heartbeat_instance(&self, _environment: &str, instance: &Instance) -> Result<(), RegistryError> {
            self.record("heartbeat", instance)
        }

        async fn get_application(&self, environment: &str, name: &str) -> Result<Application, RegistryError> {
            Ok(Application::new(name, environment, name, Vec::new()))
        }
    }

    fn synchronizer() -> (SynchronizerHandle, Arc<RecordingRegistry>) {
        let registry = Arc::new(RecordingRegistry::default());
        let handle = Synchronizer::with_config(
            registry.clone(),
            SyncMetrics::new().unwrap(),
            SynchronizerConfig {
                heartbeat_interval: Duration::from_secs(3600),
                ..Default::default()
            },
        )
        .start();
        (handle, registry)
    }

    fn resource(namespace: &str, disabled: bool) -> EurekaApplication {
        let mut spec = spec(None);
        spec.disabled = disabled;
        let mut resource = EurekaApplication::new("billing", spec);
        resource.metadata.namespace = Some(namespace.to_string());
        resource
    }

    fn application(key: &str, hosts: &[&str]) -> Application {
        let host_ports: Vec<HostPort> = hosts
            .iter()
            .map(|host| HostPort {
                host: host.to_string(),
                port: 8080,
            })
            .collect();
        Application::new(key, "qa", "billing", build_instances(&spec(None), &host_ports).unwrap())
    }

    fn ingress(value: serde_json::Value) -> Ingress {
        serde_json::from_value(value).expect("valid ingress")
    }

    fn spec(zone: Option<&str>) -> EurekaApplicationSpec {
        EurekaApplicationSpec {
            app_name: "Billing".to_string(),
            ingress_name: "billing".to_string(),
            zone: zone.map(str::to_string),
            paths: EurekaPaths {
                home: "/".to_string(),
                status: "/info".to_string(),
                health_check: "actuator/health".to_string(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_backend_targets() {
        let ingress = ingress(json!({
            "metadata": {"name": "billing", "namespace": "default"},
            "spec": {
                "rules": [
                    {
                        "host": "billing.example.com",
                        "http": {"paths": [
                            {"path": "/", "pathType": "Prefix",
                             "backend": {"service": {"name": "billing", "port": {"number": 8080}}}},
                            {"path": "/api", "pathType": "Prefix",
                             "backend": {"service": {"name": "billing-api", "port": {"name": "https"}}}}
                        ]}
                    },
                    {
                        "http": {"paths": [
                            {"path": "/", "pathType": "Prefix",
                             "backend": {"service": {"name": "billing", "port": {"number": 80}}}}
                        ]}
                    }
                ]
            }
        }));

        assert_eq!(
            backend_targets(&ingress),
            vec![
                BackendTarget {
                    host: "billing.example.com".to_string(),
                    service: "billing".to_string(),
                    port: ServicePortRef::Number(8080),
                },
                BackendTarget {
                    host: "billing.example.com".to_string(),
                    service: "billing-api".to_string(),
                    port: ServicePortRef::Name("https".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_backend_targets_without_rules() {
        let ingress = ingress(json!({"metadata": {"name": "empty"}, "spec": {}}));
        assert!(backend_targets(&ingress).is_empty());
    }

    #[test]
    fn test_named_port_lookup() {
        let service: Service = serde_json::from_value(json!({
            "metadata": {"name": "billing-api"},
            "spec": {"ports": [
                {"name": "http", "port": 80},
                {"name": "https", "port": 443}
            ]}
        }))
        .unwrap();

        assert_eq!(named_port(&service, "https"), Some(443));
        assert_eq!(named_port(&service, "grpc"), None);
    }

    #[test]
    fn test_build_http_instance() {
        let host_ports = vec![HostPort {
            host: "Billing.Example.com".to_string(),
            port: 8080,
        }];

        let instances = build_instances(&spec(None), &host_ports).unwrap();
        let instance = &instances[0];

        assert_eq!(instance.id(), "billing:billing.example.com:8080");
        assert_eq!(instance.host_name, "Billing.Example.com");
        assert_eq!(instance.port, Port { number: 8080, enabled: true });
        assert!(!instance.secure_port.enabled);
        assert_eq!(instance.home_page_url, "http://Billing.Example.com:8080/");
        assert_eq!(instance.status_page_url, "http://Billing.Example.com:8080/info");
        assert_eq!(instance.health_check_url, "http://Billing.Example.com:8080/actuator/health");
        assert_eq!(instance.metadata.get("zone").map(String::as_str), Some("default-zone"));
    }

    #[test]
    fn test_build_https_instance_without_zone() {
        let host_ports = vec![HostPort {
            host: "billing.example.com".to_string(),
            port: 443,
        }];

        let instances = build_instances(&spec(Some("no-zone")), &host_ports).unwrap();
        let instance = &instances[0];

        assert!(!instance.port.enabled);
        assert_eq!(instance.secure_port, Port { number: 443, enabled: true });
        assert_eq!(instance.status_page_url, "https://billing.example.com:443/info");
        assert_eq!(instance.health_check_url, "https://billing.example.com:443/actuator/health");
        assert!(instance.metadata.is_empty());
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://h:8080", "/health").unwrap(), "http://h:8080/health");
        assert_eq!(join_url("http://h:8080", "health").unwrap(), "http://h:8080/health");
        assert_eq!(join_url("http://h:8080", "/").unwrap(), "http://h:8080/");
        assert_eq!(join_url("http://h:8080/base", "a/../b//c/").unwrap(), "http://h:8080/base/b/c");
        assert!(join_url("not a url", "/health").is_err());
    }

    #[test]
    fn test_join_url_keeps_default_ports() {
        assert_eq!(join_url("https://h.example.com:443", "/info").unwrap(), "https://h.example.com:443/info");
        assert_eq!(join_url("http://h.example.com:80", "/info").unwrap(), "http://h.example.com:80/info");
    }

    #[test]
    fn test_join_url_empty_path() {
        assert_eq!(join_url("http://h:8080", "").unwrap(), "http://h:8080");
        assert_eq!(join_url("https://h.example.com:443", "").unwrap(), "https://h.example.com:443");
        assert_eq!(join_url("http://h:8080/base", "").unwrap(), "http://h:8080/base");
    }

    #[test]
    fn test_status_is_stale() {
        let now = Utc::now();
        let fresh = EurekaApplicationStatus {
            last_reconcile_time: Some(now.to_rfc3339()),
            instance_count: 2,
        };
        let old = EurekaApplicationStatus {
            last_reconcile_time: Some((now - chrono::Duration::seconds(120)).to_rfc3339()),
            instance_count: 2,
        };

        assert!(status_is_stale(None, 2, now));
        assert!(!status_is_stale(Some(&fresh), 2, now));
        assert!(status_is_stale(Some(&fresh), 3, now));
        assert!(status_is_stale(Some(&old), 2, now));
    }

    #[tokio::test]
    async fn test_publish_registers_application() {
        let (sync, registry) = synchronizer();
        let key = resource_name(&resource("payments", false));

        let count = publish(&sync, &key, Publication::Publish(application(&key, &["a.example.com", "b.example.com"])))
            .await
            .unwrap();
        let state = sync.snapshot().await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(state[&key].instances.len(), 2);
        assert_eq!(
            registry.calls(),
            vec![
                ("register", "billing:a.example.com:8080".to_string()),
                ("register", "billing:b.example.com:8080".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_withdraw_deregisters_without_registering() {
        let (sync, registry) = synchronizer();
        let disabled = resource("payments", true);
        let key = resource_name(&disabled);
        assert_eq!(key, "payments/billing");

        publish(&sync, &key, Publication::Publish(application(&key, &["a.example.com"])))
            .await
            .unwrap();
        sync.snapshot().await.unwrap();

        let count = publish(&sync, &key, Publication::Withdraw).await.unwrap();
        let state = sync.snapshot().await.unwrap();

        assert_eq!(count, 0);
        assert!(state.is_empty());
        assert_eq!(
            registry.calls(),
            vec![
                ("register", "billing:a.example.com:8080".to_string()),
                ("deregister", "billing:a.example.com:8080".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_cleanup_withdraws_only_its_own_resource() {
        let (sync, registry) = synchronizer();
        let payments = resource_name(&resource("payments", false));
        let billing = resource_name(&resource("billing", false));

        publish(&sync, &payments, Publication::Publish(application(&payments, &["a.example.com"])))
            .await
            .unwrap();
        publish(&sync, &billing, Publication::Publish(application(&billing, &["b.example.com"])))
            .await
            .unwrap();

        publish(&sync, &payments, Publication::Withdraw).await.unwrap();
        let state = sync.snapshot().await.unwrap();

        assert!(!state.contains_key("payments/billing"));
        assert!(state.contains_key("billing/billing"));
        assert_eq!(
            registry.calls().last(),
            Some(&("deregister", "billing:a.example.com:8080".to_string()))
        );
    }

    #[tokio::test]
    async fn test_disabled_resource_is_withdrawn_without_building() {
        let disabled = resource("payments", true);
        let publication = Publication::for_resource(&disabled, async {
            Err(HandlerError::NotFound {
                kind: "Ingress",
                name: "billing".to_string(),
            })
        })
        .await
        .unwrap();
        assert_eq!(publication, Publication::Withdraw);

        let enabled = resource("payments", false);
        let key = resource_name(&enabled);
        let app = application(&key, &["a.example.com"]);
        let publication = Publication::for_resource(&enabled, async { Ok(app.clone()) }).await.unwrap();
        assert_eq!(publication, Publication::Publish(app));

        let missing = Publication::for_resource(&enabled, async {
            Err(HandlerError::NotFound {
                kind: "Ingress",
                name: "billing".to_string(),
            })
        })
        .await;
        assert!(matches!(missing, Err(HandlerError::NotFound { kind: "Ingress", .. })));
    }

    #[tokio::test]
    async fn test_publish_after_stop_is_rejected() {
        let (sync, _registry) = synchronizer();
        sync.stop().await;

        let result = publish(&sync, "payments/billing", Publication::Withdraw).await;
        assert!(matches!(result, Err(SyncError::Stopped)));
    }

    #[test]
    fn test_not_found_message() {
        let error = HandlerError::NotFound {
            kind: "Ingress",
            name: "billing".to_string(),
        };
        assert_eq!(error.to_string(), "referenced object not found Ingress/billing");
    }

    #[test]
    fn test_resource_name() {
        let mut resource = EurekaApplication::new("billing", spec(None));
        assert_eq!(resource_name(&resource), "billing");

        resource.metadata.namespace = Some("payments".to_string());
        assert_eq!(resource_name(&resource), "payments/billing");
    }
}
