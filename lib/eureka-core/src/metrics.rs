//! Prometheus counters for registry operations

use crate::{Application, Instance};
use anyhow::Result;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

const LABELS: &[&str] = &["environment", "app_name", "app_instance"];

/// Counters labeled by `(environment, app_name, app_instance)`.
///
/// Clones share the same counters and registry.
#[derive(Clone)]
pub struct SyncMetrics {
    /// Heartbeats attempted
    pub heartbeats_total: IntCounterVec,
    /// Heartbeats that failed
    pub heartbeat_failures_total: IntCounterVec,
    /// Registrations attempted
    pub registrations_total: IntCounterVec,
    /// Registrations that failed
    pub registration_failures_total: IntCounterVec,
    /// Deregistrations attempted
    pub deregistrations_total: IntCounterVec,
    /// Deregistrations that failed
    pub deregistration_failures_total: IntCounterVec,
    /// Registry the counters are registered with
    pub registry: Arc<Registry>,
}

impl SyncMetrics {
    /// Create the counters in a fresh registry
    pub fn new() -> Result<Self> {
        Self::with_registry(Arc::new(Registry::new()))
    }

    /// Create the counters and register them with `registry`
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let heartbeats_total = counter("eureka_heartbeats_total", "Number of heartbeats processed")?;
        let heartbeat_failures_total =
            counter("eureka_heartbeat_failures_total", "Number of failed heartbeats")?;
        let registrations_total =
            counter("eureka_registrations_total", "Number of registrations processed")?;
        let registration_failures_total =
            counter("eureka_registration_failures_total", "Number of failed registrations")?;
        let deregistrations_total =
            counter("eureka_deregistrations_total", "Number of deregistrations processed")?;
        let deregistration_failures_total = counter(
            "eureka_deregistration_failures_total",
            "Number of failed deregistrations",
        )?;

        registry.register(Box::new(heartbeats_total.clone()))?;
        registry.register(Box::new(heartbeat_failures_total.clone()))?;
        registry.register(Box::new(registrations_total.clone()))?;
        registry.register(Box::new(registration_failures_total.clone()))?;
        registry.register(Box::new(deregistrations_total.clone()))?;
        registry.register(Box::new(deregistration_failures_total.clone()))?;

        Ok(Self {
            heartbeats_total,
            heartbeat_failures_total,
            registrations_total,
            registration_failures_total,
            deregistrations_total,
            deregistration_failures_total,
            registry,
        })
    }

    pub fn heartbeat(&self, app: &Application, instance: &Instance) {
        inc(&self.heartbeats_total, app, instance);
    }

    pub fn heartbeat_failure(&self, app: &Application, instance: &Instance) {
        inc(&self.heartbeat_failures_total, app, instance);
    }

    pub fn registration(&self, app: &Application, instance: &Instance) {
        inc(&self.registrations_total, app, instance);
    }

    pub fn registration_failure(&self, app: &Application, instance: &Instance) {
        inc(&self.registration_failures_total, app, instance);
    }

    pub fn deregistration(&self, app: &Application, instance: &Instance) {
        inc(&self.deregistrations_total, app, instance);
    }

    pub fn deregistration_failure(&self, app: &Application, instance: &Instance) {
        inc(&self.deregistration_failures_total, app, instance);
    }

    /// Gather all metrics in Prometheus text format
    pub fn gather(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = vec![];
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

fn counter(name: &str, help: &str) -> Result<IntCounterVec> {
    Ok(IntCounterVec::new(Opts::new(name, help), LABELS)?)
}

fn inc(counter: &IntCounterVec, app: &Application, instance: &Instance) {
    counter
        .with_label_values(&[app.environment.as_str(), app.name.as_str(), instance.id()])
        .inc();
}
