//! Coordinator that owns the registration belief-state
//!
//! A single task holds the map of applications it believes are registered and
//! is the only caller of the [`RegistryClient`]. Callers talk to it through a
//! cloneable [`SynchronizerHandle`]; every command and every heartbeat tick is
//! processed to completion, one at a time, in arrival order.

use crate::diff::vanished_instances;
use crate::{Application, Instance, RegistryClient, SyncError, SyncMetrics};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Period of the heartbeat sweep
pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(10);

/// Belief-state keyed by resource name
pub type Applications = HashMap<String, Application>;

#[derive(Clone, Debug)]
pub struct SynchronizerConfig {
    /// Time between heartbeat sweeps; the first sweep runs one period after start
    pub heartbeat_interval: Duration,
    /// Commands buffered before a hand-off has to wait for the coordinator
    pub inbox_capacity: usize,
}

impl Default for SynchronizerConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval: DEFAULT_HEARTBEAT_INTERVAL,
            inbox_capacity: 1,
        }
    }
}

enum Command {
    Register(Application),
    Deregister(String),
    Heartbeat,
    Snapshot(oneshot::Sender<Applications>),
}

/// Unstarted synchronizer
pub struct Synchronizer {
    coordinator: Coordinator,
    config: SynchronizerConfig,
}

impl Synchronizer {
    pub fn new(client: Arc<dyn RegistryClient>, metrics: SyncMetrics) -> Self {
        Self::with_config(client, metrics, SynchronizerConfig::default())
    }

    pub fn with_config(
        client: Arc<dyn RegistryClient>,
        metrics: SyncMetrics,
        config: SynchronizerConfig,
    ) -> Self {
        Self {
            coordinator: Coordinator {
                client,
                metrics,
                applications: HashMap::new(),
            },
            config,
        }
    }

    /// Spawn the coordinator task onto the current tokio runtime
    pub fn start(self) -> SynchronizerHandle {
        let (tx, rx) = mpsc::channel(self.config.inbox_capacity.max(1));
        let cancel = CancellationToken::new();

        let task = tokio::spawn(self.coordinator.run(
            rx,
            cancel.clone(),
            self.config.heartbeat_interval,
        ));

        SynchronizerHandle {
            tx,
            cancel,
            task: Arc::new(Mutex::new(Some(task))),
        }
    }
}

/// Cloneable hand-off to a running coordinator
#[derive(Clone)]
pub struct SynchronizerHandle {
    tx: mpsc::Sender<Command>,
    cancel: CancellationToken,
    task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl SynchronizerHandle {
    /// Submit the desired state of an application.
    ///
    /// Returns once the coordinator has accepted the command, not once it has
    /// been applied.
    pub async fn register(&self, app: Application) -> Result<(), SyncError> {
        self.send(Command::Register(app)).await
    }

    /// Withdraw every instance registered for `resource_name`
    pub async fn deregister(&self, resource_name: impl Into<String>) -> Result<(), SyncError> {
        self.send(Command::Deregister(resource_name.into())).await
    }

    /// Queue a heartbeat sweep ahead of the next timer tick
    pub async fn heartbeat_now(&self) -> Result<(), SyncError> {
        self.send(Command::Heartbeat).await
    }

    /// Copy of the belief-state after every previously accepted command has
    /// been processed
    pub async fn snapshot(&self) -> Result<Applications, SyncError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Snapshot(reply)).await?;
        rx.await.map_err(|_| SyncError::Stopped)
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Stop accepting commands, process the ones already accepted, and wait
    /// for the coordinator to exit. Safe to call more than once.
    pub async fn stop(&self) {
        self.cancel.cancel();

        let mut task = self.task.lock().await;
        if let Some(task) = task.take() {
            if let Err(e) = task.await {
                error!(error = %e, "synchronizer task failed");
            }
        }
    }

    async fn send(&self, command: Command) -> Result<(), SyncError> {
        if self.cancel.is_cancelled() {
            return Err(SyncError::Stopped);
        }

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(SyncError::Stopped),
            sent = self.tx.send(command) => sent.map_err(|_| SyncError::Stopped),
        }
    }
}

struct Coordinator {
    client: Arc<dyn RegistryClient>,
    metrics: SyncMetrics,
    applications: Applications,
}

impl Coordinator {
    async fn run(
        mut self,
        mut inbox: mpsc::Receiver<Command>,
        cancel: CancellationToken,
        heartbeat_interval: Duration,
    ) {
        let mut ticker = time::interval_at(Instant::now() + heartbeat_interval, heartbeat_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(interval = ?heartbeat_interval, "synchronizer started");

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => self.heartbeat().await,
                command = inbox.recv() => match command {
                    Some(command) => self.handle(command).await,
                    None => break,
                },
            }
        }

        inbox.close();
        let mut drained = 0usize;
        while let Some(command) = inbox.recv().await {
            self.handle(command).await;
            drained += 1;
        }

        info!(drained, applications = self.applications.len(), "synchronizer stopped");
    }

    async fn handle(&mut self, command: Command) {
        match command {
            Command::Register(app) => self.register(app).await,
            Command::Deregister(resource_name) => self.deregister(&resource_name).await,
            Command::Heartbeat => self.heartbeat().await,
            Command::Snapshot(reply) => {
                let _ = reply.send(self.applications.clone());
            }
        }
    }

    /// Replace whatever is registered for `app.resource_name` with `app`.
    ///
    /// Instances that disappeared from the desired set are deregistered first,
    /// then every desired instance is registered again. Only instances the
    /// registry accepted are kept in the belief-state.
    async fn register(&mut self, app: Application) {
        if let Some(previous) = self.applications.remove(&app.resource_name) {
            let vanished = vanished_instances(&previous.instances, &app.instances);
            debug!(
                resource = %app.resource_name,
                vanished = vanished.len(),
                "replacing registered application"
            );

            for instance in vanished {
                self.deregister_instance(&previous, instance).await;
            }
        }

        let mut adopted = Vec::with_capacity(app.instances.len());
        for instance in &app.instances {
            if self.register_instance(&app, instance).await {
                adopted.push(instance.clone());
            }
        }

        if adopted.is_empty() {
            if app.instances.is_empty() {
                warn!(resource = %app.resource_name, "no instances set to be registered");
            } else {
                error!(resource = %app.resource_name, "unable to register any instance");
            }
            return;
        }

        if adopted.len() < app.instances.len() {
            warn!(
                resource = %app.resource_name,
                registered = adopted.len(),
                requested = app.instances.len(),
                "application partially registered"
            );
        }

        let Application {
            resource_name,
            environment,
            name,
            ..
        } = app;

        self.applications.insert(
            resource_name.clone(),
            Application {
                resource_name,
                environment,
                name,
                instances: adopted,
            },
        );
    }

    async fn deregister(&mut self, resource_name: &str) {
        let Some(app) = self.applications.remove(resource_name) else {
            warn!(resource = %resource_name, "unable to deregister app: not registered");
            return;
        };

        for instance in &app.instances {
            self.deregister_instance(&app, instance).await;
        }
    }

    async fn heartbeat(&self) {
        debug!(applications = self.applications.len(), "starting heartbeat sweep");

        for app in self.applications.values() {
            for instance in &app.instances {
                self.metrics.heartbeat(app, instance);
                debug!(
                    environment = %app.environment,
                    app = %app.name,
                    instance = %instance.id(),
                    "sending heartbeat for instance"
                );

                if let Err(e) = self.client.heartbeat_instance(&app.environment, instance).await {
                    error!(
                        environment = %app.environment,
                        app = %app.name,
                        instance = %instance.id(),
                        error = %e,
                        "unable to heartbeat instance"
                    );
                    self.metrics.heartbeat_failure(app, instance);
                }
            }
        }
    }

    async fn register_instance(&self, app: &Application, instance: &Instance) -> bool {
        self.metrics.registration(app, instance);
        info!(
            environment = %app.environment,
            app = %app.name,
            instance = %instance.id(),
            "registering instance"
        );

        match self.client.register_instance(&app.environment, instance).await {
            Ok(()) => true,
            Err(e) => {
                error!(
                    environment = %app.environment,
                    app = %app.name,
                    instance = %instance.id(),
                    error = %e,
                    "unable to register instance"
                );
                self.metrics.registration_failure(app, instance);
                false
            }
        }
    }

    async fn deregister_instance(&self, app: &Application, instance: &Instance) {
        self.metrics.deregistration(app, instance);
        info!(
            environment = %app.environment,
            app = %app.name,
            instance = %instance.id(),
            "deregistering instance"
        );

        if let Err(e) = self.client.deregister_instance(&app.environment, instance).await {
            error!(
                environment = %app.environment,
                app = %app.name,
                instance = %instance.id(),
                error = %e,
                "unable to deregister instance"
            );
            self.metrics.deregistration_failure(app, instance);
        }
    }
}
