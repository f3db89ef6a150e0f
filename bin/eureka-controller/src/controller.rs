//! EurekaApplication controller for reconciling EurekaApplication resources

use crate::handler::{Handler, HandlerError, FINALIZER_NAME};
use eureka_api::EurekaApplication;
use eureka_core::SynchronizerHandle;
use futures::{Future, StreamExt};
use kube::{Api, Client, Resource, ResourceExt};
use kube_runtime::controller::Action;
use kube_runtime::events::{Event as KubeEvent, EventType, Recorder, Reporter};
use kube_runtime::finalizer::{finalizer, Event};
use kube_runtime::{watcher, Controller};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Delay before retrying a failed reconcile
const ERROR_REQUEUE: Duration = Duration::from_secs(30);

/// Reporting controller name on published events
const REPORTER: &str = "eureka-controller";
const REASON_NOT_FOUND: &str = "NotFound";

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("resource {0} has no namespace")]
    MissingNamespace(String),

    #[error(transparent)]
    Finalizer(Box<kube_runtime::finalizer::Error<HandlerError>>),
}

pub struct EurekaApplicationController {
    client: Client,
    handler: Arc<Handler>,
}

impl EurekaApplicationController {
    pub fn new(client: Client, synchronizer: SynchronizerHandle, default_environment: String) -> Self {
        let handler = Arc::new(Handler::new(client.clone(), synchronizer, default_environment));
        Self { client, handler }
    }

    /// Reconcile until `shutdown` resolves
    pub async fn run(&self, shutdown: impl Future<Output = ()> + Send + Sync + 'static) -> anyhow::Result<()> {
        info!("Starting EurekaApplication reconciliation");

        let applications: Api<EurekaApplication> = Api::all(self.client.clone());

        Controller::new(applications, watcher::Config::default())
            .graceful_shutdown_on(shutdown)
            .run(reconcile, error_policy, self.handler.clone())
            .for_each(|item| async move {
                match item {
                    Ok((object, _)) => debug!("Reconciled EurekaApplication {}", object.name),
                    Err(e) => warn!("Error in reconciliation stream: {}", e),
                }
            })
            .await;

        info!("EurekaApplication reconciliation stopped");
        Ok(())
    }
}

async fn reconcile(resource: Arc<EurekaApplication>, handler: Arc<Handler>) -> Result<Action, ReconcileError> {
    let namespace = resource
        .namespace()
        .ok_or_else(|| ReconcileError::MissingNamespace(resource.name_any()))?;
    debug!("Reconciling EurekaApplication: {}/{}", namespace, resource.name_any());

    let api: Api<EurekaApplication> = Api::namespaced(handler.client().clone(), &namespace);
    let reference = resource.object_ref(&());

    let result = finalizer(&api, FINALIZER_NAME, resource, |event| async {
        match event {
            Event::Apply(resource) => handler.apply(&resource).await,
            Event::Cleanup(resource) => handler.cleanup(&resource).await,
        }
    })
    .await;

    if let Err(kube_runtime::finalizer::Error::ApplyFailed(HandlerError::NotFound { kind, name })) = &result {
        let recorder = Recorder::new(handler.client().clone(), Reporter::from(REPORTER), reference);
        if let Err(e) = recorder.publish(not_found_event(kind, name)).await {
            warn!(error = %e, "failed to publish NotFound event");
        }
    }

    result.map_err(|e| ReconcileError::Finalizer(Box::new(e)))
}

/// Warning attached to a resource whose Ingress or Service is missing
fn not_found_event(kind: &str, name: &str) -> KubeEvent {
    KubeEvent {
        type_: EventType::Warning,
        reason: REASON_NOT_FOUND.to_string(),
        note: Some(format!("Referenced object not found {}/{}", kind, name)),
        action: "Reconciling".to_string(),
        secondary: None,
    }
}

fn error_policy(resource: Arc<EurekaApplication>, error: &ReconcileError, _handler: Arc<Handler>) -> Action {
    warn!(
        resource = %resource.name_any(),
        namespace = ?resource.namespace(),
        error = %error,
        "re-queueing EurekaApplication after error"
    );
    Action::requeue(ERROR_REQUEUE)
}
