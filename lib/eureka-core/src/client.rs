//! Registry client contract used by the synchronizer

use crate::{Application, Instance, RegistryError};
use async_trait::async_trait;

/// Operations against one or more registry connection sets, each addressed
/// by an environment key.
///
/// Implementations resolve the environment before doing any I/O and return
/// [`RegistryError::UnknownEnvironment`] for keys they do not know. They hold
/// no state beyond their connections and never cache or retry.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    async fn register_instance(
        &self,
        environment: &str,
        instance: &Instance,
    ) -> Result<(), RegistryError>;

    async fn deregister_instance(
        &self,
        environment: &str,
        instance: &Instance,
    ) -> Result<(), RegistryError>;

    async fn heartbeat_instance(
        &self,
        environment: &str,
        instance: &Instance,
    ) -> Result<(), RegistryError>;

    /// Look up an application by registry name
    async fn get_application(
        &self,
        environment: &str,
        name: &str,
    ) -> Result<Application, RegistryError>;
}
