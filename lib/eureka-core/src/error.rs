use thiserror::Error;

/// Boxed source error for transport failures that carry no status code
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by a [`RegistryClient`](crate::RegistryClient)
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("cannot find eureka connection for environment \"{0}\"")]
    UnknownEnvironment(String),

    #[error("invalid status code received: {status}")]
    Remote { status: u16, body: String },

    #[error(transparent)]
    Transport(BoxError),
}

impl RegistryError {
    /// Remote status code, when the registry answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            RegistryError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unknown_environment(&self) -> bool {
        matches!(self, RegistryError::UnknownEnvironment(_))
    }
}

/// Errors surfaced by the synchronizer hand-off
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("synchronizer is stopped")]
    Stopped,
}

/// Startup configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration variable {0} is not set")]
    Missing(String),

    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no registry environments configured")]
    NoEnvironments,

    #[error("environment \"{0}\" has no registry addresses")]
    NoAddresses(String),

    #[error("invalid registry address \"{address}\" for environment \"{environment}\": {reason}")]
    InvalidAddress {
        environment: String,
        address: String,
        reason: String,
    },

    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}
