/// API version v1alpha1 for Eureka controller CRDs

pub mod eureka_application;

pub use eureka_application::{
    EurekaApplication, EurekaApplicationSpec, EurekaApplicationStatus, EurekaPaths,
};

/// API group for Eureka controller resources
pub const API_GROUP: &str = "discovery.datum.net";
/// API version for Eureka controller resources
pub const API_VERSION: &str = "v1alpha1";
