//! Kubernetes API types for the Eureka controller
//!
//! This library defines the custom resources published to Eureka:
//! - EurekaApplication: an application whose instances come from an Ingress

pub mod v1alpha1;

pub use v1alpha1::EurekaApplication;
