//! Core Eureka synchronization functionality
//!
//! This library provides:
//! - Instance and application value types
//! - The registry client contract the synchronizer depends on
//! - A single-task synchronizer that owns the registration belief-state
//! - Prometheus counters for registry operations

pub mod client;
pub mod config;
pub mod diff;
pub mod error;
pub mod instance;
pub mod metrics;
pub mod synchronizer;

pub use client::RegistryClient;
pub use config::RegistryConfig;
pub use error::{BoxError, ConfigError, RegistryError, SyncError};
pub use instance::{Application, Instance, InstanceStatus, Port};
pub use metrics::SyncMetrics;
pub use synchronizer::{Synchronizer, SynchronizerConfig, SynchronizerHandle};
