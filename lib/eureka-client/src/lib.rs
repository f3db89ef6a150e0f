//! Eureka registry integration
pub mod client;
pub mod connection;
mod wire;

pub use client::{EurekaClient, DEFAULT_REQUEST_TIMEOUT};
pub use connection::EurekaConnection;
