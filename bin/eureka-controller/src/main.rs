use anyhow::{Context, Result};
use eureka_api::EurekaApplication;
use eureka_client::EurekaClient;
use eureka_core::{SyncMetrics, Synchronizer, SynchronizerConfig};
use kube::{Client, CustomResourceExt};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod controller;
mod handler;
mod server;

use config::{ControllerConfig, LogFormat};
use controller::EurekaApplicationController;

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--print-crd") {
        print!("{}", serde_yaml::to_string(&EurekaApplication::crd())?);
        return Ok(());
    }

    init_tracing(LogFormat::from_env());

    info!("Starting eureka-controller...");

    let config = ControllerConfig::from_env().context("invalid controller configuration")?;
    info!(
        environments = ?config.registry.environment_names().collect::<Vec<_>>(),
        default_environment = %config.default_environment,
        "Loaded registry configuration"
    );

    let registry = EurekaClient::with_timeout(&config.registry, config.request_timeout)
        .context("failed to build eureka client")?;
    let metrics = SyncMetrics::new()?;

    let synchronizer = Synchronizer::with_config(
        Arc::new(registry),
        metrics.clone(),
        SynchronizerConfig {
            heartbeat_interval: config.heartbeat_interval,
            ..Default::default()
        },
    )
    .start();

    let listener = TcpListener::bind(config.metrics_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.metrics_addr))?;
    info!("Metrics server listening on {}", config.metrics_addr);
    tokio::spawn(async move {
        if let Err(e) = server::serve(listener, metrics).await {
            error!("Metrics server error: {}", e);
        }
    });

    let client = Client::try_default().await?;
    let controller = EurekaApplicationController::new(
        client,
        synchronizer.clone(),
        config.default_environment.clone(),
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
        }
        info!("Shutdown signal received, stopping...");
    };

    if let Err(e) = controller.run(shutdown).await {
        error!("EurekaApplication controller error: {}", e);
    }

    synchronizer.stop().await;
    info!("eureka-controller stopped");

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}
