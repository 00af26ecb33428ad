// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use kube::Client;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cel_task_controller::config::Config;
use cel_task_controller::events::RecorderPublisher;
use cel_task_controller::kubernetes::wait_for_run_crd;
use cel_task_controller::reconcilers::RunReconciler;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "Starting {}: ref={} {}, namespace={}",
        config.controller_name,
        config.ref_api_version,
        config.ref_kind,
        config.watch_namespace.as_deref().unwrap_or("<all>")
    );

    let client = Client::try_default()
        .await
        .context("Failed to create Kubernetes client")?;
    info!("Connected to Kubernetes cluster");

    info!("Waiting for Run CRD to become available...");
    wait_for_run_crd(&client).await?;

    let publisher = Arc::new(RecorderPublisher::new(client.clone(), &config));
    let reconciler = RunReconciler::new(client, config, publisher);

    reconciler.run().await?;

    info!("Controller shut down");
    Ok(())
}
