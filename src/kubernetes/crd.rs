// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! CRD availability checking utilities

use crate::constants::crd::{GROUP, POLL_INTERVAL_SECS, POLL_MAX_INTERVAL_SECS};
use crate::error::Result;
use crate::types::run::Run;
use kube::{discovery::Discovery, Client, Resource};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Wait for the Run CRD to become available in the cluster.
/// This uses exponential backoff starting at POLL_INTERVAL_SECS seconds.
pub async fn wait_for_run_crd(client: &Client) -> Result<()> {
    let mut interval = POLL_INTERVAL_SECS;
    let api_version = Run::api_version(&());

    loop {
        match check_run_crd_exists(client).await {
            Ok(true) => {
                info!("Run CRD ({}) is available", api_version);
                return Ok(());
            }
            Ok(false) => {
                info!(
                    "Run CRD ({}) not yet available, waiting {} seconds...",
                    api_version, interval
                );
            }
            Err(e) => {
                warn!(
                    "Error checking for Run CRD: {}, retrying in {} seconds...",
                    e, interval
                );
            }
        }

        sleep(Duration::from_secs(interval)).await;

        interval = next_interval(interval);
    }
}

/// Exponential backoff with max cap
fn next_interval(interval: u64) -> u64 {
    (interval * 2).min(POLL_MAX_INTERVAL_SECS)
}

/// Check if the Run CRD exists by attempting to discover it.
pub async fn check_run_crd_exists(client: &Client) -> Result<bool> {
    let discovery = Discovery::new(client.clone())
        .filter(&[GROUP])
        .run()
        .await?;

    let version = Run::version(&());
    let kind = Run::kind(&());

    for group in discovery.groups() {
        if group.name() == GROUP {
            for (ar, _) in group.recommended_resources() {
                if ar.kind == kind && ar.version == version {
                    return Ok(true);
                }
            }
        }
    }

    Ok(false)
}
