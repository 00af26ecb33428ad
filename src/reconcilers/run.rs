// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Run reconciler - watches Runs for one custom task reference and reports on unfinished ones.

use crate::config::Config;
use crate::constants::{events::REASON_RUN_RECONCILED, ERROR_REQUEUE_SECS};
use crate::error::{ControllerError, Result};
use crate::events::{EventPublisher, ReconcileEvent};
use crate::filter::RunRefFilter;
use crate::types::run::Run;
use futures::{future, Stream, StreamExt, TryStreamExt};
use kube::{
    runtime::{controller::Action, reflector, watcher, Controller, WatchStreamExt},
    Api, Client, Resource,
};
use kube_runtime::watcher::Config as WatcherConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

pub struct RunReconciler {
    client: Client,
    config: Config,
    publisher: Arc<dyn EventPublisher>,
}

impl RunReconciler {
    pub fn new(client: Client, config: Config, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            client,
            config,
            publisher,
        }
    }

    fn runs_api(&self) -> Api<Run> {
        match self.config.watch_namespace.as_deref() {
            Some(namespace) => Api::namespaced(self.client.clone(), namespace),
            None => Api::all(self.client.clone()),
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let runs = self.runs_api();
        let filter = RunRefFilter::new(&self.config.ref_api_version, &self.config.ref_kind);

        info!(
            "Watching Runs referencing {} {}",
            self.config.ref_api_version, self.config.ref_kind
        );

        let (reader, writer) = reflector::store();
        let stream = accepted_runs(
            watcher(runs, WatcherConfig::default())
                .default_backoff()
                .reflect(writer)
                .applied_objects(),
            filter,
        );

        let context = Arc::new(self);

        Controller::for_stream(stream, reader)
            .shutdown_on_signal()
            .run(reconcile, error_policy, context)
            .for_each(|res| async move {
                match res {
                    Ok(o) => debug!("Reconciled run: {:?}", o),
                    Err(e) => warn!("Reconciliation error: {:?}", e),
                }
            })
            .await;

        Ok(())
    }
}

/// Narrow a stream of applied Runs to those the filter accepts.
///
/// Watch errors pass through untouched so the controller can back off.
pub fn accepted_runs<S>(
    runs: S,
    filter: RunRefFilter,
) -> impl Stream<Item = std::result::Result<Run, watcher::Error>> + Send + 'static
where
    S: Stream<Item = std::result::Result<Run, watcher::Error>> + Send + 'static,
{
    runs.try_filter(move |run| future::ready(filter.accepts_run(run)))
}

/// Decide what a reconciliation of `run` should report.
///
/// Finished Runs produce nothing; unfinished ones produce a single
/// `Normal` event naming the Run.
pub fn reconcile_run(run: &Run) -> Option<ReconcileEvent> {
    if run.is_done() {
        info!("Run is finished, done reconciling");
        return None;
    }

    Some(ReconcileEvent::normal(
        REASON_RUN_RECONCILED,
        format!("Run reconciled: \"{}\"", run.key()),
    ))
}

#[instrument(skip(run, ctx), fields(run = %run.key()))]
async fn reconcile(run: Arc<Run>, ctx: Arc<RunReconciler>) -> Result<Action> {
    info!("Reconciling {}", run.key());

    if let Some(event) = reconcile_run(&run) {
        // A lost event is not worth a retry
        if let Err(e) = ctx.publisher.publish(&run.object_ref(&()), &event).await {
            warn!("Failed to record event for {}: {}", run.key(), e);
        }
    }

    Ok(Action::await_change())
}

fn error_policy(run: Arc<Run>, error: &ControllerError, _ctx: Arc<RunReconciler>) -> Action {
    error!("Reconciliation error for {}: {}", run.key(), error);
    Action::requeue(Duration::from_secs(ERROR_REQUEUE_SECS))
}
