// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes Event emission for reconcile outcomes.

use crate::config::Config;
use crate::constants::events::ACTION_RECONCILE;
use crate::error::{ControllerError, Result};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::ObjectReference;
use kube::runtime::events::{Event, EventType, Recorder, Reporter};
use kube::Client;
use tracing::{debug, instrument};

/// Severity of an emitted event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Normal => "Normal",
        }
    }
}

impl From<Severity> for EventType {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Normal => EventType::Normal,
        }
    }
}

/// An event the reconcile step asks to have recorded against a Run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileEvent {
    pub severity: Severity,
    pub reason: String,
    pub action: String,
    pub message: String,
}

impl ReconcileEvent {
    pub fn normal(reason: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Normal,
            reason: reason.to_string(),
            action: ACTION_RECONCILE.to_string(),
            message: message.into(),
        }
    }

    pub fn into_kube_event(self) -> Event {
        Event {
            type_: self.severity.into(),
            reason: self.reason,
            note: Some(self.message),
            action: self.action,
            secondary: None,
        }
    }
}

/// Sink for events produced by reconciliation
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, reference: &ObjectReference, event: &ReconcileEvent) -> Result<()>;
}

/// Publishes events to the API server through a kube [`Recorder`]
pub struct RecorderPublisher {
    recorder: Recorder,
}

impl RecorderPublisher {
    pub fn new(client: Client, config: &Config) -> Self {
        let reporter = Reporter {
            controller: config.controller_name.clone(),
            instance: config.instance.clone(),
        };
        Self {
            recorder: Recorder::new(client, reporter),
        }
    }
}

#[async_trait]
impl EventPublisher for RecorderPublisher {
    #[instrument(skip(self, reference, event), fields(reason = %event.reason))]
    async fn publish(&self, reference: &ObjectReference, event: &ReconcileEvent) -> Result<()> {
        debug!(
            "Publishing {} event for {}/{}",
            event.severity.as_str(),
            reference.namespace.as_deref().unwrap_or_default(),
            reference.name.as_deref().unwrap_or_default()
        );

        self.recorder
            .publish(&event.clone().into_kube_event(), reference)
            .await
            .map_err(|e| ControllerError::EventPublishError(e.to_string()))
    }
}

/// Test publisher that keeps every event in memory
#[cfg(test)]
#[derive(Default)]
pub struct RecordingPublisher {
    pub published: std::sync::Mutex<Vec<(ObjectReference, ReconcileEvent)>>,
    pub fail: bool,
}

#[cfg(test)]
#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, reference: &ObjectReference, event: &ReconcileEvent) -> Result<()> {
        self.published
            .lock()
            .unwrap()
            .push((reference.clone(), event.clone()));
        if self.fail {
            return Err(ControllerError::EventPublishError("rejected".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::events::REASON_RUN_RECONCILED;

    #[test]
    fn test_normal_event_fields() {
        let event = ReconcileEvent::normal(REASON_RUN_RECONCILED, "Run reconciled: \"ns1/run1\"");

        assert_eq!(event.severity, Severity::Normal);
        assert_eq!(event.severity.as_str(), "Normal");
        assert_eq!(event.reason, "RunReconciled");
        assert_eq!(event.action, "Reconcile");
        assert_eq!(event.message, "Run reconciled: \"ns1/run1\"");
    }

    #[test]
    fn test_into_kube_event() {
        let event = ReconcileEvent::normal(REASON_RUN_RECONCILED, "Run reconciled: \"ns1/run1\"")
            .into_kube_event();

        assert!(matches!(event.type_, EventType::Normal));
        assert_eq!(event.reason, "RunReconciled");
        assert_eq!(event.action, "Reconcile");
        assert_eq!(event.note.as_deref(), Some("Run reconciled: \"ns1/run1\""));
        assert!(event.secondary.is_none());
    }

    #[tokio::test]
    async fn test_recorder_publisher_builds_offline() {
        let config = Config {
            instance: Some("pod-0".to_string()),
            ..Config::default()
        };
        let client = crate::test_utils::MockService::new().into_client();

        // Construction must not contact the API server
        let _publisher = RecorderPublisher::new(client, &config);
    }
}
