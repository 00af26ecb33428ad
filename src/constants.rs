// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Default agent name, used as the event reporter
pub const CONTROLLER_NAME: &str = "cel-task-controller";

/// Reference the controller accepts when none is configured
pub mod run_ref {
    pub const API_VERSION: &str = "cel.example.dev/v0";
    pub const KIND: &str = "Approval";
}

/// Kubernetes event reasons and actions emitted by the controller
pub mod events {
    pub const REASON_RUN_RECONCILED: &str = "RunReconciled";
    pub const ACTION_RECONCILE: &str = "Reconcile";
}

/// Condition types and statuses read from Run status
pub mod conditions {
    pub const SUCCEEDED: &str = "Succeeded";
    pub const STATUS_UNKNOWN: &str = "Unknown";
}

/// CRD polling configuration
pub mod crd {
    /// API group serving the Run resource
    pub const GROUP: &str = "tekton.dev";
    /// Initial polling interval in seconds when waiting for CRD
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// Maximum polling interval in seconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_SECS: u64 = 60;
}

/// Delay before a failed reconciliation is retried
pub const ERROR_REQUEUE_SECS: u64 = 60;
