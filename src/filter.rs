// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Reference filter deciding which Runs the controller cares about.

use crate::types::run::Run;
use kube::api::DynamicObject;
use kube::Resource;

/// Accepts Runs whose reference names a specific API version and kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRefFilter {
    api_version: String,
    kind: String,
}

impl RunRefFilter {
    pub fn new(api_version: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            api_version: api_version.into(),
            kind: kind.into(),
        }
    }

    /// Check a typed Run; Runs without a reference never match
    pub fn accepts_run(&self, run: &Run) -> bool {
        let Some(task_ref) = run.spec.task_ref.as_ref() else {
            return false;
        };

        task_ref.api_version.as_deref().unwrap_or_default() == self.api_version
            && task_ref.kind.as_deref().unwrap_or_default() == self.kind
    }

    /// Check an arbitrary object, rejecting anything that isn't a Run.
    ///
    /// Untyped entry point for callers holding a [`DynamicObject`], e.g. a
    /// dynamic watch across several kinds. The controller's own watch is
    /// typed and goes through [`RunRefFilter::accepts_run`].
    pub fn accepts(&self, obj: &DynamicObject) -> bool {
        let Some(types) = obj.types.as_ref() else {
            return false;
        };
        if types.api_version != Run::api_version(&()) || types.kind != Run::kind(&()) {
            return false;
        }

        serde_json::to_value(obj)
            .and_then(serde_json::from_value::<Run>)
            .is_ok_and(|run| self.accepts_run(&run))
    }
}
