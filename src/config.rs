// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{run_ref, CONTROLLER_NAME};
use crate::error::{ControllerError, Result};
use std::env;

/// Controller configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Agent name reported on emitted events
    pub controller_name: String,
    /// API version a Run's reference must carry to be reconciled
    pub ref_api_version: String,
    /// Kind a Run's reference must carry to be reconciled
    pub ref_kind: String,
    /// Only watch Runs in this namespace; all namespaces when unset
    pub watch_namespace: Option<String>,
    /// Reporter instance for emitted events, usually the pod name
    pub instance: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let controller_name = required(&lookup, "CONTROLLER_NAME", CONTROLLER_NAME)?;
        let ref_api_version = required(&lookup, "RUN_REF_API_VERSION", run_ref::API_VERSION)?;
        let ref_kind = required(&lookup, "RUN_REF_KIND", run_ref::KIND)?;

        Ok(Config {
            controller_name,
            ref_api_version,
            ref_kind,
            watch_namespace: non_empty("WATCH_NAMESPACE"),
            instance: non_empty("POD_NAME"),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            controller_name: CONTROLLER_NAME.to_string(),
            ref_api_version: run_ref::API_VERSION.to_string(),
            ref_kind: run_ref::KIND.to_string(),
            watch_namespace: None,
            instance: None,
        }
    }
}

/// Read a variable that falls back to a default when unset, but may not be blank
fn required<F>(lookup: &F, key: &str, default: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default.to_string()),
        Some(v) if v.trim().is_empty() => Err(ControllerError::InvalidConfig(format!(
            "{} must not be empty",
            key
        ))),
        Some(v) => Ok(v),
    }
}
