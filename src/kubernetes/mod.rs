// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for CRD discovery.

pub mod crd;

pub use crd::{check_run_crd_exists, wait_for_run_crd};
