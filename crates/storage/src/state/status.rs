// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! RunStatus singleton access
//!
//! One logical writer per run is assumed: the launcher creates the record,
//! the aggregation chain for that run mutates it, and the operator reset
//! overwrites it. Reads from other workers are advisory.

use crate::keys;
use crate::store::{StateStore, StoreError};
use sb_core::RunStatus;
use tracing::debug;

/// Read the singleton status, defaulting to idle when never written
pub fn read(store: &dyn StateStore) -> Result<RunStatus, StoreError> {
    match store.get(keys::RUN_STATUS)? {
        Some(value) => Ok(serde_json::from_value(value)?),
        None => Ok(RunStatus::idle()),
    }
}

pub fn write(store: &dyn StateStore, status: &RunStatus) -> Result<(), StoreError> {
    debug!(
        in_progress = status.in_progress,
        run_id = ?status.run_id,
        aggregation_started = status.aggregation_started,
        "writing run status"
    );
    store.set(keys::RUN_STATUS, serde_json::to_value(status)?)
}

/// Operator escape hatch: force `in_progress = false` unconditionally.
/// Does not cancel already-dispatched work messages.
pub fn reset(store: &dyn StateStore) -> Result<(), StoreError> {
    write(store, &RunStatus::idle())
}

/// Read-modify-write flip of the aggregation-started flag
pub fn mark_aggregation_started(store: &dyn StateStore) -> Result<(), StoreError> {
    let mut status = read(store)?;
    status.aggregation_started = true;
    write(store, &status)
}

/// Flip `in_progress` off while keeping the rest of the record
pub fn mark_done(store: &dyn StateStore) -> Result<(), StoreError> {
    let mut status = read(store)?;
    status.in_progress = false;
    write(store, &status)
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
