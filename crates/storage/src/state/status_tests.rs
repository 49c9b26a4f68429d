// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::store::MemoryStore;
use sb_core::RunId;

#[test]
fn missing_status_reads_as_idle() {
    let store = MemoryStore::new();
    let status = read(&store).unwrap();
    assert!(!status.in_progress);
    assert!(status.run_id.is_none());
}

#[test]
fn write_then_read_round_trips() {
    let store = MemoryStore::new();
    let status = RunStatus::started(RunId::generate(), 99);
    write(&store, &status).unwrap();
    assert_eq!(read(&store).unwrap(), status);
}

#[test]
fn reset_forces_idle_regardless_of_state() {
    let store = MemoryStore::new();
    write(&store, &RunStatus::started(RunId::generate(), 99)).unwrap();
    reset(&store).unwrap();
    let status = read(&store).unwrap();
    assert!(!status.in_progress);
}

#[test]
fn mark_aggregation_started_preserves_run() {
    let store = MemoryStore::new();
    let run_id = RunId::generate();
    write(&store, &RunStatus::started(run_id.clone(), 99)).unwrap();
    mark_aggregation_started(&store).unwrap();
    let status = read(&store).unwrap();
    assert!(status.aggregation_started);
    assert!(status.in_progress);
    assert_eq!(status.run_id, Some(run_id));
}

#[test]
fn mark_done_clears_only_in_progress() {
    let store = MemoryStore::new();
    let run_id = RunId::generate();
    write(&store, &RunStatus::started(run_id.clone(), 99)).unwrap();
    mark_done(&store).unwrap();
    let status = read(&store).unwrap();
    assert!(!status.in_progress);
    assert_eq!(status.run_id, Some(run_id));
}
