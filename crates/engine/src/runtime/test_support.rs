// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared harness for the stage worker tests

use crate::runtime::Runtime;
use sb_adapters::fake::{FakeQueue, FakeScanService, FakeTicketService};
use sb_core::{
    Credentials, FakeClock, Finding, FindingId, ImportFilterConfig, Severity, TargetId,
    TargetSelection, WorkMessage,
};
use sb_storage::MemoryStore;
use std::collections::BTreeMap;
use std::sync::Arc;

pub(crate) struct Harness {
    pub store: Arc<MemoryStore>,
    pub scan: FakeScanService,
    pub tickets: FakeTicketService,
    pub queue: FakeQueue,
    pub clock: FakeClock,
    pub runtime: Runtime<FakeScanService, FakeTicketService, FakeQueue, FakeClock>,
}

pub(crate) fn harness() -> Harness {
    let store = Arc::new(MemoryStore::new());
    let scan = FakeScanService::new();
    let tickets = FakeTicketService::new();
    let queue = FakeQueue::new();
    let clock = FakeClock::new();
    let runtime = Runtime::new(
        store.clone(),
        scan.clone(),
        tickets.clone(),
        queue.clone(),
        clock.clone(),
    );
    Harness { store, scan, tickets, queue, clock, runtime }
}

/// Harness whose runtime uses the given wall-clock budgets
pub(crate) fn harness_with_budgets(
    aggregate: std::time::Duration,
    sweep: std::time::Duration,
) -> Harness {
    let mut h = harness();
    h.runtime = Runtime::new(
        h.store.clone(),
        h.scan.clone(),
        h.tickets.clone(),
        h.queue.clone(),
        h.clock.clone(),
    )
    .with_budgets(aggregate, sweep);
    h
}

pub(crate) fn filter_config(targets: TargetSelection) -> ImportFilterConfig {
    let mut priority_map = BTreeMap::new();
    priority_map.insert(Severity::Critical, "Highest".to_string());
    priority_map.insert(Severity::High, "High".to_string());
    priority_map.insert(Severity::Medium, "Medium".to_string());
    priority_map.insert(Severity::Low, "Low".to_string());
    ImportFilterConfig {
        targets,
        statuses: vec!["Open".to_string(), "New".to_string()],
        severities: vec![Severity::Critical, Severity::High, Severity::Medium, Severity::Low],
        scan_types: vec!["DAST".to_string()],
        policy_ids: None,
        project_id: "10001".to_string(),
        issue_type_id: "10100".to_string(),
        priority_map,
    }
}

pub(crate) fn credentials() -> Credentials {
    Credentials {
        url: "https://scan.test".to_string(),
        key_id: "key-1".to_string(),
        key_secret: "secret-1".to_string(),
    }
}

/// Seed a valid filter configuration and credentials
pub(crate) fn seed_config(harness: &Harness, targets: TargetSelection) {
    harness.runtime.save_filter_config(&filter_config(targets)).unwrap();
    harness.runtime.save_credentials(&credentials()).unwrap();
}

pub(crate) fn finding(id: &str, target: &str, severity: Severity) -> Finding {
    Finding {
        id: FindingId::new(id),
        target_id: TargetId::new(target),
        severity,
        issue_type: "SQL Injection".to_string(),
        issue_type_id: "it-42".to_string(),
        location: "https://example.test/login".to_string(),
        scan_name: "nightly".to_string(),
        cwe: Some("CWE-89".to_string()),
        cvss: Some(8.1),
        discovery_method: "DAST".to_string(),
        date_created: "2026-08-01T00:00:00Z".to_string(),
        last_updated: "2026-08-20T00:00:00Z".to_string(),
        last_found: "2026-08-25T00:00:00Z".to_string(),
    }
}

/// Deliver every queued message in due-time order, advancing the fake
/// clock to each message's due time, until the queue stays empty
pub(crate) async fn drain(harness: &Harness) {
    let mut now: u64 = 0;
    let mut seq: usize = 0;
    let mut pending: Vec<(u64, usize, WorkMessage)> = Vec::new();
    for (message, delay) in harness.queue.drain() {
        pending.push((now + delay, seq, message));
        seq += 1;
    }
    while !pending.is_empty() {
        pending.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        let (due, _, message) = pending.remove(0);
        if due > now {
            harness.clock.advance_secs(due - now);
            now = due;
        }
        harness.runtime.handle(message).await.unwrap();
        for (message, delay) in harness.queue.drain() {
            pending.push((now + delay, seq, message));
            seq += 1;
        }
    }
}
