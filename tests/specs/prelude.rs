//! Shared fixtures for the pipeline specs

pub use sb_adapters::fake::{FakeQueue, FakeScanService, FakeTicketService};
pub use sb_core::{
    Credentials, FakeClock, Finding, FindingId, ImportFilterConfig, RunKind, Severity, TargetId,
    TargetSelection, WorkMessage,
};
pub use sb_engine::Runtime;
pub use sb_storage::{keys, MemoryStore};

use std::collections::BTreeMap;
use std::sync::Arc;

pub struct Pipeline {
    pub store: Arc<MemoryStore>,
    pub scan: FakeScanService,
    pub tickets: FakeTicketService,
    pub queue: FakeQueue,
    pub clock: FakeClock,
    pub runtime: Runtime<FakeScanService, FakeTicketService, FakeQueue, FakeClock>,
}

pub fn pipeline() -> Pipeline {
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
    Pipeline { store, scan, tickets, queue, clock, runtime }
}

pub fn explicit(ids: &[&str]) -> TargetSelection {
    TargetSelection::Explicit(ids.iter().map(|id| (*id).into()).collect())
}

/// A valid filter configuration covering Critical through Low
pub fn filter_config(targets: TargetSelection) -> ImportFilterConfig {
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

pub fn seed_config(p: &Pipeline, targets: TargetSelection) {
    p.runtime.save_filter_config(&filter_config(targets)).unwrap();
    p.runtime
        .save_credentials(&Credentials {
            url: "https://scan.test".to_string(),
            key_id: "key-1".to_string(),
            key_secret: "secret-1".to_string(),
        })
        .unwrap();
}

pub fn finding(id: &str, target: &str, issue_type: &str, severity: Severity) -> Finding {
    Finding {
        id: FindingId::new(id),
        target_id: TargetId::new(target),
        severity,
        issue_type: issue_type.to_string(),
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
/// clock to each message's due time, until the queue stays empty. This is
/// the platform's delivery loop in miniature.
pub async fn drain(p: &Pipeline) {
    let mut now: u64 = 0;
    let mut seq: usize = 0;
    let mut pending: Vec<(u64, usize, WorkMessage)> = Vec::new();
    for (message, delay) in p.queue.drain() {
        pending.push((now + delay, seq, message));
        seq += 1;
    }
    while !pending.is_empty() {
        pending.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        let (due, _, message) = pending.remove(0);
        if due > now {
            p.clock.advance_secs(due - now);
            now = due;
        }
        p.runtime.handle(message).await.unwrap();
        for (message, delay) in p.queue.drain() {
            pending.push((now + delay, seq, message));
            seq += 1;
        }
    }
}
