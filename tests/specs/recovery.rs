//! Recovery specs: operator reset and the periodic sweep

use crate::prelude::*;
use sb_core::{Clock, OutcomeRecord};
use sb_storage::outcomes;

#[tokio::test]
async fn reset_unblocks_a_stuck_run() {
    let p = pipeline();
    seed_config(&p, explicit(&["t1"]));
    p.scan.add_finding(finding("f-1", "t1", "SQL Injection", Severity::High));

    // Launch but never deliver anything, as if the aggregation chain died
    p.runtime.launch_manual(100).await.unwrap();
    assert!(p.runtime.current_status().unwrap().in_progress);

    p.runtime.reset().unwrap();
    assert!(!p.runtime.current_status().unwrap().in_progress);

    // A fresh launch goes through normally
    p.queue.drain();
    p.runtime.launch_manual(100).await.unwrap();
    drain(&p).await;
    assert_eq!(p.tickets.created().len(), 1);
    assert!(!p.runtime.current_status().unwrap().in_progress);
}

#[tokio::test]
async fn sweep_clears_outcomes_abandoned_by_a_dead_run() {
    let p = pipeline();
    let launched_at = p.clock.epoch_ms();
    for index in 0..5 {
        let record = OutcomeRecord {
            run_id: "run-dead".into(),
            target_id: "t1".into(),
            finding_id: format!("f-{index}").as_str().into(),
            occurred_at_ms: launched_at,
            succeeded: true,
            run_kind: RunKind::Scheduled,
            batch: 0,
            error_detail: None,
        };
        outcomes::append(&*p.store, &record).unwrap();
    }

    // Within retention nothing is touched
    assert_eq!(p.runtime.run_periodic_sweep().await.unwrap(), 0);
    assert_eq!(p.store.entity_len(keys::OUTCOME_ENTITY), 5);

    // Past retention the records go
    p.clock.advance_secs(13 * 60 * 60);
    assert_eq!(p.runtime.run_periodic_sweep().await.unwrap(), 5);
    assert_eq!(p.store.entity_len(keys::OUTCOME_ENTITY), 0);
}

#[tokio::test]
async fn sweep_leaves_live_run_outcomes_alone() {
    let p = pipeline();
    seed_config(&p, explicit(&["t1"]));
    p.scan.add_finding(finding("f-1", "t1", "SQL Injection", Severity::High));
    p.runtime.launch_manual(100).await.unwrap();
    drain(&p).await;

    // The run consumed its own records; seed one fresh record to stand in
    // for a run that is still mid-flight
    let record = OutcomeRecord {
        run_id: "run-live".into(),
        target_id: "t1".into(),
        finding_id: "f-live".into(),
        occurred_at_ms: p.clock.epoch_ms(),
        succeeded: true,
        run_kind: RunKind::Manual,
        batch: 0,
        error_detail: None,
    };
    outcomes::append(&*p.store, &record).unwrap();

    assert_eq!(p.runtime.run_periodic_sweep().await.unwrap(), 0);
    assert_eq!(p.store.entity_len(keys::OUTCOME_ENTITY), 1);
}
