//! Manual import specs
//!
//! Operator-launched runs from launch through fan-out, ticket creation,
//! aggregation, and cleanup.

use crate::prelude::*;

#[tokio::test]
async fn manual_import_creates_tickets_and_records_history() {
    let p = pipeline();
    seed_config(&p, explicit(&["t1", "t2"]));
    p.scan.add_finding(finding("f-1", "t1", "SQL Injection", Severity::High));
    p.scan.add_finding(finding("f-2", "t1", "XSS", Severity::Medium));
    p.scan.add_finding(finding("f-3", "t1", "CSRF", Severity::Low));
    p.scan.add_finding(finding("f-4", "t2", "Open Redirect", Severity::Medium));
    p.scan.add_finding(finding("f-5", "t2", "Path Traversal", Severity::Critical));

    // f-1 got a ticket in some earlier run; it must be skipped
    p.scan.mark_linked(&FindingId::new("f-1"), "SEC-99");

    let receipt = p.runtime.launch_manual(100).await.unwrap();
    assert_eq!(receipt.targets, 2);
    assert!(p.runtime.current_status().unwrap().in_progress);

    drain(&p).await;

    // Four unlinked findings, four tickets
    let created = p.tickets.created();
    assert_eq!(created.len(), 4);
    for ticket in &created {
        assert_eq!(ticket.properties.len(), 1);
        assert_eq!(ticket.attachments.len(), 1);
    }

    // Every created ticket was back-linked into the scanning service
    let patches = p.scan.patches();
    assert_eq!(patches.len(), 4);
    assert!(patches.iter().all(|(_, patch)| patch.external_ref.is_some()));

    let history = p.runtime.history(10, None).unwrap();
    assert_eq!(history.summaries.len(), 1);
    let summary = &history.summaries[0];
    assert_eq!(summary.run_id, receipt.run_id);
    assert_eq!(summary.run_kind, RunKind::Manual);
    assert_eq!(summary.item_count, 4);
    assert_eq!(summary.success_count, 4);
    assert_eq!(summary.failure_count, 0);
    assert!(summary.overall_success);

    // Consumed outcome records are gone and the run is finished
    assert_eq!(p.store.entity_len(keys::OUTCOME_ENTITY), 0);
    let status = p.runtime.current_status().unwrap();
    assert!(!status.in_progress);
    assert!(status.aggregation_started);
}

#[tokio::test]
async fn item_failures_are_counted_without_stopping_the_run() {
    let p = pipeline();
    seed_config(&p, explicit(&["t1"]));
    p.scan.add_finding(finding("f-1", "t1", "SQL Injection", Severity::High));
    p.scan.add_finding(finding("f-2", "t1", "XSS", Severity::Medium));
    p.scan.add_finding(finding("f-3", "t1", "CSRF", Severity::Low));
    p.tickets.fail_summaries_containing("XSS");

    p.runtime.launch_manual(100).await.unwrap();
    drain(&p).await;

    assert_eq!(p.tickets.created().len(), 2);

    let history = p.runtime.history(10, None).unwrap();
    let summary = &history.summaries[0];
    assert_eq!(summary.item_count, 3);
    assert_eq!(summary.success_count, 2);
    assert_eq!(summary.failure_count, 1);
    assert!(!summary.overall_success);

    assert!(!p.runtime.current_status().unwrap().in_progress);
}

#[tokio::test]
async fn rerunning_skips_findings_that_already_have_tickets() {
    let p = pipeline();
    seed_config(&p, explicit(&["t1"]));
    p.scan.add_finding(finding("f-1", "t1", "SQL Injection", Severity::High));
    p.scan.add_finding(finding("f-2", "t1", "XSS", Severity::Medium));

    p.runtime.launch_manual(100).await.unwrap();
    drain(&p).await;
    assert_eq!(p.tickets.created().len(), 2);

    // Second run finds nothing new: no extra tickets, no extra history
    p.runtime.launch_manual(100).await.unwrap();
    drain(&p).await;

    assert_eq!(p.tickets.created().len(), 2);
    assert_eq!(p.runtime.history(10, None).unwrap().summaries.len(), 1);
    assert!(!p.runtime.current_status().unwrap().in_progress);
}

#[tokio::test]
async fn dispatch_span_beyond_the_platform_cap_still_completes() {
    let p = pipeline();
    seed_config(&p, explicit(&["t1"]));
    for index in 0..20 {
        p.scan.add_finding(finding(
            &format!("f-{index}"),
            "t1",
            "SQL Injection",
            Severity::High,
        ));
    }

    // 4000 items per target means eight batches and a dispatch span of
    // 1040s, so the tail of the fan-out rides the delay chain.
    let receipt = p.runtime.launch_manual(4000).await.unwrap();
    assert_eq!(receipt.batches, 8);
    assert!(receipt.span_secs > 900);

    drain(&p).await;

    assert_eq!(p.tickets.created().len(), 20);
    let history = p.runtime.history(10, None).unwrap();
    assert_eq!(history.summaries.len(), 1);
    assert_eq!(history.summaries[0].item_count, 20);
    assert_eq!(p.store.entity_len(keys::OUTCOME_ENTITY), 0);
}
