//! Scheduled import specs
//!
//! The hourly trigger arms a timer for the residual minutes; the timer
//! launches the run when it fires.

use crate::prelude::*;
use sb_core::{ScheduleConfig, ScheduleFrequency};

// The default fake-clock epoch is 2023-11-14T22:13:20Z.

#[tokio::test]
async fn schedule_fires_through_trigger_timer_and_pipeline() {
    let p = pipeline();
    seed_config(&p, explicit(&["t1"]));
    p.scan.add_finding(finding("f-1", "t1", "SQL Injection", Severity::High));
    p.scan.add_finding(finding("f-2", "t1", "XSS", Severity::Medium));
    let schedule = ScheduleConfig {
        frequency: ScheduleFrequency::Hourly,
        hour: 0,
        minute: 13,
        weekday: None,
        day_of_month: None,
        max_items: 50,
    };
    p.runtime.save_schedule(&schedule).unwrap();

    p.runtime.run_scheduled_trigger().await.unwrap();
    drain(&p).await;

    assert_eq!(p.tickets.created().len(), 2);
    let history = p.runtime.history(10, None).unwrap();
    assert_eq!(history.summaries.len(), 1);
    assert_eq!(history.summaries[0].run_kind, RunKind::Scheduled);
    assert!(history.summaries[0].overall_success);

    // Scheduled runs never touch the live-run status
    let status = p.runtime.current_status().unwrap();
    assert!(!status.in_progress);
    assert!(!status.aggregation_started);
    assert!(status.run_id.is_none());

    assert_eq!(p.store.entity_len(keys::OUTCOME_ENTITY), 0);
}

#[tokio::test]
async fn residual_minutes_delay_the_launch_but_not_the_result() {
    let p = pipeline();
    seed_config(&p, explicit(&["t1"]));
    p.scan.add_finding(finding("f-1", "t1", "SQL Injection", Severity::High));
    let schedule = ScheduleConfig {
        frequency: ScheduleFrequency::Hourly,
        hour: 0,
        // 27 minutes from the fake clock's 22:13
        minute: 40,
        weekday: None,
        day_of_month: None,
        max_items: 50,
    };
    p.runtime.save_schedule(&schedule).unwrap();

    p.runtime.run_scheduled_trigger().await.unwrap();
    // The armed timer carries the residual delay as a chain
    assert_eq!(p.queue.submissions()[0].0.remaining_delay(), 27 * 60);

    drain(&p).await;

    assert_eq!(p.tickets.created().len(), 1);
    assert_eq!(p.runtime.history(10, None).unwrap().summaries.len(), 1);
}

#[tokio::test]
async fn trigger_outside_the_window_imports_nothing() {
    let p = pipeline();
    seed_config(&p, explicit(&["t1"]));
    p.scan.add_finding(finding("f-1", "t1", "SQL Injection", Severity::High));
    let schedule = ScheduleConfig {
        frequency: ScheduleFrequency::Daily,
        hour: 3,
        minute: 0,
        weekday: None,
        day_of_month: None,
        max_items: 50,
    };
    p.runtime.save_schedule(&schedule).unwrap();

    p.runtime.run_scheduled_trigger().await.unwrap();
    drain(&p).await;

    assert!(p.tickets.created().is_empty());
    assert!(p.runtime.history(10, None).unwrap().summaries.is_empty());
}
