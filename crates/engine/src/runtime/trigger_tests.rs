// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::runtime::test_support::harness;
use sb_core::{ScheduleConfig, ScheduleFrequency, WorkMessage};

// The default fake-clock epoch is 2023-11-14T22:13:20Z, a Tuesday.

fn hourly(minute: u32) -> ScheduleConfig {
    ScheduleConfig {
        frequency: ScheduleFrequency::Hourly,
        hour: 0,
        minute,
        weekday: None,
        day_of_month: None,
        max_items: 100,
    }
}

#[tokio::test]
async fn no_schedule_is_a_no_op() {
    let h = harness();
    h.runtime.run_scheduled_trigger().await.unwrap();
    assert!(h.queue.is_empty());
}

#[tokio::test]
async fn hourly_schedule_arms_timer_with_residual_minutes() {
    let h = harness();
    h.runtime.save_schedule(&hourly(40)).unwrap();

    h.runtime.run_scheduled_trigger().await.unwrap();

    let subs = h.queue.submissions();
    assert_eq!(subs.len(), 1);
    let (message, delay) = &subs[0];
    assert_eq!(*delay, 0);
    match message {
        WorkMessage::Timer(timer) => {
            // 22:13 now, configured minute 40
            assert_eq!(timer.remaining_delay, 27 * 60);
            assert_eq!(timer.max_items, 100);
        }
        other => panic!("expected timer message, got {other:?}"),
    }
}

#[tokio::test]
async fn hourly_schedule_at_the_current_minute_fires_immediately() {
    let h = harness();
    h.runtime.save_schedule(&hourly(13)).unwrap();

    h.runtime.run_scheduled_trigger().await.unwrap();

    let subs = h.queue.submissions();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].0.remaining_delay(), 0);
}

#[tokio::test]
async fn daily_schedule_outside_the_hour_does_not_fire() {
    let h = harness();
    let schedule = ScheduleConfig {
        frequency: ScheduleFrequency::Daily,
        hour: 3,
        minute: 0,
        weekday: None,
        day_of_month: None,
        max_items: 100,
    };
    h.runtime.save_schedule(&schedule).unwrap();

    h.runtime.run_scheduled_trigger().await.unwrap();
    assert!(h.queue.is_empty());
}

#[tokio::test]
async fn daily_schedule_within_the_hour_fires() {
    let h = harness();
    let schedule = ScheduleConfig {
        frequency: ScheduleFrequency::Daily,
        hour: 22,
        minute: 40,
        weekday: None,
        day_of_month: None,
        max_items: 250,
    };
    h.runtime.save_schedule(&schedule).unwrap();

    h.runtime.run_scheduled_trigger().await.unwrap();

    let subs = h.queue.submissions();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].0.remaining_delay(), 27 * 60);
}

#[tokio::test]
async fn weekly_schedule_on_the_wrong_weekday_does_not_fire() {
    let h = harness();
    let schedule = ScheduleConfig {
        frequency: ScheduleFrequency::Weekly,
        hour: 22,
        minute: 40,
        // Sunday; the fake clock says Tuesday
        weekday: Some(0),
        day_of_month: None,
        max_items: 100,
    };
    h.runtime.save_schedule(&schedule).unwrap();

    h.runtime.run_scheduled_trigger().await.unwrap();
    assert!(h.queue.is_empty());
}
