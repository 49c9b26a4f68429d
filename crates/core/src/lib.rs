// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sb-core: Core types for the Scan Bridge import pipeline

pub mod clock;
pub mod config;
pub mod delay;
pub mod filter;
pub mod finding;
pub mod id;
pub mod message;
pub mod records;
pub mod schedule;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{
    ConfigError, Credentials, ImportFilterConfig, ScheduleConfig, ScheduleFrequency, Severity,
    TargetSelection,
};
pub use delay::{plan, ChainStep, MAX_QUEUE_DELAY_SECS};
pub use filter::or_clause;
pub use finding::Finding;
pub use id::{FindingId, OutcomeKey, PolicyId, RunId, TargetId, TicketRef};
pub use message::{AggregateMsg, Destination, ItemMsg, TargetMsg, TimerMsg, WorkMessage};
pub use records::{OutcomeRecord, RunKind, RunStatus, RunSummary};
pub use schedule::minutes_until_fire;
