// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline tuning constants
//!
//! The staggers and caps keep each worker invocation inside the platform's
//! per-invocation runtime limit and spread fan-out so the external services
//! are not hammered by hundreds of simultaneous item workers.

use std::time::Duration;

/// Most items one target batch may cover
pub const BATCH_CEILING: u32 = 500;

/// Items fanned out per delay step by the target worker
pub const CHUNK_SIZE: usize = 50;

/// Delay step between consecutive item chunks
pub const ITEM_STAGGER_SECS: u64 = 10;

/// Fixed gap added between consecutive target batches
pub const TARGET_STAGGER_SECS: u64 = 30;

/// Outcome records fetched per store query
pub const AGGREGATE_PAGE_SIZE: usize = 20;

/// Wall-clock budget for one aggregation invocation
pub const AGGREGATE_BUDGET: Duration = Duration::from_secs(40);

/// Delay before an aggregation continuation hop
pub const AGGREGATE_CONTINUATION_DELAY_SECS: u64 = 1;

/// Delay before the hop that follows the started-flag flip
pub const STARTED_FLAG_DELAY_SECS: u64 = 5;

/// Outcome records deleted per cleanup pass
pub const DELETE_PASS_CAP: usize = 250;

/// Records the periodic sweep scans per invocation
pub const SWEEP_CANDIDATE_CAP: usize = 500;

/// Page size for the sweep's full-collection scan
pub const SWEEP_PAGE_SIZE: usize = 20;

/// Age past which an unconsumed outcome record counts as abandoned
pub const SWEEP_RETENTION: Duration = Duration::from_secs(12 * 60 * 60);

/// Wall-clock budget for one sweep invocation
pub const SWEEP_BUDGET: Duration = Duration::from_secs(20);

/// Timer messages claiming more remaining delay than the trigger can arm
/// are treated as corrupt and dropped
pub const STALE_TIMER_CUTOFF_SECS: u64 = 3600;

/// Margin added to the dispatch span when estimating run completion
pub const COMPLETION_MARGIN_SECS: u64 = 30;
