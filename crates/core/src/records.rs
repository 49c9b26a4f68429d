// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted run ledger: status singleton, per-item outcomes, run summaries

use crate::id::{FindingId, RunId, TargetId};
use serde::{Deserialize, Serialize};

/// Whether a run was launched by an operator or by the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunKind {
    Manual,
    Scheduled,
}

impl std::fmt::Display for RunKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunKind::Manual => write!(f, "manual"),
            RunKind::Scheduled => write!(f, "scheduled"),
        }
    }
}

/// Singleton live-run status record.
///
/// Exactly one instance exists at a time. `in_progress` flips true when a
/// manual run is accepted and false when its aggregation completes or an
/// operator forces a reset. Never deleted, only overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStatus {
    pub in_progress: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<RunId>,
    #[serde(default)]
    pub aggregation_started: bool,
    /// Epoch ms estimate of when all dispatched work should have drained
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_completion_ms: Option<u64>,
}

impl RunStatus {
    /// Status for a freshly accepted run
    pub fn started(run_id: RunId, estimated_completion_ms: u64) -> Self {
        Self {
            in_progress: true,
            run_id: Some(run_id),
            aggregation_started: false,
            estimated_completion_ms: Some(estimated_completion_ms),
        }
    }

    /// Idle status, also the operator reset value
    pub fn idle() -> Self {
        Self {
            in_progress: false,
            run_id: None,
            aggregation_started: false,
            estimated_completion_ms: None,
        }
    }
}

/// Durable per-finding processing result.
///
/// Written once by the item worker, consumed (and deleted) by the
/// aggregator, or swept by the periodic cleaner if a run is abandoned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub run_id: RunId,
    pub target_id: TargetId,
    pub finding_id: FindingId,
    /// Epoch ms when the owning run was launched
    pub occurred_at_ms: u64,
    pub succeeded: bool,
    pub run_kind: RunKind,
    /// Checkpoint boundary within the run; monotonically increasing
    pub batch: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

/// Rolled-up result of one run, retained for history display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: RunId,
    pub occurred_at_ms: u64,
    pub run_kind: RunKind,
    pub item_count: u64,
    pub success_count: u64,
    pub failure_count: u64,
    /// True when every item in the run succeeded
    pub overall_success: bool,
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod tests;
