// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable work messages for the four pipeline stages
//!
//! Each message is produced by one stage and consumed by the next. Messages
//! are the only coordination between invocations besides the job state
//! store, so every field a downstream stage needs rides along. All four
//! carry `remaining_delay` for the delay chain.

use crate::config::Severity;
use crate::finding::Finding;
use crate::id::{PolicyId, RunId, TargetId};
use crate::records::RunKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ticketing-system destination settings carried through the fan-out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub project_id: String,
    pub issue_type_id: String,
    pub priority_map: BTreeMap<Severity, String>,
}

/// Waits out the remaining delay before a scheduled run starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerMsg {
    pub remaining_delay: u64,
    /// Per-target item cap from the schedule configuration
    pub max_items: u32,
}

/// Per-target fetch and fan-out work unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetMsg {
    pub remaining_delay: u64,
    pub run_id: RunId,
    pub run_kind: RunKind,
    /// Epoch ms when the owning run was launched
    pub launched_at_ms: u64,
    /// Checkpoint boundary; monotonically increasing within the run
    pub batch: u32,
    pub target_id: TargetId,
    /// Item cap for this batch (at most the per-batch ceiling)
    pub max_items: u32,
    pub status_filter: String,
    pub severity_filter: String,
    pub scan_type_filter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_ids: Option<Vec<PolicyId>>,
    pub auth_token: String,
    /// Scanning service base URL
    pub scan_url: String,
    /// Ticketing system base URL, used for back-link comments
    pub ticket_base_url: String,
    pub destination: Destination,
}

/// Single-finding processing work unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemMsg {
    pub remaining_delay: u64,
    pub run_id: RunId,
    pub run_kind: RunKind,
    pub launched_at_ms: u64,
    pub batch: u32,
    pub target_id: TargetId,
    pub finding: Finding,
    pub auth_token: String,
    pub scan_url: String,
    pub ticket_base_url: String,
    pub destination: Destination,
}

/// Aggregation/cleanup work unit, resubmitted as a continuation until the
/// outcome scan for the run is drained
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateMsg {
    pub remaining_delay: u64,
    pub run_id: RunId,
    pub run_kind: RunKind,
    pub launched_at_ms: u64,
    /// First hop after run launch: flips `aggregation_started` and resubmits
    #[serde(default)]
    pub just_started: bool,
    /// Aggregate phase done; this chain only deletes consumed records
    #[serde(default)]
    pub delete_only: bool,
    /// Resumption cursor into the outcome-record scan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Running totals carried across budget-limited continuations
    #[serde(default)]
    pub item_count: u64,
    #[serde(default)]
    pub success_count: u64,
    #[serde(default)]
    pub failure_count: u64,
}

impl AggregateMsg {
    /// The first message of a run's aggregation chain
    pub fn opening(run_id: RunId, run_kind: RunKind, launched_at_ms: u64, delay: u64) -> Self {
        Self {
            remaining_delay: delay,
            run_id,
            run_kind,
            launched_at_ms,
            just_started: matches!(run_kind, RunKind::Manual),
            delete_only: false,
            cursor: None,
            item_count: 0,
            success_count: 0,
            failure_count: 0,
        }
    }
}

/// Envelope for queue submission; one variant per pipeline stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WorkMessage {
    Timer(TimerMsg),
    Target(TargetMsg),
    Item(ItemMsg),
    Aggregate(AggregateMsg),
}

impl WorkMessage {
    /// Remaining delay-chain seconds carried by the inner message
    pub fn remaining_delay(&self) -> u64 {
        match self {
            WorkMessage::Timer(m) => m.remaining_delay,
            WorkMessage::Target(m) => m.remaining_delay,
            WorkMessage::Item(m) => m.remaining_delay,
            WorkMessage::Aggregate(m) => m.remaining_delay,
        }
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
