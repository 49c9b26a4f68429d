// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run launch: target resolution, batching, and staggered fan-out
//!
//! Shared by the timer worker (scheduled runs) and the operator launch
//! (manual runs). Dispatches one target message per batch plus the opening
//! aggregation message, all through the delay chain so the total dispatch
//! span may exceed the platform's delay cap.

use super::Runtime;
use crate::error::RuntimeError;
use crate::limits::{
    BATCH_CEILING, CHUNK_SIZE, COMPLETION_MARGIN_SECS, ITEM_STAGGER_SECS, TARGET_STAGGER_SECS,
};
use sb_adapters::queue::DelayedQueue;
use sb_adapters::scan::ScanService;
use sb_adapters::ticket::TicketService;
use sb_core::{
    or_clause, AggregateMsg, Clock, Destination, RunId, RunKind, RunStatus, Severity, TargetId,
    TargetMsg, TargetSelection, WorkMessage,
};
use sb_storage::status;
use tracing::info;

/// What a successful launch dispatched
#[derive(Debug, Clone)]
pub struct LaunchReceipt {
    pub run_id: RunId,
    /// Targets covered by the run
    pub targets: usize,
    /// Batches dispatched across all targets
    pub batches: u32,
    /// Seconds from launch until the last batch is due
    pub span_secs: u64,
}

impl<S, T, Q, C> Runtime<S, T, Q, C>
where
    S: ScanService,
    T: TicketService,
    Q: DelayedQueue,
    C: Clock,
{
    /// Resolve the configured targets, split the item cap into batches, and
    /// dispatch the whole run
    pub(crate) async fn launch_run(
        &self,
        run_kind: RunKind,
        max_items: u32,
    ) -> Result<LaunchReceipt, RuntimeError> {
        let config = self.read_filter_config()?;
        let credentials = self.read_credentials()?;
        let token = self
            .scan
            .authenticate(&credentials.url, &credentials.key_id, &credentials.key_secret)
            .await?;

        // An explicit selection that is empty, or the all-targets sentinel,
        // both expand to the full target enumeration.
        let targets: Vec<TargetId> = match &config.targets {
            TargetSelection::Explicit(ids) if !ids.is_empty() => ids.clone(),
            _ => self
                .scan
                .list_targets(&credentials.url, &token)
                .await?
                .into_iter()
                .map(|item| TargetId::new(item.id))
                .collect(),
        };

        let severity_names: Vec<&str> =
            config.severities.iter().map(Severity::as_str).collect();
        let status_filter = or_clause("Status", &config.statuses);
        let severity_filter = or_clause("Severity", &severity_names);
        let scan_type_filter = or_clause("DiscoveryMethod", &config.scan_types);
        let destination = Destination {
            project_id: config.project_id.clone(),
            issue_type_id: config.issue_type_id.clone(),
            priority_map: config.priority_map.clone(),
        };

        let run_id = RunId::generate();
        let launched_at_ms = self.clock.epoch_ms();
        let ticket_base_url = self.tickets.base_url().await?;

        let mut span_secs: u64 = 0;
        let mut batches: u32 = 0;
        for target_id in &targets {
            let mut remaining_items = max_items;
            while remaining_items > 0 {
                let batch_size = remaining_items.min(BATCH_CEILING);
                remaining_items -= batch_size;

                let message = TargetMsg {
                    remaining_delay: 0,
                    run_id: run_id.clone(),
                    run_kind,
                    launched_at_ms,
                    batch: batches,
                    target_id: target_id.clone(),
                    max_items: batch_size,
                    status_filter: status_filter.clone(),
                    severity_filter: severity_filter.clone(),
                    scan_type_filter: scan_type_filter.clone(),
                    policy_ids: config.policy_ids.clone(),
                    auth_token: token.clone(),
                    scan_url: credentials.url.clone(),
                    ticket_base_url: ticket_base_url.clone(),
                    destination: destination.clone(),
                };
                self.submit_chained(span_secs, |remaining| {
                    WorkMessage::Target(TargetMsg { remaining_delay: remaining, ..message })
                })
                .await?;

                batches += 1;
                // Each batch gets a fixed gap plus one item-stagger step per
                // chunk it will fan out, so sibling batches never overlap.
                let chunks = u64::from(batch_size.div_ceil(CHUNK_SIZE as u32));
                span_secs += TARGET_STAGGER_SECS + chunks * ITEM_STAGGER_SECS;
            }
        }

        if run_kind == RunKind::Manual {
            let estimated_completion_ms =
                launched_at_ms + (span_secs + COMPLETION_MARGIN_SECS) * 1000;
            status::write(
                &*self.store,
                &RunStatus::started(run_id.clone(), estimated_completion_ms),
            )?;
        }

        // The aggregation chain opens once every batch is due.
        self.submit_chained(span_secs, |remaining| {
            WorkMessage::Aggregate(AggregateMsg::opening(
                run_id.clone(),
                run_kind,
                launched_at_ms,
                remaining,
            ))
        })
        .await?;

        info!(
            run_id = %run_id,
            kind = %run_kind,
            targets = targets.len(),
            batches,
            span_secs,
            "import run dispatched"
        );
        Ok(LaunchReceipt { run_id, targets: targets.len(), batches, span_secs })
    }
}
