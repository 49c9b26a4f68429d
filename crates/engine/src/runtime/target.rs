// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Target worker: fetches one batch of findings and fans out item work

use super::Runtime;
use crate::error::RuntimeError;
use crate::limits::{CHUNK_SIZE, ITEM_STAGGER_SECS};
use sb_adapters::queue::DelayedQueue;
use sb_adapters::scan::{FindingsQuery, ScanService};
use sb_adapters::ticket::TicketService;
use sb_core::{Clock, ItemMsg, TargetMsg, WorkMessage};
use tracing::info;

impl<S, T, Q, C> Runtime<S, T, Q, C>
where
    S: ScanService,
    T: TicketService,
    Q: DelayedQueue,
    C: Clock,
{
    pub(crate) async fn handle_target(&self, msg: TargetMsg) -> Result<(), RuntimeError> {
        let chained = self
            .resume_later(msg.remaining_delay, |remaining| {
                WorkMessage::Target(TargetMsg { remaining_delay: remaining, ..msg.clone() })
            })
            .await?;
        if chained {
            return Ok(());
        }

        let query = FindingsQuery {
            target_id: msg.target_id.clone(),
            status_filter: msg.status_filter.clone(),
            severity_filter: msg.severity_filter.clone(),
            scan_type_filter: msg.scan_type_filter.clone(),
            policy_ids: msg.policy_ids.clone(),
            max_items: msg.max_items,
        };
        let findings = self.scan.list_findings(&msg.scan_url, &msg.auth_token, &query).await?;
        info!(
            run_id = %msg.run_id,
            target_id = %msg.target_id,
            batch = msg.batch,
            findings = findings.len(),
            "target batch fetched"
        );

        for (chunk_index, chunk) in findings.chunks(CHUNK_SIZE).enumerate() {
            let chunk_delay = chunk_index as u64 * ITEM_STAGGER_SECS;
            for finding in chunk {
                let item = ItemMsg {
                    remaining_delay: 0,
                    run_id: msg.run_id.clone(),
                    run_kind: msg.run_kind,
                    launched_at_ms: msg.launched_at_ms,
                    batch: msg.batch,
                    target_id: msg.target_id.clone(),
                    finding: finding.clone(),
                    auth_token: msg.auth_token.clone(),
                    scan_url: msg.scan_url.clone(),
                    ticket_base_url: msg.ticket_base_url.clone(),
                    destination: msg.destination.clone(),
                };
                self.submit_chained(chunk_delay, |remaining| {
                    WorkMessage::Item(ItemMsg { remaining_delay: remaining, ..item })
                })
                .await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "target_tests.rs"]
mod tests;
