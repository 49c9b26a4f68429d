// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Aggregator: rolls up outcome records into a run summary, then deletes
//! the consumed records
//!
//! Runs as a self-resubmitting chain. The scan position and the running
//! totals ride in the message, so an invocation that hits its wall-clock
//! budget hands off mid-scan and the totals come out the same regardless
//! of where the interruptions fall.

use super::Runtime;
use crate::error::RuntimeError;
use crate::limits::{
    AGGREGATE_CONTINUATION_DELAY_SECS, AGGREGATE_PAGE_SIZE, DELETE_PASS_CAP,
    STARTED_FLAG_DELAY_SECS,
};
use sb_adapters::queue::DelayedQueue;
use sb_adapters::scan::ScanService;
use sb_adapters::ticket::TicketService;
use sb_core::{AggregateMsg, Clock, RunKind, RunSummary, WorkMessage};
use sb_storage::{outcomes, status, summaries};
use tracing::{debug, info};

impl<S, T, Q, C> Runtime<S, T, Q, C>
where
    S: ScanService,
    T: TicketService,
    Q: DelayedQueue,
    C: Clock,
{
    pub(crate) async fn handle_aggregate(&self, msg: AggregateMsg) -> Result<(), RuntimeError> {
        let chained = self
            .resume_later(msg.remaining_delay, |remaining| {
                WorkMessage::Aggregate(AggregateMsg { remaining_delay: remaining, ..msg.clone() })
            })
            .await?;
        if chained {
            return Ok(());
        }

        // The opening hop of a manual run only flips the started flag, so a
        // progress poll can tell "not started yet" from "all drained".
        if msg.just_started {
            status::mark_aggregation_started(&*self.store)?;
            let follow = AggregateMsg { remaining_delay: 0, just_started: false, ..msg.clone() };
            self.queue
                .submit(WorkMessage::Aggregate(follow), STARTED_FLAG_DELAY_SECS)
                .await?;
            return Ok(());
        }

        if msg.delete_only {
            self.delete_consumed(msg).await
        } else {
            self.aggregate_outcomes(msg).await
        }
    }

    async fn aggregate_outcomes(&self, msg: AggregateMsg) -> Result<(), RuntimeError> {
        let started = self.clock.now();
        let mut cursor = msg.cursor.clone();
        let mut item_count = msg.item_count;
        let mut success_count = msg.success_count;
        let mut failure_count = msg.failure_count;

        loop {
            let page =
                outcomes::page_for_run(&*self.store, &msg.run_id, AGGREGATE_PAGE_SIZE, cursor)?;
            for (_, record) in &page.records {
                item_count += 1;
                if record.succeeded {
                    success_count += 1;
                } else {
                    failure_count += 1;
                }
            }
            cursor = page.next_cursor;
            if cursor.is_none() {
                break;
            }
            if self.clock.now().duration_since(started) >= self.aggregate_budget {
                let continuation = AggregateMsg {
                    remaining_delay: 0,
                    run_id: msg.run_id.clone(),
                    run_kind: msg.run_kind,
                    launched_at_ms: msg.launched_at_ms,
                    just_started: false,
                    delete_only: false,
                    cursor,
                    item_count,
                    success_count,
                    failure_count,
                };
                self.queue
                    .submit(
                        WorkMessage::Aggregate(continuation),
                        AGGREGATE_CONTINUATION_DELAY_SECS,
                    )
                    .await?;
                return Ok(());
            }
        }

        if item_count > 0 {
            let summary = RunSummary {
                run_id: msg.run_id.clone(),
                occurred_at_ms: msg.launched_at_ms,
                run_kind: msg.run_kind,
                item_count,
                success_count,
                failure_count,
                overall_success: failure_count == 0,
            };
            summaries::append(&*self.store, &summary)?;
            info!(
                run_id = %msg.run_id,
                item_count,
                success_count,
                failure_count,
                "run summary recorded"
            );

            let delete = AggregateMsg {
                remaining_delay: 0,
                run_id: msg.run_id.clone(),
                run_kind: msg.run_kind,
                launched_at_ms: msg.launched_at_ms,
                just_started: false,
                delete_only: true,
                cursor: None,
                item_count: 0,
                success_count: 0,
                failure_count: 0,
            };
            self.queue.submit(WorkMessage::Aggregate(delete), 0).await?;
        }

        if msg.run_kind == RunKind::Manual {
            status::mark_done(&*self.store)?;
        }
        Ok(())
    }

    /// Delete up to one pass worth of the run's consumed records, chaining
    /// a continuation while the scan has records left
    async fn delete_consumed(&self, msg: AggregateMsg) -> Result<(), RuntimeError> {
        let mut cursor = msg.cursor.clone();
        let mut keys = Vec::new();
        loop {
            let page =
                outcomes::page_for_run(&*self.store, &msg.run_id, AGGREGATE_PAGE_SIZE, cursor)?;
            keys.extend(page.records.into_iter().map(|(key, _)| key));
            cursor = page.next_cursor;
            if cursor.is_none() || keys.len() >= DELETE_PASS_CAP {
                break;
            }
        }

        for key in &keys {
            outcomes::delete(&*self.store, key)?;
        }
        debug!(run_id = %msg.run_id, deleted = keys.len(), "consumed outcome records deleted");

        if cursor.is_some() {
            let continuation = AggregateMsg {
                remaining_delay: 0,
                run_id: msg.run_id.clone(),
                run_kind: msg.run_kind,
                launched_at_ms: msg.launched_at_ms,
                just_started: false,
                delete_only: true,
                cursor,
                item_count: 0,
                success_count: 0,
                failure_count: 0,
            };
            self.queue.submit(WorkMessage::Aggregate(continuation), 0).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
