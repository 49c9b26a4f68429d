// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operator control surface: configuration saves, manual launch, progress
//! and history queries, and the stuck-run reset

use super::{LaunchReceipt, Runtime};
use crate::error::RuntimeError;
use crate::limits::AGGREGATE_PAGE_SIZE;
use sb_adapters::queue::DelayedQueue;
use sb_adapters::scan::ScanService;
use sb_adapters::ticket::TicketService;
use sb_core::{Clock, Credentials, ImportFilterConfig, RunId, RunKind, RunStatus, ScheduleConfig};
use sb_storage::summaries::SummaryPage;
use sb_storage::{keys, outcomes, status, summaries, StoreError};
use tracing::info;

/// Result of one progress poll.
///
/// The poller feeds `batch` and `carried` back into the next poll; the
/// aggregator may delete a checkpointed batch's records at any time, and
/// the carried total keeps them counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// Items imported so far, including checkpointed batches
    pub count: u64,
    /// Total to carry into the next poll
    pub carried: u64,
    /// Batch the next poll should count from
    pub batch: u32,
}

impl<S, T, Q, C> Runtime<S, T, Q, C>
where
    S: ScanService,
    T: TicketService,
    Q: DelayedQueue,
    C: Clock,
{
    /// Validate and persist the import filter configuration
    pub fn save_filter_config(&self, config: &ImportFilterConfig) -> Result<(), RuntimeError> {
        config.validate()?;
        let value = serde_json::to_value(config).map_err(StoreError::from)?;
        self.store.set(keys::IMPORT_FILTER_CONFIG, value)?;
        Ok(())
    }

    /// Persist scanning-service credentials in secret-scoped storage
    pub fn save_credentials(&self, credentials: &Credentials) -> Result<(), RuntimeError> {
        let value = serde_json::to_value(credentials).map_err(StoreError::from)?;
        self.store.set_secret(keys::CREDENTIALS, value)?;
        Ok(())
    }

    /// Persist the recurring schedule read by the trigger
    pub fn save_schedule(&self, schedule: &ScheduleConfig) -> Result<(), RuntimeError> {
        let value = serde_json::to_value(schedule).map_err(StoreError::from)?;
        self.store.set(keys::SCHEDULE_CONFIG, value)?;
        Ok(())
    }

    /// Launch an operator-initiated run covering up to `max_items` findings
    /// per target
    pub async fn launch_manual(&self, max_items: u32) -> Result<LaunchReceipt, RuntimeError> {
        self.launch_run(RunKind::Manual, max_items).await
    }

    /// Current live-run status record
    pub fn current_status(&self) -> Result<RunStatus, RuntimeError> {
        Ok(status::read(&*self.store)?)
    }

    /// Force the status back to idle. Unconditional: already-dispatched
    /// work messages keep running, but the operator can launch again.
    pub fn reset(&self) -> Result<(), RuntimeError> {
        status::reset(&*self.store)?;
        info!("run status reset to idle");
        Ok(())
    }

    /// Count a run's imported items, resuming from a previous poll's
    /// checkpoint. The checkpoint advances one batch at a time, and only
    /// once the next batch has started producing records, because until
    /// then the current batch may still be mid-flight.
    pub fn progress(
        &self,
        run_id: &RunId,
        batch: u32,
        carried: u64,
    ) -> Result<Progress, RuntimeError> {
        let mut current: u64 = 0;
        let mut cursor = None;
        loop {
            let page =
                outcomes::page_for_batch(&*self.store, run_id, batch, AGGREGATE_PAGE_SIZE, cursor)?;
            current += page.records.len() as u64;
            cursor = page.next_cursor;
            if cursor.is_none() {
                break;
            }
        }

        let count = carried + current;
        if outcomes::batch_started(&*self.store, run_id, batch + 1)? {
            Ok(Progress { count, carried: count, batch: batch + 1 })
        } else {
            Ok(Progress { count, carried, batch })
        }
    }

    /// Recent run summaries, newest first
    pub fn history(
        &self,
        limit: usize,
        cursor: Option<String>,
    ) -> Result<SummaryPage, RuntimeError> {
        Ok(summaries::recent(&*self.store, limit, cursor)?)
    }
}

#[cfg(test)]
#[path = "control_tests.rs"]
mod tests;
