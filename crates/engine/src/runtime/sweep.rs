// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Periodic sweep: drops outcome records abandoned by interrupted runs
//!
//! The aggregator deletes the records it consumes; anything still in the
//! collection well past its run's dispatch span belongs to a run whose
//! aggregation chain died. The sweep scans a bounded slice of the
//! collection per invocation and deletes what is past retention, stopping
//! at its wall-clock budget. The external cadence retries often enough
//! that partial passes converge.

use super::Runtime;
use crate::error::RuntimeError;
use crate::limits::{SWEEP_CANDIDATE_CAP, SWEEP_PAGE_SIZE, SWEEP_RETENTION};
use sb_adapters::queue::DelayedQueue;
use sb_adapters::scan::ScanService;
use sb_adapters::ticket::TicketService;
use sb_core::Clock;
use sb_storage::outcomes;
use tracing::info;

impl<S, T, Q, C> Runtime<S, T, Q, C>
where
    S: ScanService,
    T: TicketService,
    Q: DelayedQueue,
    C: Clock,
{
    /// Scan for abandoned outcome records and delete them. Returns how
    /// many records this invocation removed.
    pub async fn run_periodic_sweep(&self) -> Result<usize, RuntimeError> {
        let started = self.clock.now();
        let now_ms = self.clock.epoch_ms();
        let retention_ms = SWEEP_RETENTION.as_millis() as u64;

        let mut cursor = None;
        let mut scanned = 0usize;
        let mut stale = Vec::new();
        loop {
            let page = outcomes::page_all(&*self.store, SWEEP_PAGE_SIZE, cursor)?;
            scanned += page.records.len();
            for (key, record) in page.records {
                if now_ms.saturating_sub(record.occurred_at_ms) > retention_ms {
                    stale.push(key);
                }
            }
            cursor = page.next_cursor;
            if cursor.is_none() || scanned >= SWEEP_CANDIDATE_CAP {
                break;
            }
        }

        let mut deleted = 0usize;
        for key in &stale {
            if self.clock.now().duration_since(started) >= self.sweep_budget {
                break;
            }
            outcomes::delete(&*self.store, key)?;
            deleted += 1;
        }

        if deleted > 0 {
            info!(scanned, deleted, "swept abandoned outcome records");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
#[path = "sweep_tests.rs"]
mod tests;
