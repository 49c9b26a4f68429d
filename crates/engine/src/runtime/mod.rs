// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline runtime: message dispatch and shared plumbing

mod aggregate;
mod control;
mod item;
mod launch;
mod sweep;
mod target;
mod timer;
mod trigger;

#[cfg(test)]
#[path = "test_support.rs"]
pub(crate) mod test_support;

pub use control::Progress;
pub use launch::LaunchReceipt;

use crate::error::RuntimeError;
use crate::limits;
use sb_adapters::queue::DelayedQueue;
use sb_adapters::scan::ScanService;
use sb_adapters::ticket::TicketService;
use sb_core::{delay, ChainStep, Clock, Credentials, ImportFilterConfig, WorkMessage,
    MAX_QUEUE_DELAY_SECS};
use sb_storage::{keys, StateStore, StoreError};
use std::sync::Arc;
use std::time::Duration;

/// The pipeline runtime.
///
/// Holds the job state store and the three external seams. Every worker
/// entry point is a method here; the platform glue only routes delivered
/// messages into [`Runtime::handle`] and cron ticks into the trigger and
/// sweep methods.
pub struct Runtime<S, T, Q, C> {
    store: Arc<dyn StateStore>,
    scan: S,
    tickets: T,
    queue: Q,
    clock: C,
    aggregate_budget: Duration,
    sweep_budget: Duration,
}

impl<S, T, Q, C> Runtime<S, T, Q, C>
where
    S: ScanService,
    T: TicketService,
    Q: DelayedQueue,
    C: Clock,
{
    pub fn new(store: Arc<dyn StateStore>, scan: S, tickets: T, queue: Q, clock: C) -> Self {
        Self {
            store,
            scan,
            tickets,
            queue,
            clock,
            aggregate_budget: limits::AGGREGATE_BUDGET,
            sweep_budget: limits::SWEEP_BUDGET,
        }
    }

    /// Override the wall-clock budgets of the aggregator and the sweep.
    /// Deployments with a tighter per-invocation runtime limit lower these.
    pub fn with_budgets(mut self, aggregate: Duration, sweep: Duration) -> Self {
        self.aggregate_budget = aggregate;
        self.sweep_budget = sweep;
        self
    }

    /// Route one delivered work message to its stage worker
    pub async fn handle(&self, message: WorkMessage) -> Result<(), RuntimeError> {
        match message {
            WorkMessage::Timer(msg) => self.handle_timer(msg).await,
            WorkMessage::Target(msg) => self.handle_target(msg).await,
            WorkMessage::Item(msg) => self.handle_item(msg).await,
            WorkMessage::Aggregate(msg) => self.handle_aggregate(msg).await,
        }
    }

    /// Submit a message that should fire after `total_delay` seconds,
    /// starting a delay chain when that exceeds the platform cap. `build`
    /// receives the remaining seconds the message must still wait out
    /// after delivery.
    pub(crate) async fn submit_chained<F>(
        &self,
        total_delay: u64,
        build: F,
    ) -> Result<(), RuntimeError>
    where
        F: FnOnce(u64) -> WorkMessage,
    {
        let submit_delay = total_delay.min(MAX_QUEUE_DELAY_SECS);
        let remaining = total_delay.saturating_sub(MAX_QUEUE_DELAY_SECS);
        self.queue.submit(build(remaining), submit_delay).await?;
        Ok(())
    }

    /// Delay-chain step at consumption time. Returns `true` when the
    /// message still has delay to wait out and was resubmitted; the caller
    /// must then return without doing any work.
    pub(crate) async fn resume_later<F>(
        &self,
        remaining: u64,
        rebuild: F,
    ) -> Result<bool, RuntimeError>
    where
        F: FnOnce(u64) -> WorkMessage,
    {
        match delay::plan(remaining, MAX_QUEUE_DELAY_SECS) {
            ChainStep::Run => Ok(false),
            ChainStep::Resubmit { remaining, submit_delay } => {
                self.queue.submit(rebuild(remaining), submit_delay).await?;
                Ok(true)
            }
        }
    }

    pub(crate) fn read_filter_config(&self) -> Result<ImportFilterConfig, RuntimeError> {
        let value = self
            .store
            .get(keys::IMPORT_FILTER_CONFIG)?
            .ok_or(RuntimeError::MissingFilterConfig)?;
        Ok(serde_json::from_value(value).map_err(StoreError::from)?)
    }

    pub(crate) fn read_credentials(&self) -> Result<Credentials, RuntimeError> {
        let value = self
            .store
            .get_secret(keys::CREDENTIALS)?
            .ok_or(RuntimeError::MissingCredentials)?;
        Ok(serde_json::from_value(value).map_err(StoreError::from)?)
    }
}
