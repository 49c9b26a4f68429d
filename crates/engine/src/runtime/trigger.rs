// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduled trigger: hourly cadence entry point
//!
//! The host platform invokes this on a fixed hourly cadence regardless of
//! the configured schedule. When the schedule's next occurrence falls
//! inside the upcoming hour, a timer message is armed for the residual
//! minutes; otherwise the invocation is a no-op.

use super::Runtime;
use crate::error::RuntimeError;
use sb_adapters::queue::DelayedQueue;
use sb_adapters::scan::ScanService;
use sb_adapters::ticket::TicketService;
use sb_core::schedule::minutes_until_fire;
use sb_core::{Clock, ScheduleConfig, TimerMsg, WorkMessage};
use sb_storage::{keys, StoreError};
use tracing::{debug, info};

impl<S, T, Q, C> Runtime<S, T, Q, C>
where
    S: ScanService,
    T: TicketService,
    Q: DelayedQueue,
    C: Clock,
{
    /// Check the recurring schedule and arm a timer if it is due
    pub async fn run_scheduled_trigger(&self) -> Result<(), RuntimeError> {
        let Some(value) = self.store.get(keys::SCHEDULE_CONFIG)? else {
            debug!("no recurring schedule configured");
            return Ok(());
        };
        let config: ScheduleConfig =
            serde_json::from_value(value).map_err(StoreError::from)?;

        let Some(minutes) = minutes_until_fire(&config, self.clock.epoch_ms()) else {
            debug!("recurring schedule not due within the next hour");
            return Ok(());
        };

        info!(minutes, max_items = config.max_items, "recurring import due, arming timer");
        self.queue
            .submit(
                WorkMessage::Timer(TimerMsg {
                    remaining_delay: u64::from(minutes) * 60,
                    max_items: config.max_items,
                }),
                0,
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
