// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer worker: waits out the residual schedule delay, then launches

use super::Runtime;
use crate::error::RuntimeError;
use crate::limits::STALE_TIMER_CUTOFF_SECS;
use sb_adapters::queue::DelayedQueue;
use sb_adapters::scan::ScanService;
use sb_adapters::ticket::TicketService;
use sb_core::{Clock, RunKind, TimerMsg, WorkMessage};
use tracing::{info, warn};

impl<S, T, Q, C> Runtime<S, T, Q, C>
where
    S: ScanService,
    T: TicketService,
    Q: DelayedQueue,
    C: Clock,
{
    pub(crate) async fn handle_timer(&self, msg: TimerMsg) -> Result<(), RuntimeError> {
        // The trigger never arms more than 59 minutes of residual delay, so
        // anything past the cutoff is a corrupt or replayed message.
        if msg.remaining_delay > STALE_TIMER_CUTOFF_SECS {
            warn!(remaining = msg.remaining_delay, "dropping stale timer message");
            return Ok(());
        }

        let chained = self
            .resume_later(msg.remaining_delay, |remaining| {
                WorkMessage::Timer(TimerMsg { remaining_delay: remaining, max_items: msg.max_items })
            })
            .await?;
        if chained {
            return Ok(());
        }

        let receipt = self.launch_run(RunKind::Scheduled, msg.max_items).await?;
        info!(
            run_id = %receipt.run_id,
            targets = receipt.targets,
            batches = receipt.batches,
            "scheduled import launched"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
