// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Delayed-message submission seam
//!
//! The platform delivers each submitted message to the matching worker at
//! least once, with no ordering guarantee across sibling messages, and
//! caps the delay of a single submission. Delays beyond the cap are the
//! delay chain's job (`sb_core::delay`); submitting past the cap here is
//! a programming error and is rejected.

use async_trait::async_trait;
use sb_core::{WorkMessage, MAX_QUEUE_DELAY_SECS};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("requested delay {requested}s exceeds platform cap {cap}s")]
    DelayTooLong { requested: u64, cap: u64 },
    #[error("queue unavailable: {0}")]
    Unavailable(String),
}

/// Durable, delayed, at-least-once message submission
#[async_trait]
pub trait DelayedQueue: Send + Sync {
    async fn submit(&self, message: WorkMessage, delay_secs: u64) -> Result<(), QueueError>;
}

/// Shared guard for implementations
pub fn check_delay(delay_secs: u64) -> Result<(), QueueError> {
    if delay_secs > MAX_QUEUE_DELAY_SECS {
        return Err(QueueError::DelayTooLong { requested: delay_secs, cap: MAX_QUEUE_DELAY_SECS });
    }
    Ok(())
}
