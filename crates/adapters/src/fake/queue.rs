// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recording queue fake
//!
//! Captures submissions instead of delivering them; tests drain the log
//! and feed messages back through the engine to simulate the platform's
//! delivery loop.

use crate::queue::{check_delay, DelayedQueue, QueueError};
use async_trait::async_trait;
use parking_lot::Mutex;
use sb_core::WorkMessage;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct FakeQueue {
    submissions: Arc<Mutex<Vec<(WorkMessage, u64)>>>,
}

impl FakeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded `(message, delay)` pairs, in submission order
    pub fn submissions(&self) -> Vec<(WorkMessage, u64)> {
        self.submissions.lock().clone()
    }

    /// Take and clear the recorded submissions
    pub fn drain(&self) -> Vec<(WorkMessage, u64)> {
        std::mem::take(&mut *self.submissions.lock())
    }

    pub fn len(&self) -> usize {
        self.submissions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.lock().is_empty()
    }
}

#[async_trait]
impl DelayedQueue for FakeQueue {
    async fn submit(&self, message: WorkMessage, delay_secs: u64) -> Result<(), QueueError> {
        check_delay(delay_secs)?;
        self.submissions.lock().push((message, delay_secs));
        Ok(())
    }
}
