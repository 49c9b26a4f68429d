// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Delay chaining: arbitrary delays atop a bounded-delay queue primitive
//!
//! The host platform caps how far in the future a single queue submission may
//! be scheduled. Longer waits are realized by resubmitting the carrying
//! message to its own queue, burning down `remaining` by the cap on each hop,
//! until the remainder fits a single submission. Real work runs only once the
//! remainder reaches zero.

use serde::{Deserialize, Serialize};

/// Platform-enforced maximum delay for a single queue submission, in seconds.
pub const MAX_QUEUE_DELAY_SECS: u64 = 900;

/// Next action for a message carrying `remaining` seconds of delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainStep {
    /// Resubmit the message with the given submission delay; do no work.
    Resubmit { remaining: u64, submit_delay: u64 },
    /// The requested delay has fully elapsed; execute the stage's work now.
    Run,
}

/// Plan one hop of the delay chain.
///
/// Guarantees that work never runs before the cumulative submitted delay
/// reaches the originally requested amount, and that a request of `D`
/// seconds takes exactly `ceil(D / cap)` hops before work executes.
pub fn plan(remaining: u64, cap: u64) -> ChainStep {
    if remaining > cap {
        ChainStep::Resubmit { remaining: remaining - cap, submit_delay: cap }
    } else if remaining > 0 {
        ChainStep::Resubmit { remaining: 0, submit_delay: remaining }
    } else {
        ChainStep::Run
    }
}

#[cfg(test)]
#[path = "delay_tests.rs"]
mod tests;
