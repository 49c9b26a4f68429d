// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sb-storage: Job state store shared by every pipeline worker
//!
//! The store is the only cross-invocation shared mutable state besides the
//! work messages themselves. It offers atomic single-key read/write but no
//! atomic counters, so all aggregation is read-accumulate-write.

pub mod keys;
pub mod state;
pub mod store;

pub use state::{outcomes, status, summaries};
pub use store::{MemoryStore, Page, Query, SortOrder, StateStore, StoreError};
