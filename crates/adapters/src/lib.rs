// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sb-adapters: Seams to the three external systems
//!
//! The scanning service and ticketing system are reached over REST; the
//! delayed-message queue is the host platform's work-dispatch primitive.
//! Each seam is a trait with a reqwest-backed implementation and a Fake
//! for tests (gated behind the `test-support` feature).

pub mod http;
pub mod queue;
pub mod scan;
pub mod ticket;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeQueue, FakeScanService, FakeTicketService};

pub use http::{HttpScanService, HttpTicketService};
pub use queue::{DelayedQueue, QueueError};
pub use scan::{FindingPatch, FindingsQuery, NamedItem, ScanService, ServiceError};
pub use ticket::{TicketFields, TicketService};
