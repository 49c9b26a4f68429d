// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sb-engine: The four-stage import pipeline
//!
//! One [`runtime::Runtime`] instance handles every delivered work message
//! plus the externally-cadenced entry points (scheduled trigger, periodic
//! sweep) and the operator control operations. All cross-invocation state
//! lives in the job state store and the messages themselves, so a fresh
//! `Runtime` per invocation behaves identically to a long-lived one.

pub mod error;
pub mod limits;
pub mod runtime;

pub use error::RuntimeError;
pub use runtime::{LaunchReceipt, Progress, Runtime};
