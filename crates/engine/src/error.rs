// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine-level error type

use sb_adapters::queue::QueueError;
use sb_adapters::scan::ServiceError;
use sb_core::{ConfigError, Severity};
use sb_storage::StoreError;
use thiserror::Error;

/// Errors surfaced by the pipeline workers and control operations.
///
/// Per-item import failures are not errors at this level; the item worker
/// converts them into failed outcome records so the rest of the run keeps
/// going. What reaches here aborts the current invocation.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("import filter configuration is not set")]
    MissingFilterConfig,
    #[error("scanning-service credentials are not set")]
    MissingCredentials,
    #[error("no destination priority mapped for severity '{0}'")]
    UnmappedSeverity(Severity),
    #[error("destination priority '{0}' does not exist in the ticketing system")]
    UnknownPriority(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Queue(#[from] QueueError),
}
