// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Well-known storage keys and entity names

/// Recurring-schedule parameters (written by the configuration UI)
pub const SCHEDULE_CONFIG: &str = "schedule-config";
/// Import filter and destination settings
pub const IMPORT_FILTER_CONFIG: &str = "import-filter-config";
/// Scanning-service credentials; lives in the secret-scoped store
pub const CREDENTIALS: &str = "credentials";
/// Singleton live-run status record
pub const RUN_STATUS: &str = "run-status";

/// Per-finding outcome records, consumed by the aggregator
pub const OUTCOME_ENTITY: &str = "outcome-records";
/// One rolled-up summary per completed run
pub const SUMMARY_ENTITY: &str = "run-summaries";

/// Index fields on the outcome entity
pub mod outcome_index {
    pub const RUN_ID: &str = "run_id";
    pub const BATCH: &str = "batch";
    pub const OCCURRED_AT: &str = "occurred_at_ms";
}

/// Index fields on the summary entity
pub mod summary_index {
    pub const OCCURRED_AT: &str = "occurred_at_ms";
}
