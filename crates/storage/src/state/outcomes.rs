// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! OutcomeRecord collection access
//!
//! Records are append-only until the aggregator (or the periodic sweep)
//! consumes them. All scans are cursor-paginated so callers can stop at a
//! wall-clock budget and resume in a later invocation.

use crate::keys::{outcome_index, OUTCOME_ENTITY};
use crate::store::{Query, StateStore, StoreError};
use sb_core::{OutcomeKey, OutcomeRecord, RunId};

/// One page of decoded outcome records
pub struct OutcomePage {
    pub records: Vec<(OutcomeKey, OutcomeRecord)>,
    pub next_cursor: Option<String>,
}

/// Append a new record under a fresh key
pub fn append(store: &dyn StateStore, record: &OutcomeRecord) -> Result<OutcomeKey, StoreError> {
    let key = OutcomeKey::generate();
    store.put(OUTCOME_ENTITY, key.as_str(), serde_json::to_value(record)?)?;
    Ok(key)
}

/// Page through one run's records
pub fn page_for_run(
    store: &dyn StateStore,
    run_id: &RunId,
    limit: usize,
    cursor: Option<String>,
) -> Result<OutcomePage, StoreError> {
    let query = Query::index(outcome_index::RUN_ID)
        .equals(run_id.as_str())
        .limit(limit)
        .cursor(cursor);
    decode(store.query(OUTCOME_ENTITY, &query)?)
}

/// Page through every record regardless of run (periodic sweep)
pub fn page_all(
    store: &dyn StateStore,
    limit: usize,
    cursor: Option<String>,
) -> Result<OutcomePage, StoreError> {
    let query = Query::index(outcome_index::OCCURRED_AT).limit(limit).cursor(cursor);
    decode(store.query(OUTCOME_ENTITY, &query)?)
}

/// Page through one batch of one run (progress checkpoint query)
pub fn page_for_batch(
    store: &dyn StateStore,
    run_id: &RunId,
    batch: u32,
    limit: usize,
    cursor: Option<String>,
) -> Result<OutcomePage, StoreError> {
    let query = Query::index(outcome_index::BATCH)
        .partition(outcome_index::RUN_ID, run_id.as_str())
        .equals(batch)
        .limit(limit)
        .cursor(cursor);
    decode(store.query(OUTCOME_ENTITY, &query)?)
}

/// True once the given batch has at least one record — the signal that the
/// previous batch is fully drained
pub fn batch_started(
    store: &dyn StateStore,
    run_id: &RunId,
    batch: u32,
) -> Result<bool, StoreError> {
    let page = page_for_batch(store, run_id, batch, 1, None)?;
    Ok(!page.records.is_empty())
}

pub fn delete(store: &dyn StateStore, key: &OutcomeKey) -> Result<(), StoreError> {
    store.delete(OUTCOME_ENTITY, key.as_str())
}

fn decode(page: crate::store::Page) -> Result<OutcomePage, StoreError> {
    let mut records = Vec::with_capacity(page.results.len());
    for (key, value) in page.results {
        records.push((OutcomeKey::from_string(key), serde_json::from_value(value)?));
    }
    Ok(OutcomePage { records, next_cursor: page.next_cursor })
}

#[cfg(test)]
#[path = "outcomes_tests.rs"]
mod tests;
