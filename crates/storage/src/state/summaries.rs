// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! RunSummary collection access

use crate::keys::{summary_index, SUMMARY_ENTITY};
use crate::store::{Query, SortOrder, StateStore, StoreError};
use sb_core::RunSummary;
use tracing::debug;

/// One page of summaries, newest first
pub struct SummaryPage {
    pub summaries: Vec<RunSummary>,
    pub next_cursor: Option<String>,
}

/// Record the rolled-up result of one run. Called exactly once per run by
/// the aggregator; the key is derived from the run id so a redelivered
/// aggregation message overwrites rather than duplicates.
pub fn append(store: &dyn StateStore, summary: &RunSummary) -> Result<(), StoreError> {
    let key = format!("sum-{}", summary.run_id);
    debug!(
        run_id = %summary.run_id,
        item_count = summary.item_count,
        failure_count = summary.failure_count,
        "recording run summary"
    );
    store.put(SUMMARY_ENTITY, &key, serde_json::to_value(summary)?)
}

/// Most recent run summaries for history display
pub fn recent(
    store: &dyn StateStore,
    limit: usize,
    cursor: Option<String>,
) -> Result<SummaryPage, StoreError> {
    let query = Query::index(summary_index::OCCURRED_AT)
        .sort(SortOrder::Desc)
        .limit(limit)
        .cursor(cursor);
    let page = store.query(SUMMARY_ENTITY, &query)?;
    let mut summaries = Vec::with_capacity(page.results.len());
    for (_, value) in page.results {
        summaries.push(serde_json::from_value(value)?);
    }
    Ok(SummaryPage { summaries, next_cursor: page.next_cursor })
}

#[cfg(test)]
#[path = "summaries_tests.rs"]
mod tests;
