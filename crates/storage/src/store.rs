// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Key/value and indexed-collection store interface
//!
//! Models the host platform's storage primitive: plain JSON KV, a
//! secret-scoped KV variant for credentials, and per-entity collections
//! queryable by an indexed field with a resumption cursor. `MemoryStore`
//! is the in-process implementation used by the engine tests and by any
//! single-node deployment.

use parking_lot::Mutex;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("malformed cursor: {0}")]
    BadCursor(String),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Sort order for indexed queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// An indexed-collection query.
///
/// `index` names the record field the scan orders and filters on.
/// `partition` optionally pins another field to an exact value first (the
/// "by-run per-batch" style lookup). `equals` filters the indexed field
/// itself. `cursor` resumes a previous page.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub index: String,
    pub partition: Option<(String, Value)>,
    pub equals: Option<Value>,
    pub sort: SortOrder,
    pub limit: usize,
    pub cursor: Option<String>,
}

impl Query {
    pub fn index(index: &str) -> Self {
        Self { index: index.to_string(), limit: 20, ..Default::default() }
    }

    pub fn partition(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.partition = Some((field.to_string(), value.into()));
        self
    }

    pub fn equals(mut self, value: impl Into<Value>) -> Self {
        self.equals = Some(value.into());
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn cursor(mut self, cursor: Option<String>) -> Self {
        self.cursor = cursor;
        self
    }
}

/// One page of query results
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// `(record key, record value)` pairs in index order
    pub results: Vec<(String, Value)>,
    /// Present when more results remain past this page
    pub next_cursor: Option<String>,
}

/// The job state store interface.
///
/// Single-key reads and writes are atomic; there are no cross-key
/// transactions and no atomic counters.
pub trait StateStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Secret-scoped variant used for credentials
    fn get_secret(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn set_secret(&self, key: &str, value: Value) -> Result<(), StoreError>;

    fn put(&self, entity: &str, key: &str, value: Value) -> Result<(), StoreError>;
    fn delete(&self, entity: &str, key: &str) -> Result<(), StoreError>;
    fn query(&self, entity: &str, query: &Query) -> Result<Page, StoreError>;
}

/// In-memory store backed by BTreeMaps under a single mutex
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryStoreState>,
}

#[derive(Default)]
struct MemoryStoreState {
    kv: HashMap<String, Value>,
    secrets: HashMap<String, Value>,
    entities: HashMap<String, BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently stored for an entity (test helper)
    pub fn entity_len(&self, entity: &str) -> usize {
        self.inner.lock().entities.get(entity).map_or(0, BTreeMap::len)
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.inner.lock().kv.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.inner.lock().kv.insert(key.to_string(), value);
        Ok(())
    }

    fn get_secret(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.inner.lock().secrets.get(key).cloned())
    }

    fn set_secret(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.inner.lock().secrets.insert(key.to_string(), value);
        Ok(())
    }

    fn put(&self, entity: &str, key: &str, value: Value) -> Result<(), StoreError> {
        self.inner
            .lock()
            .entities
            .entry(entity.to_string())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, entity: &str, key: &str) -> Result<(), StoreError> {
        if let Some(records) = self.inner.lock().entities.get_mut(entity) {
            records.remove(key);
        }
        Ok(())
    }

    fn query(&self, entity: &str, query: &Query) -> Result<Page, StoreError> {
        let inner = self.inner.lock();
        let Some(records) = inner.entities.get(entity) else {
            return Ok(Page::default());
        };

        let mut matches: Vec<(String, Value)> = records
            .iter()
            .filter(|(_, value)| {
                if let Some((field, expected)) = &query.partition {
                    if value.get(field) != Some(expected) {
                        return false;
                    }
                }
                if let Some(expected) = &query.equals {
                    if value.get(&query.index) != Some(expected) {
                        return false;
                    }
                }
                true
            })
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        matches.sort_by(|(ka, va), (kb, vb)| {
            let ordering = cmp_index(va.get(&query.index), vb.get(&query.index))
                .then_with(|| ka.cmp(kb));
            match query.sort {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        // Resume past the cursor position. Cursors are positional on the
        // (index value, key) pair, so they stay valid when earlier records
        // are deleted between pages.
        let start = match &query.cursor {
            None => 0,
            Some(cursor) => {
                let mark: CursorMark = serde_json::from_str(cursor)
                    .map_err(|e| StoreError::BadCursor(e.to_string()))?;
                matches
                    .iter()
                    .position(|(key, value)| {
                        let ordering = cmp_index(value.get(&query.index), Some(&mark.v))
                            .then_with(|| key.as_str().cmp(mark.k.as_str()));
                        match query.sort {
                            SortOrder::Asc => ordering == Ordering::Greater,
                            SortOrder::Desc => ordering == Ordering::Less,
                        }
                    })
                    .unwrap_or(matches.len())
            }
        };

        let limit = if query.limit == 0 { usize::MAX } else { query.limit };
        let end = start.saturating_add(limit).min(matches.len());
        let page: Vec<(String, Value)> = matches[start..end].to_vec();

        let next_cursor = if end < matches.len() {
            page.last().map(|(key, value)| {
                serde_json::to_string(&CursorMark {
                    v: value.get(&query.index).cloned().unwrap_or(Value::Null),
                    k: key.clone(),
                })
                .unwrap_or_default()
            })
        } else {
            None
        };

        Ok(Page { results: page, next_cursor })
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
struct CursorMark {
    v: Value,
    k: String,
}

/// Total order over index values: null < bool < number < string < other.
fn cmp_index(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(v: Option<&Value>) -> u8 {
        match v {
            None | Some(Value::Null) => 0,
            Some(Value::Bool(_)) => 1,
            Some(Value::Number(_)) => 2,
            Some(Value::String(_)) => 3,
            Some(_) => 4,
        }
    }
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
