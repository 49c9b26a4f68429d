// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scanning-service fake

use crate::scan::{FindingPatch, FindingsQuery, NamedItem, ScanService, ServiceError};
use async_trait::async_trait;
use parking_lot::Mutex;
use sb_core::{Finding, FindingId, TargetId};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
struct FakeScanState {
    targets: Vec<NamedItem>,
    policies: Vec<NamedItem>,
    findings: HashMap<TargetId, Vec<Finding>>,
    /// Findings already linked to a ticket; excluded from list results
    linked: HashMap<FindingId, String>,
    patches: Vec<(FindingId, FindingPatch)>,
    queries: Vec<FindingsQuery>,
    reject_credentials: bool,
}

/// In-memory scanning service. Findings registered per target come back
/// from `list_findings` until a patch links them to an external ticket.
#[derive(Clone, Default)]
pub struct FakeScanService {
    state: Arc<Mutex<FakeScanState>>,
}

impl FakeScanService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_target(&self, id: &str, name: &str) {
        self.state
            .lock()
            .targets
            .push(NamedItem { id: id.to_string(), name: name.to_string() });
    }

    pub fn add_policy(&self, id: &str, name: &str) {
        self.state
            .lock()
            .policies
            .push(NamedItem { id: id.to_string(), name: name.to_string() });
    }

    pub fn add_finding(&self, finding: Finding) {
        self.state
            .lock()
            .findings
            .entry(finding.target_id.clone())
            .or_default()
            .push(finding);
    }

    /// Pretend a previous run already created a ticket for this finding
    pub fn mark_linked(&self, finding_id: &FindingId, ticket: &str) {
        self.state.lock().linked.insert(finding_id.clone(), ticket.to_string());
    }

    /// Reject the next and all further authentication attempts
    pub fn reject_credentials(&self) {
        self.state.lock().reject_credentials = true;
    }

    /// Patches applied via `update_finding`, in call order
    pub fn patches(&self) -> Vec<(FindingId, FindingPatch)> {
        self.state.lock().patches.clone()
    }

    /// Findings queries received, in call order
    pub fn queries(&self) -> Vec<FindingsQuery> {
        self.state.lock().queries.clone()
    }
}

#[async_trait]
impl ScanService for FakeScanService {
    async fn authenticate(
        &self,
        _base_url: &str,
        key_id: &str,
        _key_secret: &str,
    ) -> Result<String, ServiceError> {
        let state = self.state.lock();
        if state.reject_credentials {
            return Err(ServiceError::Authentication);
        }
        Ok(format!("token-{key_id}"))
    }

    async fn list_targets(
        &self,
        _base_url: &str,
        _token: &str,
    ) -> Result<Vec<NamedItem>, ServiceError> {
        Ok(self.state.lock().targets.clone())
    }

    async fn list_policies(
        &self,
        _base_url: &str,
        _token: &str,
    ) -> Result<Vec<NamedItem>, ServiceError> {
        Ok(self.state.lock().policies.clone())
    }

    async fn list_findings(
        &self,
        _base_url: &str,
        _token: &str,
        query: &FindingsQuery,
    ) -> Result<Vec<Finding>, ServiceError> {
        let mut state = self.state.lock();
        state.queries.push(query.clone());
        let findings = state
            .findings
            .get(&query.target_id)
            .map(|all| {
                all.iter()
                    .filter(|f| !state.linked.contains_key(&f.id))
                    .take(query.max_items as usize)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(findings)
    }

    async fn fetch_finding_detail(
        &self,
        _base_url: &str,
        _token: &str,
        finding_id: &FindingId,
    ) -> Result<Vec<u8>, ServiceError> {
        Ok(format!("<html>detail for {finding_id}</html>").into_bytes())
    }

    async fn update_finding(
        &self,
        _base_url: &str,
        _token: &str,
        _target_id: &TargetId,
        finding_id: &FindingId,
        patch: &FindingPatch,
    ) -> Result<(), ServiceError> {
        let mut state = self.state.lock();
        if let Some(external_ref) = &patch.external_ref {
            state.linked.insert(finding_id.clone(), external_ref.clone());
        }
        state.patches.push((finding_id.clone(), patch.clone()));
        Ok(())
    }
}
