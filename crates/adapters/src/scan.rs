// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scanning-service seam

use async_trait::async_trait;
use sb_core::{Finding, FindingId, PolicyId, TargetId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the external REST services
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Bad or expired credentials; surfaced to the caller, never retried
    #[error("authentication failed")]
    Authentication,
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{service} rejected the request ({status}): {message}")]
    Api { service: &'static str, status: u16, message: String },
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Id/name pair for targets and policies (picker data)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedItem {
    pub id: String,
    pub name: String,
}

/// Findings fetch parameters built by the timer worker
#[derive(Debug, Clone, PartialEq)]
pub struct FindingsQuery {
    pub target_id: TargetId,
    pub status_filter: String,
    pub severity_filter: String,
    pub scan_type_filter: String,
    /// `None` applies all policies
    pub policy_ids: Option<Vec<PolicyId>>,
    pub max_items: u32,
}

/// Mutation applied to a source finding after ticket creation (back-link)
/// or by the status-sync collaborator (status change)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FindingPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub comment: String,
}

/// The vulnerability-scanning service.
///
/// `base_url` and `token` ride on every call because workers carry them in
/// their messages rather than holding a session across invocations.
#[async_trait]
pub trait ScanService: Send + Sync {
    /// Exchange API key credentials for a bearer token
    async fn authenticate(
        &self,
        base_url: &str,
        key_id: &str,
        key_secret: &str,
    ) -> Result<String, ServiceError>;

    async fn list_targets(&self, base_url: &str, token: &str)
        -> Result<Vec<NamedItem>, ServiceError>;

    async fn list_policies(
        &self,
        base_url: &str,
        token: &str,
    ) -> Result<Vec<NamedItem>, ServiceError>;

    /// Fetch candidate findings for one target. Implementations must
    /// exclude findings that already carry an external link, so repeated
    /// runs do not create duplicate tickets.
    async fn list_findings(
        &self,
        base_url: &str,
        token: &str,
        query: &FindingsQuery,
    ) -> Result<Vec<Finding>, ServiceError>;

    /// Detail report for one finding, as attachable bytes
    async fn fetch_finding_detail(
        &self,
        base_url: &str,
        token: &str,
        finding_id: &FindingId,
    ) -> Result<Vec<u8>, ServiceError>;

    async fn update_finding(
        &self,
        base_url: &str,
        token: &str,
        target_id: &TargetId,
        finding_id: &FindingId,
        patch: &FindingPatch,
    ) -> Result<(), ServiceError>;
}
