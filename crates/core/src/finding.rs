// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Finding metadata carried from the scanning service into ticket fields

use crate::config::Severity;
use crate::id::{FindingId, TargetId};
use serde::{Deserialize, Serialize};

/// One security issue as returned by the scanning service.
///
/// Carries everything the item worker needs to build the ticket summary and
/// description, so no refetch is required downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub id: FindingId,
    pub target_id: TargetId,
    pub severity: Severity,
    /// Issue type name (e.g. "SQL Injection")
    pub issue_type: String,
    /// Issue type id, used for the recommendation article link
    pub issue_type_id: String,
    pub location: String,
    pub scan_name: String,
    pub cwe: Option<String>,
    pub cvss: Option<f64>,
    /// Scanner discovery method (e.g. "DAST")
    pub discovery_method: String,
    pub date_created: String,
    pub last_updated: String,
    pub last_found: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finding_round_trips_through_json() {
        let finding = Finding {
            id: FindingId::new("f-1"),
            target_id: TargetId::new("app-1"),
            severity: Severity::High,
            issue_type: "SQL Injection".to_string(),
            issue_type_id: "it-42".to_string(),
            location: "https://example.test/login".to_string(),
            scan_name: "nightly".to_string(),
            cwe: Some("CWE-89".to_string()),
            cvss: Some(8.1),
            discovery_method: "DAST".to_string(),
            date_created: "2026-08-01T00:00:00Z".to_string(),
            last_updated: "2026-08-20T00:00:00Z".to_string(),
            last_found: "2026-08-25T00:00:00Z".to_string(),
        };
        let json = serde_json::to_string(&finding).unwrap();
        let parsed: Finding = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, finding);
    }
}
