// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Import filter and recurring-schedule configuration
//!
//! Both records are written by the configuration UI (out of scope here) and
//! read by the pipeline. `ImportFilterConfig::validate` runs at save time so
//! a bad severity mapping fails fast instead of surfacing mid-run.

use crate::id::{PolicyId, TargetId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Configuration validation errors, surfaced at save time
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no destination priority mapped for severity '{0}'")]
    UnmappedSeverity(Severity),
    #[error("destination priority for severity '{0}' is empty")]
    EmptyPriority(Severity),
    #[error("destination project is not set")]
    MissingProject,
    #[error("destination issue type is not set")]
    MissingIssueType,
    #[error("no statuses selected for import")]
    NoStatuses,
    #[error("no severities selected for import")]
    NoSeverities,
}

/// Finding severity as reported by the scanning service.
///
/// Enum-keyed so the severity → destination-priority table cannot be probed
/// with a misspelled string key at usage time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Informational,
}

impl Severity {
    /// Name used in scanning-service filter expressions.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Informational => "Informational",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which targets a run covers.
///
/// The `All` sentinel and an empty explicit list both expand to every
/// target known to the scanning service. A partial explicit list that also
/// contains the sentinel expands to all targets as well, silently
/// discarding the partial selection; this mirrors the observed behavior of
/// the configuration UI and is kept as documented behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetSelection {
    All,
    Explicit(Vec<TargetId>),
}

impl TargetSelection {
    /// True when the selection expands to the full target enumeration.
    pub fn wants_all(&self) -> bool {
        match self {
            TargetSelection::All => true,
            TargetSelection::Explicit(ids) => ids.is_empty(),
        }
    }
}

/// Filter and destination settings for one import run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportFilterConfig {
    pub targets: TargetSelection,
    /// Finding statuses to include (e.g. "Open", "New")
    pub statuses: Vec<String>,
    /// Severities to include
    pub severities: Vec<Severity>,
    /// Scan discovery methods to include (e.g. "DAST", "SAST")
    pub scan_types: Vec<String>,
    /// Optional policy allow-list; `None` applies all policies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_ids: Option<Vec<PolicyId>>,
    /// Destination project id in the ticketing system
    pub project_id: String,
    /// Destination issue type id in the ticketing system
    pub issue_type_id: String,
    /// Severity → destination priority name
    pub priority_map: BTreeMap<Severity, String>,
}

impl ImportFilterConfig {
    /// Validate at save time: every selected severity must map to a
    /// non-empty destination priority, and the destination must be set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.statuses.is_empty() {
            return Err(ConfigError::NoStatuses);
        }
        if self.severities.is_empty() {
            return Err(ConfigError::NoSeverities);
        }
        if self.project_id.is_empty() {
            return Err(ConfigError::MissingProject);
        }
        if self.issue_type_id.is_empty() {
            return Err(ConfigError::MissingIssueType);
        }
        for severity in &self.severities {
            match self.priority_map.get(severity) {
                None => return Err(ConfigError::UnmappedSeverity(*severity)),
                Some(name) if name.is_empty() => {
                    return Err(ConfigError::EmptyPriority(*severity))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// Scanning-service API credentials, held in secret-scoped storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Scanning service base URL
    pub url: String,
    pub key_id: String,
    pub key_secret: String,
}

/// How often the recurring import fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleFrequency {
    Hourly,
    Daily,
    Weekly,
    Monthly,
}

/// Recurring-schedule parameters for the scheduled trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub frequency: ScheduleFrequency,
    /// Configured UTC hour of day (0-23)
    pub hour: u32,
    /// Configured UTC minute of hour (0-59)
    pub minute: u32,
    /// Weekday for weekly schedules (0 = Sunday, matching the source UI)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday: Option<u32>,
    /// Day of month for monthly schedules (1-31)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u32>,
    /// Per-target item cap handed to the timer worker
    pub max_items: u32,
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
