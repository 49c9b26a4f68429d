// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! REST client for the scanning service
//!
//! The service speaks OData-flavored query strings: `$top`, `$filter`,
//! `$select`. Findings are fetched per target with the three boolean-OR
//! clauses built upstream, plus `ExternalId eq null` so findings already
//! linked to a ticket never come back.

use super::check_status;
use crate::scan::{FindingPatch, FindingsQuery, NamedItem, ScanService, ServiceError};
use async_trait::async_trait;
use reqwest::Client;
use sb_core::{Finding, FindingId, Severity, TargetId};
use serde::Deserialize;
use std::time::Duration;

const SERVICE: &str = "scan";
const CLIENT_TYPE: &str = "scan-bridge-1.0";

pub struct HttpScanService {
    client: Client,
}

impl HttpScanService {
    pub fn new() -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LoginResponse {
    token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ItemsEnvelope<T> {
    items: Vec<T>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct NamedDto {
    id: String,
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FindingDto {
    id: String,
    application_id: String,
    severity: String,
    issue_type: String,
    issue_type_id: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    scan_name: String,
    #[serde(default)]
    cwe: Option<String>,
    #[serde(default)]
    cvss: Option<f64>,
    #[serde(default)]
    discovery_method: String,
    #[serde(default)]
    date_created: String,
    #[serde(default)]
    last_updated: String,
    #[serde(default)]
    last_found: String,
}

impl FindingDto {
    fn into_finding(self) -> Finding {
        let severity = match self.severity.as_str() {
            "Critical" => Severity::Critical,
            "High" => Severity::High,
            "Medium" => Severity::Medium,
            "Low" => Severity::Low,
            "Informational" => Severity::Informational,
            other => {
                tracing::warn!(severity = other, finding = %self.id, "unknown severity, treating as informational");
                Severity::Informational
            }
        };
        Finding {
            id: FindingId::new(self.id),
            target_id: TargetId::new(self.application_id),
            severity,
            issue_type: self.issue_type,
            issue_type_id: self.issue_type_id,
            location: self.location,
            scan_name: self.scan_name,
            cwe: self.cwe,
            cvss: self.cvss,
            discovery_method: self.discovery_method,
            date_created: self.date_created,
            last_updated: self.last_updated,
            last_found: self.last_found,
        }
    }
}

#[async_trait]
impl ScanService for HttpScanService {
    async fn authenticate(
        &self,
        base_url: &str,
        key_id: &str,
        key_secret: &str,
    ) -> Result<String, ServiceError> {
        let response = self
            .client
            .post(format!("{base_url}/api/v4/Account/ApiKeyLogin"))
            .header("ClientType", CLIENT_TYPE)
            .json(&serde_json::json!({
                "KeyId": key_id,
                "KeySecret": key_secret,
                "ClientType": CLIENT_TYPE,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ServiceError::Authentication);
        }
        let login: LoginResponse = response.json().await?;
        Ok(login.token)
    }

    async fn list_targets(
        &self,
        base_url: &str,
        token: &str,
    ) -> Result<Vec<NamedItem>, ServiceError> {
        let response = self
            .client
            .get(format!("{base_url}/api/v4/Apps"))
            .query(&[("$top", "5000"), ("$select", "Id,Name"), ("$count", "false")])
            .bearer_auth(token)
            .send()
            .await?;
        let envelope: ItemsEnvelope<NamedDto> = check_status(SERVICE, response).await?.json().await?;
        Ok(envelope
            .items
            .into_iter()
            .map(|dto| NamedItem { id: dto.id, name: dto.name })
            .collect())
    }

    async fn list_policies(
        &self,
        base_url: &str,
        token: &str,
    ) -> Result<Vec<NamedItem>, ServiceError> {
        let response = self
            .client
            .get(format!("{base_url}/api/v4/Policies"))
            .query(&[("$top", "100"), ("$select", "Id,Name"), ("$count", "false")])
            .bearer_auth(token)
            .send()
            .await?;
        let envelope: ItemsEnvelope<NamedDto> = check_status(SERVICE, response).await?.json().await?;
        Ok(envelope
            .items
            .into_iter()
            .map(|dto| NamedItem { id: dto.id, name: dto.name })
            .collect())
    }

    async fn list_findings(
        &self,
        base_url: &str,
        token: &str,
        query: &FindingsQuery,
    ) -> Result<Vec<Finding>, ServiceError> {
        let mut request = self
            .client
            .get(format!("{base_url}/api/v4/Issues/Application/{}", query.target_id));

        request = match &query.policy_ids {
            Some(ids) => {
                let mut params: Vec<(&str, String)> =
                    vec![("applyPolicies", "Select".to_string())];
                params.extend(ids.iter().map(|id| ("selectPolicyIds", id.to_string())));
                request.query(&params)
            }
            None => request.query(&[("applyPolicies", "All")]),
        };

        let filter = format!(
            "({}) and ({}) and ({}) and ExternalId eq null",
            query.status_filter, query.severity_filter, query.scan_type_filter
        );
        let response = request
            .query(&[
                ("$top", query.max_items.to_string()),
                ("$filter", filter),
                ("$count", "true".to_string()),
            ])
            .bearer_auth(token)
            .send()
            .await?;

        let envelope: ItemsEnvelope<FindingDto> =
            check_status(SERVICE, response).await?.json().await?;
        Ok(envelope.items.into_iter().map(FindingDto::into_finding).collect())
    }

    async fn fetch_finding_detail(
        &self,
        base_url: &str,
        token: &str,
        finding_id: &FindingId,
    ) -> Result<Vec<u8>, ServiceError> {
        let response = self
            .client
            .get(format!("{base_url}/api/v4/Issues/{finding_id}/Details"))
            .query(&[("locale", "en-US")])
            .header("Accept", "text/html")
            .bearer_auth(token)
            .send()
            .await?;
        let bytes = check_status(SERVICE, response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn update_finding(
        &self,
        base_url: &str,
        token: &str,
        target_id: &TargetId,
        finding_id: &FindingId,
        patch: &FindingPatch,
    ) -> Result<(), ServiceError> {
        let mut body = serde_json::Map::new();
        if let Some(external_ref) = &patch.external_ref {
            body.insert("ExternalId".to_string(), serde_json::json!(external_ref));
        }
        if let Some(status) = &patch.status {
            body.insert("Status".to_string(), serde_json::json!(status));
        }
        body.insert("Comment".to_string(), serde_json::json!(patch.comment));

        let response = self
            .client
            .put(format!("{base_url}/api/v4/Issues/Application/{target_id}"))
            .query(&[("odataFilter", format!("Id eq {finding_id}"))])
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        check_status(SERVICE, response).await?;
        Ok(())
    }
}
