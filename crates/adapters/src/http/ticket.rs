// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! REST client for the ticketing system

use super::check_status;
use crate::scan::{NamedItem, ServiceError};
use crate::ticket::{TicketFields, TicketService};
use async_trait::async_trait;
use reqwest::Client;
use sb_core::TicketRef;
use serde::Deserialize;
use std::time::Duration;

const SERVICE: &str = "ticket";

pub struct HttpTicketService {
    client: Client,
    base_url: String,
    /// Pre-built Authorization header value (e.g. `Basic ...`)
    auth_header: String,
}

impl HttpTicketService {
    pub fn new(base_url: impl Into<String>, auth_header: impl Into<String>) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, base_url: base_url.into(), auth_header: auth_header.into() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[derive(Deserialize)]
struct ServerInfo {
    #[serde(rename = "baseUrl")]
    base_url: String,
}

#[derive(Deserialize)]
struct IdName {
    id: String,
    name: String,
}

#[derive(Deserialize)]
struct ProjectDetail {
    #[serde(rename = "issueTypes", default)]
    issue_types: Vec<IdName>,
}

#[derive(Deserialize)]
struct CreatedIssue {
    key: String,
}

#[async_trait]
impl TicketService for HttpTicketService {
    async fn base_url(&self) -> Result<String, ServiceError> {
        let response = self
            .client
            .get(self.url("/rest/api/3/serverInfo"))
            .header("Authorization", &self.auth_header)
            .send()
            .await?;
        let info: ServerInfo = check_status(SERVICE, response).await?.json().await?;
        Ok(info.base_url)
    }

    async fn list_projects(&self) -> Result<Vec<NamedItem>, ServiceError> {
        let response = self
            .client
            .get(self.url("/rest/api/2/project"))
            .header("Authorization", &self.auth_header)
            .send()
            .await?;
        let projects: Vec<IdName> = check_status(SERVICE, response).await?.json().await?;
        Ok(projects.into_iter().map(|p| NamedItem { id: p.id, name: p.name }).collect())
    }

    async fn list_priorities(&self) -> Result<Vec<NamedItem>, ServiceError> {
        let response = self
            .client
            .get(self.url("/rest/api/2/priority"))
            .header("Authorization", &self.auth_header)
            .send()
            .await?;
        let priorities: Vec<IdName> = check_status(SERVICE, response).await?.json().await?;
        Ok(priorities.into_iter().map(|p| NamedItem { id: p.id, name: p.name }).collect())
    }

    async fn list_issue_types(&self, project_id: &str) -> Result<Vec<NamedItem>, ServiceError> {
        let response = self
            .client
            .get(self.url(&format!("/rest/api/2/project/{project_id}")))
            .header("Authorization", &self.auth_header)
            .send()
            .await?;
        let detail: ProjectDetail = check_status(SERVICE, response).await?.json().await?;
        Ok(detail
            .issue_types
            .into_iter()
            .map(|t| NamedItem { id: t.id, name: t.name })
            .collect())
    }

    async fn create_ticket(&self, fields: &TicketFields) -> Result<TicketRef, ServiceError> {
        let body = serde_json::json!({
            "fields": {
                "project": { "id": fields.project_id },
                "issuetype": { "id": fields.issue_type_id },
                "summary": fields.summary,
                "description": fields.description,
                "priority": { "id": fields.priority_id },
                "labels": fields.labels,
            }
        });
        let response = self
            .client
            .post(self.url("/rest/api/2/issue"))
            .header("Authorization", &self.auth_header)
            .json(&body)
            .send()
            .await?;
        let created: CreatedIssue = check_status(SERVICE, response).await?.json().await?;
        Ok(TicketRef::new(created.key))
    }

    async fn set_ticket_property(
        &self,
        ticket: &TicketRef,
        key: &str,
        value: serde_json::Value,
    ) -> Result<(), ServiceError> {
        let response = self
            .client
            .put(self.url(&format!("/rest/api/3/issue/{ticket}/properties/{key}")))
            .header("Authorization", &self.auth_header)
            .json(&value)
            .send()
            .await?;
        check_status(SERVICE, response).await?;
        Ok(())
    }

    async fn upload_attachment(
        &self,
        ticket: &TicketRef,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ServiceError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("text/html")?;
        let form = reqwest::multipart::Form::new().part("file", part);
        let response = self
            .client
            .post(self.url(&format!("/rest/api/2/issue/{ticket}/attachments")))
            .header("Authorization", &self.auth_header)
            .header("X-Atlassian-Token", "no-check")
            .multipart(form)
            .send()
            .await?;
        check_status(SERVICE, response).await?;
        Ok(())
    }
}
