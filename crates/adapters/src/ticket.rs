// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ticketing-system seam

use crate::scan::{NamedItem, ServiceError};
use async_trait::async_trait;
use sb_core::TicketRef;
use serde::{Deserialize, Serialize};

/// Fields for a new ticket, assembled by the item worker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketFields {
    pub project_id: String,
    pub issue_type_id: String,
    pub summary: String,
    pub description: String,
    pub priority_id: String,
    pub labels: Vec<String>,
}

/// The destination ticketing system
#[async_trait]
pub trait TicketService: Send + Sync {
    /// Base URL of the ticketing site, used to build back-link comments
    async fn base_url(&self) -> Result<String, ServiceError>;

    async fn list_projects(&self) -> Result<Vec<NamedItem>, ServiceError>;

    /// Priority catalog: name → id resolution happens against this
    async fn list_priorities(&self) -> Result<Vec<NamedItem>, ServiceError>;

    async fn list_issue_types(&self, project_id: &str) -> Result<Vec<NamedItem>, ServiceError>;

    async fn create_ticket(&self, fields: &TicketFields) -> Result<TicketRef, ServiceError>;

    /// Tag the ticket with an entity property (read later by the
    /// bidirectional status-sync collaborator)
    async fn set_ticket_property(
        &self,
        ticket: &TicketRef,
        key: &str,
        value: serde_json::Value,
    ) -> Result<(), ServiceError>;

    async fn upload_attachment(
        &self,
        ticket: &TicketRef,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ServiceError>;
}
