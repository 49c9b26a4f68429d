// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ticketing-system fake

use crate::scan::{NamedItem, ServiceError};
use crate::ticket::{TicketFields, TicketService};
use async_trait::async_trait;
use parking_lot::Mutex;
use sb_core::TicketRef;
use std::sync::Arc;

/// One ticket created against the fake, with everything attached to it
#[derive(Debug, Clone)]
pub struct CreatedTicket {
    pub ticket: TicketRef,
    pub fields: TicketFields,
    pub properties: Vec<(String, serde_json::Value)>,
    pub attachments: Vec<(String, usize)>,
}

#[derive(Default)]
struct FakeTicketState {
    priorities: Vec<NamedItem>,
    projects: Vec<NamedItem>,
    issue_types: Vec<NamedItem>,
    created: Vec<CreatedTicket>,
    /// Reject ticket creation when the summary contains this marker
    fail_summary_marker: Option<String>,
    counter: u32,
}

#[derive(Clone, Default)]
pub struct FakeTicketService {
    state: Arc<Mutex<FakeTicketState>>,
}

impl FakeTicketService {
    /// Fake preloaded with the standard five-priority catalog
    pub fn new() -> Self {
        let service = Self::default();
        for (id, name) in [
            ("1", "Highest"),
            ("2", "High"),
            ("3", "Medium"),
            ("4", "Low"),
            ("5", "Lowest"),
        ] {
            service.add_priority(id, name);
        }
        service
    }

    pub fn add_priority(&self, id: &str, name: &str) {
        self.state
            .lock()
            .priorities
            .push(NamedItem { id: id.to_string(), name: name.to_string() });
    }

    pub fn add_project(&self, id: &str, name: &str) {
        self.state
            .lock()
            .projects
            .push(NamedItem { id: id.to_string(), name: name.to_string() });
    }

    /// Make `create_ticket` fail whenever the summary contains `marker`
    pub fn fail_summaries_containing(&self, marker: &str) {
        self.state.lock().fail_summary_marker = Some(marker.to_string());
    }

    pub fn created(&self) -> Vec<CreatedTicket> {
        self.state.lock().created.clone()
    }
}

#[async_trait]
impl TicketService for FakeTicketService {
    async fn base_url(&self) -> Result<String, ServiceError> {
        Ok("https://tickets.test".to_string())
    }

    async fn list_projects(&self) -> Result<Vec<NamedItem>, ServiceError> {
        Ok(self.state.lock().projects.clone())
    }

    async fn list_priorities(&self) -> Result<Vec<NamedItem>, ServiceError> {
        Ok(self.state.lock().priorities.clone())
    }

    async fn list_issue_types(&self, _project_id: &str) -> Result<Vec<NamedItem>, ServiceError> {
        Ok(self.state.lock().issue_types.clone())
    }

    async fn create_ticket(&self, fields: &TicketFields) -> Result<TicketRef, ServiceError> {
        let mut state = self.state.lock();
        if let Some(marker) = &state.fail_summary_marker {
            if fields.summary.contains(marker) {
                return Err(ServiceError::Api {
                    service: "ticket",
                    status: 400,
                    message: "rejected by fake".to_string(),
                });
            }
        }
        state.counter += 1;
        let ticket = TicketRef::new(format!("SEC-{}", state.counter));
        state.created.push(CreatedTicket {
            ticket: ticket.clone(),
            fields: fields.clone(),
            properties: Vec::new(),
            attachments: Vec::new(),
        });
        Ok(ticket)
    }

    async fn set_ticket_property(
        &self,
        ticket: &TicketRef,
        key: &str,
        value: serde_json::Value,
    ) -> Result<(), ServiceError> {
        let mut state = self.state.lock();
        let found = state.created.iter_mut().find(|c| &c.ticket == ticket);
        match found {
            Some(created) => {
                created.properties.push((key.to_string(), value));
                Ok(())
            }
            None => Err(ServiceError::Api {
                service: "ticket",
                status: 404,
                message: format!("no such ticket {ticket}"),
            }),
        }
    }

    async fn upload_attachment(
        &self,
        ticket: &TicketRef,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ServiceError> {
        let mut state = self.state.lock();
        let found = state.created.iter_mut().find(|c| &c.ticket == ticket);
        match found {
            Some(created) => {
                created.attachments.push((filename.to_string(), bytes.len()));
                Ok(())
            }
            None => Err(ServiceError::Api {
                service: "ticket",
                status: 404,
                message: format!("no such ticket {ticket}"),
            }),
        }
    }
}
