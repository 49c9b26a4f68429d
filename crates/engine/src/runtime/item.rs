// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Item worker: creates one ticket per finding and records the outcome
//!
//! Side effects run strictly in order: create the ticket, tag it for the
//! status-sync collaborator, back-link the source finding, attach the
//! detail report, and only then persist the outcome record. A failure at
//! any step yields a failed record instead of an engine error, so one bad
//! finding never stalls the rest of the run.

use super::Runtime;
use crate::error::RuntimeError;
use sb_adapters::queue::DelayedQueue;
use sb_adapters::scan::{FindingPatch, ScanService};
use sb_adapters::ticket::{TicketFields, TicketService};
use sb_core::{Clock, Finding, ItemMsg, OutcomeRecord, TicketRef, WorkMessage};
use sb_storage::outcomes;
use tracing::{info, warn};

/// Label applied to every created ticket
const IMPORT_LABEL: &str = "scan-import";

/// Entity property tying a ticket back to its scan target, read by the
/// bidirectional status-sync collaborator
const TARGET_PROPERTY_KEY: &str = "scan-bridge-target";

impl<S, T, Q, C> Runtime<S, T, Q, C>
where
    S: ScanService,
    T: TicketService,
    Q: DelayedQueue,
    C: Clock,
{
    pub(crate) async fn handle_item(&self, msg: ItemMsg) -> Result<(), RuntimeError> {
        let chained = self
            .resume_later(msg.remaining_delay, |remaining| {
                WorkMessage::Item(ItemMsg { remaining_delay: remaining, ..msg.clone() })
            })
            .await?;
        if chained {
            return Ok(());
        }

        let (succeeded, error_detail) = match self.process_item(&msg).await {
            Ok(ticket) => {
                info!(
                    run_id = %msg.run_id,
                    finding_id = %msg.finding.id,
                    ticket = %ticket,
                    "ticket created for finding"
                );
                (true, None)
            }
            Err(error) => {
                warn!(
                    run_id = %msg.run_id,
                    finding_id = %msg.finding.id,
                    %error,
                    "finding import failed"
                );
                (false, Some(error.to_string()))
            }
        };

        let record = OutcomeRecord {
            run_id: msg.run_id.clone(),
            target_id: msg.target_id.clone(),
            finding_id: msg.finding.id.clone(),
            occurred_at_ms: msg.launched_at_ms,
            succeeded,
            run_kind: msg.run_kind,
            batch: msg.batch,
            error_detail,
        };
        outcomes::append(&*self.store, &record)?;
        Ok(())
    }

    async fn process_item(&self, msg: &ItemMsg) -> Result<TicketRef, RuntimeError> {
        let finding = &msg.finding;
        let priority_name = msg
            .destination
            .priority_map
            .get(&finding.severity)
            .ok_or(RuntimeError::UnmappedSeverity(finding.severity))?;

        // TODO: cache the priority catalog per run instead of fetching it
        // for every item
        let priorities = self.tickets.list_priorities().await?;
        let priority_id = priorities
            .iter()
            .find(|priority| &priority.name == priority_name)
            .map(|priority| priority.id.clone())
            .ok_or_else(|| RuntimeError::UnknownPriority(priority_name.clone()))?;

        let fields = TicketFields {
            project_id: msg.destination.project_id.clone(),
            issue_type_id: msg.destination.issue_type_id.clone(),
            summary: format!(
                "Security issue: {} found by {}",
                finding.issue_type, finding.discovery_method
            ),
            description: ticket_description(finding, &msg.scan_url),
            priority_id,
            labels: vec![IMPORT_LABEL.to_string()],
        };
        let ticket = self.tickets.create_ticket(&fields).await?;

        self.tickets
            .set_ticket_property(
                &ticket,
                TARGET_PROPERTY_KEY,
                serde_json::json!({ "targetId": msg.target_id.as_str() }),
            )
            .await?;

        let patch = FindingPatch {
            external_ref: Some(ticket.as_str().to_string()),
            status: None,
            comment: format!("Ticket {}/browse/{} created for this issue", msg.ticket_base_url, ticket),
        };
        self.scan
            .update_finding(&msg.scan_url, &msg.auth_token, &msg.target_id, &finding.id, &patch)
            .await?;

        let detail = self
            .scan
            .fetch_finding_detail(&msg.scan_url, &msg.auth_token, &finding.id)
            .await?;
        self.tickets
            .upload_attachment(&ticket, &format!("{}_details.html", finding.id), detail)
            .await?;

        Ok(ticket)
    }
}

/// Ticket body built from the finding metadata, closed by a link to the
/// scanning service's remediation article for the issue type
fn ticket_description(finding: &Finding, scan_url: &str) -> String {
    let mut lines = vec![
        format!("Issue id: {}", finding.id),
        format!("Location: {}", finding.location),
        format!("Severity: {}", finding.severity),
        format!("Scan: {}", finding.scan_name),
        format!("Discovery method: {}", finding.discovery_method),
    ];
    if let Some(cwe) = &finding.cwe {
        lines.push(format!("CWE: {cwe}"));
    }
    if let Some(cvss) = finding.cvss {
        lines.push(format!("CVSS: {cvss}"));
    }
    lines.push(format!("First found: {}", finding.date_created));
    lines.push(format!("Last updated: {}", finding.last_updated));
    lines.push(format!("Last found: {}", finding.last_found));
    lines.push(format!(
        "Remediation guidance: {}/api/v4/Reports/Article/?issuetype={}&nl=en",
        scan_url, finding.issue_type_id
    ));
    lines.join("\n")
}

#[cfg(test)]
#[path = "item_tests.rs"]
mod tests;
