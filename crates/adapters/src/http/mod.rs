// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! reqwest-backed clients for the two REST services

mod scan;
mod ticket;

pub use scan::HttpScanService;
pub use ticket::HttpTicketService;

use crate::scan::ServiceError;
use reqwest::Response;

/// Map a non-success response to `ServiceError::Api` with the body text as
/// the message (the services put their error detail in the body).
pub(crate) async fn check_status(
    service: &'static str,
    response: Response,
) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(ServiceError::Api { service, status: status.as_u16(), message })
}
