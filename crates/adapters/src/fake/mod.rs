// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory fakes for engine and pipeline tests

mod queue;
mod scan;
mod ticket;

pub use queue::FakeQueue;
pub use scan::FakeScanService;
pub use ticket::{CreatedTicket, FakeTicketService};
