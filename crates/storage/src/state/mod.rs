// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed accessors over the raw store for the run ledger

pub mod outcomes;
pub mod status;
pub mod summaries;
