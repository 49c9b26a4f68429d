// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Boolean-OR filter expressions for the scanning-service findings query

/// Build an OR clause over an inclusion set, e.g.
/// `Status eq 'Open' or Status eq 'New'`.
///
/// Returns an empty string for an empty set; callers treat that as "no
/// constraint" when assembling the full filter.
pub fn or_clause<S: AsRef<str>>(field: &str, values: &[S]) -> String {
    values
        .iter()
        .map(|v| format!("{} eq '{}'", field, v.as_ref()))
        .collect::<Vec<_>>()
        .join(" or ")
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
