// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    single = { &["Open"][..], "Status eq 'Open'" },
    pair = { &["Open", "New"][..], "Status eq 'Open' or Status eq 'New'" },
    empty = { &[][..], "" },
)]
fn builds_or_clause(values: &[&str], expected: &str) {
    assert_eq!(or_clause("Status", values), expected);
}

#[test]
fn three_values_join_with_or() {
    let clause = or_clause("Severity", &["Critical", "High", "Medium"]);
    assert_eq!(
        clause,
        "Severity eq 'Critical' or Severity eq 'High' or Severity eq 'Medium'"
    );
}
