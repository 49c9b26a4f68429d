// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn external_id_display_and_deref() {
    let id = TargetId::new("app-42");
    assert_eq!(id.to_string(), "app-42");
    assert_eq!(id.as_str(), "app-42");
    assert!(!id.is_empty());
}

#[test]
fn external_id_from_str_and_string() {
    let a: FindingId = "f-1".into();
    let b: FindingId = String::from("f-1").into();
    assert_eq!(a, b);
}

#[test]
fn external_id_serde_transparent() {
    let id = TicketRef::new("PROJ-7");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"PROJ-7\"");
    let parsed: TicketRef = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn run_id_generate_is_uuid_shaped() {
    let id = RunId::generate();
    // uuid v4 text form: 36 chars, 4 hyphens
    assert_eq!(id.as_str().len(), 36);
    assert_eq!(id.as_str().matches('-').count(), 4);
}

#[test]
fn run_id_generate_is_unique() {
    assert_ne!(RunId::generate(), RunId::generate());
}

#[test]
fn outcome_key_has_prefix_and_fits_inline() {
    let key = OutcomeKey::generate();
    assert!(key.as_str().starts_with(OutcomeKey::PREFIX));
    assert_eq!(key.as_str().len(), 23);
}

#[test]
fn outcome_key_round_trips_through_json() {
    let key = OutcomeKey::generate();
    let json = serde_json::to_string(&key).unwrap();
    let parsed: OutcomeKey = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, key);
}
