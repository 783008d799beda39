use super::*;

// =============================================================
// DOM-ready gate
// =============================================================

#[test]
fn defers_while_the_document_is_still_parsing() {
    assert!(should_defer("loading"));
}

#[test]
fn mounts_immediately_once_the_dom_is_queryable() {
    assert!(!should_defer("interactive"));
    assert!(!should_defer("complete"));
}

#[test]
fn unknown_ready_state_mounts_immediately() {
    assert!(!should_defer(""));
}
