use super::*;
use crate::storage::MemoryStore;

// =============================================================
// Helpers
// =============================================================

const KEY: &str = "test_attending";

fn core() -> AttendanceCore<MemoryStore> {
    AttendanceCore::new(MemoryStore::new(), KEY)
}

fn stored(core: &AttendanceCore<MemoryStore>) -> Vec<String> {
    core.store
        .get(KEY)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

// =============================================================
// Conference id derivation
// =============================================================

#[test]
fn id_from_detail_path() {
    assert_eq!(conference_id_from_path("/conference/rustconf"), "rustconf");
}

#[test]
fn id_stops_at_next_segment() {
    assert_eq!(
        conference_id_from_path("/conference/rustconf/speakers"),
        "rustconf"
    );
}

#[test]
fn id_is_percent_decoded() {
    assert_eq!(
        conference_id_from_path("/conference/rust%20conf%202026"),
        "rust conf 2026"
    );
}

#[test]
fn non_conference_path_yields_empty_id() {
    assert_eq!(conference_id_from_path("/explore"), "");
    assert_eq!(conference_id_from_path("/"), "");
    assert_eq!(conference_id_from_path(""), "");
}

#[test]
fn trailing_marker_without_segment_yields_empty_id() {
    assert_eq!(conference_id_from_path("/conference/"), "");
}

// =============================================================
// Percent decoding
// =============================================================

#[test]
fn percent_decode_plain_text_is_unchanged() {
    assert_eq!(percent_decode("rustconf"), "rustconf");
}

#[test]
fn percent_decode_handles_upper_and_lower_hex() {
    assert_eq!(percent_decode("a%2Fb%2fc"), "a/b/c");
}

#[test]
fn percent_decode_keeps_invalid_escapes_literal() {
    assert_eq!(percent_decode("100%zz"), "100%zz");
    assert_eq!(percent_decode("%"), "%");
    assert_eq!(percent_decode("%4"), "%4");
}

#[test]
fn percent_decode_utf8_sequences() {
    assert_eq!(percent_decode("caf%C3%A9"), "caf\u{e9}");
}

// =============================================================
// AttendanceCore
// =============================================================

#[test]
fn initially_not_attending() {
    assert!(!core().is_attending("rustconf"));
}

#[test]
fn toggle_adds_then_removes() {
    let core = core();
    assert!(core.toggle("rustconf"));
    assert!(core.is_attending("rustconf"));
    assert!(!core.toggle("rustconf"));
    assert!(!core.is_attending("rustconf"));
}

#[test]
fn toggle_twice_is_an_involution() {
    let core = core();
    core.toggle("rustconf");
    core.toggle("rustconf");
    assert_eq!(stored(&core), Vec::<String>::new());
}

#[test]
fn toggle_never_duplicates_ids() {
    let core = core();
    core.toggle("a");
    core.toggle("b");
    core.toggle("a");
    core.toggle("a");
    let list = stored(&core);
    assert_eq!(list.iter().filter(|x| *x == "a").count(), 1);
    assert_eq!(list.iter().filter(|x| *x == "b").count(), 1);
}

#[test]
fn toggle_only_removes_the_named_id() {
    let core = core();
    core.toggle("a");
    core.toggle("b");
    core.toggle("a");
    assert!(!core.is_attending("a"));
    assert!(core.is_attending("b"));
}

#[test]
fn empty_id_is_a_functional_key() {
    let core = core();
    assert!(core.toggle(""));
    assert!(core.is_attending(""));
    assert!(!core.toggle(""));
}

#[test]
fn malformed_stored_json_reads_as_empty_set() {
    let core = core();
    core.store.set(KEY, "not-json");
    assert!(!core.is_attending("rustconf"));
    // A toggle rebuilds a clean list over the garbage.
    assert!(core.toggle("rustconf"));
    assert_eq!(stored(&core), vec!["rustconf".to_string()]);
}

#[test]
fn persisted_form_is_a_json_array() {
    let core = core();
    core.toggle("rustconf");
    assert_eq!(core.store.get(KEY), Some(r#"["rustconf"]"#.to_string()));
}

// =============================================================
// Button view
// =============================================================

#[test]
fn attending_state_is_secondary_with_checkmark() {
    let view = button_view(true);
    assert_eq!(view.label, "Attending \u{2713}");
    assert!(!view.primary);
}

#[test]
fn not_attending_state_is_the_call_to_action() {
    let view = button_view(false);
    assert_eq!(view.label, "I'm Attending");
    assert!(view.primary);
}
