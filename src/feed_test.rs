use super::*;
use crate::storage::MemoryStore;

// =============================================================
// Helpers
// =============================================================

const KEY: &str = "test_likes";

fn ledger() -> LikeLedger<MemoryStore> {
    LikeLedger::new(MemoryStore::new(), KEY)
}

// =============================================================
// Identifier resolution
// =============================================================

#[test]
fn id_from_relative_href() {
    assert_eq!(post_id_from_href("/post/42"), Some("42".to_string()));
}

#[test]
fn id_from_absolute_href() {
    assert_eq!(
        post_id_from_href("https://muniverse.example/post/7?ref=feed"),
        Some("7".to_string())
    );
}

#[test]
fn href_without_digits_yields_none() {
    assert_eq!(post_id_from_href("/post/"), None);
    assert_eq!(post_id_from_href("/post/abc"), None);
    assert_eq!(post_id_from_href("/conference/rustconf"), None);
}

#[test]
fn href_skips_non_numeric_marker_and_keeps_searching() {
    assert_eq!(post_id_from_href("/post/new/post/13"), Some("13".to_string()));
}

#[test]
fn id_from_title_hash_token() {
    assert_eq!(post_id_from_title("muniverse | post #42"), Some("42".to_string()));
}

#[test]
fn title_skips_hashes_without_digits() {
    assert_eq!(post_id_from_title("#hashtag then #99"), Some("99".to_string()));
}

#[test]
fn title_without_token_yields_none() {
    assert_eq!(post_id_from_title("muniverse feed"), None);
    assert_eq!(post_id_from_title("trailing #"), None);
}

#[test]
fn resolve_prefers_href_over_title() {
    assert_eq!(
        resolve_post_id(Some("/post/1"), "post #2"),
        Some("1".to_string())
    );
}

#[test]
fn resolve_falls_back_to_title() {
    assert_eq!(resolve_post_id(None, "post #2"), Some("2".to_string()));
    assert_eq!(
        resolve_post_id(Some("/profile/jdoe"), "post #2"),
        Some("2".to_string())
    );
}

#[test]
fn resolve_without_either_signal_skips_the_post() {
    assert_eq!(resolve_post_id(None, "muniverse feed"), None);
}

// =============================================================
// Baseline parsing
// =============================================================

#[test]
fn baseline_parses_heart_prefixed_count() {
    assert_eq!(baseline_likes("\u{2764}\u{fe0f} 12"), 12);
}

#[test]
fn baseline_without_digits_is_zero() {
    assert_eq!(baseline_likes("\u{2764}\u{fe0f}"), 0);
    assert_eq!(baseline_likes(""), 0);
}

#[test]
fn baseline_ignores_interleaved_noise() {
    assert_eq!(baseline_likes(" 1,204 likes "), 1204);
}

// =============================================================
// LikeLedger
// =============================================================

#[test]
fn unknown_post_is_not_liked() {
    assert!(!ledger().liked("42"));
}

#[test]
fn toggle_likes_then_unlikes() {
    let ledger = ledger();
    assert!(ledger.toggle("42"));
    assert!(ledger.liked("42"));
    assert!(!ledger.toggle("42"));
    assert!(!ledger.liked("42"));
}

#[test]
fn toggle_is_scoped_per_post() {
    let ledger = ledger();
    ledger.toggle("1");
    assert!(ledger.liked("1"));
    assert!(!ledger.liked("2"));
}

#[test]
fn unliked_entry_persists_as_explicit_false() {
    let ledger = ledger();
    ledger.toggle("42");
    ledger.toggle("42");
    let raw = ledger.store.get(KEY).unwrap();
    let map: std::collections::HashMap<String, bool> = serde_json::from_str(&raw).unwrap();
    assert_eq!(map.get("42"), Some(&false));
}

#[test]
fn malformed_stored_json_reads_as_empty_map() {
    let ledger = ledger();
    ledger.store.set(KEY, "not-json");
    assert!(!ledger.liked("42"));
    assert!(ledger.toggle("42"));
    assert!(ledger.liked("42"));
}

// =============================================================
// View state
// =============================================================

#[test]
fn not_liked_view_shows_baseline() {
    let view = like_view(false, 10);
    assert_eq!(view.label, "Like");
    assert!(!view.primary);
    assert_eq!(view.count_text, "\u{2764}\u{fe0f} 10");
}

#[test]
fn liked_view_shows_baseline_plus_one() {
    let view = like_view(true, 10);
    assert_eq!(view.label, "Liked \u{2713}");
    assert!(view.primary);
    assert_eq!(view.count_text, "\u{2764}\u{fe0f} 11");
}

#[test]
fn toggling_twice_returns_display_to_baseline() {
    let ledger = ledger();
    let baseline = 10;
    assert_eq!(like_view(ledger.liked("7"), baseline).count_text, "\u{2764}\u{fe0f} 10");
    ledger.toggle("7");
    assert_eq!(like_view(ledger.liked("7"), baseline).count_text, "\u{2764}\u{fe0f} 11");
    ledger.toggle("7");
    assert_eq!(like_view(ledger.liked("7"), baseline).count_text, "\u{2764}\u{fe0f} 10");
}

#[test]
fn zero_baseline_liked_displays_one() {
    assert_eq!(like_view(true, 0).count_text, "\u{2764}\u{fe0f} 1");
}

// =============================================================
// Double-tap detection
// =============================================================

#[test]
fn single_tap_does_not_fire() {
    let mut taps = TapDetector::new();
    assert!(!taps.tap(100.0));
}

#[test]
fn first_tap_near_time_origin_does_not_fire() {
    // performance.now()-style clocks start near zero; the empty detector
    // must not treat that as a pair with an implicit tap at t=0.
    let mut taps = TapDetector::new();
    assert!(!taps.tap(5.0));
}

#[test]
fn two_taps_within_window_fire_once() {
    let mut taps = TapDetector::new();
    assert!(!taps.tap(1000.0));
    assert!(taps.tap(1200.0));
}

#[test]
fn slow_second_tap_does_not_fire() {
    let mut taps = TapDetector::new();
    assert!(!taps.tap(1000.0));
    assert!(!taps.tap(1400.0));
}

#[test]
fn detector_resets_after_firing() {
    // click, click (fire), click — the third tap starts a new pair instead
    // of firing against the second.
    let mut taps = TapDetector::new();
    assert!(!taps.tap(1000.0));
    assert!(taps.tap(1100.0));
    assert!(!taps.tap(1200.0));
    assert!(taps.tap(1300.0));
}

#[test]
fn stale_tap_then_fresh_pair_fires() {
    let mut taps = TapDetector::new();
    assert!(!taps.tap(1000.0));
    assert!(!taps.tap(2000.0));
    assert!(taps.tap(2100.0));
}

#[test]
fn slow_double_click_toggles_exactly_once_via_dblclick() {
    // Two clicks 500 ms apart miss the tap window, so the native dblclick
    // report carries the toggle instead.
    let mut taps = TapDetector::new();
    assert!(!taps.tap(1000.0));
    assert!(!taps.tap(1500.0));
    assert!(taps.double_click());
}

#[test]
fn fast_double_click_does_not_toggle_twice() {
    // The click pair already fired; the trailing dblclick must not re-fire.
    let mut taps = TapDetector::new();
    assert!(!taps.tap(1000.0));
    assert!(taps.tap(1100.0));
    assert!(!taps.double_click());
}

#[test]
fn double_click_report_resets_the_detector() {
    let mut taps = TapDetector::new();
    assert!(!taps.tap(1000.0));
    assert!(!taps.tap(1500.0));
    assert!(taps.double_click());
    // The consumed pair cannot pair with a later click.
    assert!(!taps.tap(1600.0));
}

#[test]
fn double_click_on_an_idle_detector_is_inert() {
    let mut taps = TapDetector::new();
    assert!(!taps.double_click());
}
