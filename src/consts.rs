//! Shared constants: storage keys and gesture timing.
//!
//! Each enhancer receives its storage key explicitly at construction so the
//! keys live in exactly one place. They must not change: the server-rendered
//! pages were shipped with these names and existing browsers hold data under
//! them.

// ── Local storage keys ──────────────────────────────────────────

/// JSON array of conference ids the user marked as attending.
pub const ATTENDING_KEY: &str = "muniverse_attending";

/// JSON object mapping post id to liked boolean.
pub const LIKES_KEY: &str = "muniverse_likes";

/// JSON snapshot of the just-submitted signup values.
pub const CURRENT_USER_KEY: &str = "muniverse_current_user";

// ── Gestures ────────────────────────────────────────────────────

/// Two taps on a post's media within this window count as a double-tap.
pub const DOUBLE_TAP_WINDOW_MS: f64 = 350.0;

// ── Explore reveal ──────────────────────────────────────────────

/// Root margin for the one-shot reveal observer: start the load-in a little
/// before the tile scrolls into view.
pub const REVEAL_ROOT_MARGIN: &str = "100px";
