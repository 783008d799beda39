//! Like engine for the feed and post-detail pages.
//!
//! DESIGN
//! ======
//! Each `article.post` present at load time is enhanced independently in a
//! single pass; posts added later are not picked up. Enhancement resolves a
//! post id (permalink href first, then a `#<digits>` token in the page
//! title), parses the server-rendered baseline count out of the first meta
//! span, injects a like button if one is not already there, and wires three
//! triggers that all converge on the same toggle: the button click, a
//! double-tap on the media, and a native double-click on the media.
//!
//! The displayed count is a visual approximation, never authoritative:
//! baseline plus one while liked, baseline otherwise. Posts without a
//! resolvable id are silently skipped; the rest of the page is unaffected.

#[cfg(test)]
#[path = "feed_test.rs"]
mod feed_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use web_sys::{Document, Element};

use crate::consts;
use crate::dom;
use crate::storage::{BrowserStorage, KvStore};

// ── Identifier resolution ───────────────────────────────────────

/// Digits following `/post/` in a permalink href.
#[must_use]
pub fn post_id_from_href(href: &str) -> Option<String> {
    let mut rest = href;
    while let Some((_, after)) = rest.split_once("/post/") {
        let digits: String = after.chars().take_while(char::is_ascii_digit).collect();
        if !digits.is_empty() {
            return Some(digits);
        }
        rest = after;
    }
    None
}

/// Digits following a `#` in the page title (post-detail convention).
#[must_use]
pub fn post_id_from_title(title: &str) -> Option<String> {
    let mut rest = title;
    while let Some((_, after)) = rest.split_once('#') {
        let digits: String = after.chars().take_while(char::is_ascii_digit).collect();
        if !digits.is_empty() {
            return Some(digits);
        }
        rest = after;
    }
    None
}

/// Resolve a post id, preferring the permalink href over the page title
/// when both could answer.
#[must_use]
pub fn resolve_post_id(href: Option<&str>, title: &str) -> Option<String> {
    href.and_then(post_id_from_href)
        .or_else(|| post_id_from_title(title))
}

// ── Baseline count ──────────────────────────────────────────────

/// Baseline like count from the heart-prefixed meta text: strip everything
/// that is not a digit and parse, defaulting to zero.
#[must_use]
pub fn baseline_likes(text: &str) -> u32 {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

// ── Like map ────────────────────────────────────────────────────

/// The like map, persisted as a JSON object of post id to boolean under a
/// single key. An absent entry means not-liked; malformed storage reads as
/// an empty map.
#[derive(Debug)]
pub struct LikeLedger<S: KvStore> {
    store: S,
    key: &'static str,
}

impl<S: KvStore> LikeLedger<S> {
    #[must_use]
    pub fn new(store: S, key: &'static str) -> Self {
        Self { store, key }
    }

    fn read(&self) -> HashMap<String, bool> {
        self.store
            .get(self.key)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    /// Whether `post_id` is currently liked.
    #[must_use]
    pub fn liked(&self, post_id: &str) -> bool {
        self.read().get(post_id).copied().unwrap_or(false)
    }

    /// Flip the liked boolean for `post_id` and persist; returns the new
    /// value. Unliked entries stay in the map as explicit `false`.
    pub fn toggle(&self, post_id: &str) -> bool {
        let mut map = self.read();
        let entry = map.entry(post_id.to_string()).or_insert(false);
        *entry = !*entry;
        let liked = *entry;
        if let Ok(raw) = serde_json::to_string(&map) {
            self.store.set(self.key, &raw);
        }
        liked
    }
}

// ── View state ──────────────────────────────────────────────────

/// What the like button and count span should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeView {
    pub label: &'static str,
    pub primary: bool,
    pub count_text: String,
}

/// Derived display state: the count is baseline plus one while liked and
/// exactly baseline otherwise, never anything else.
#[must_use]
pub fn like_view(liked: bool, baseline: u32) -> LikeView {
    LikeView {
        label: if liked { "Liked \u{2713}" } else { "Like" },
        primary: liked,
        count_text: format!("\u{2764}\u{fe0f} {}", baseline + u32::from(liked)),
    }
}

// ── Double-tap detection ────────────────────────────────────────

/// Recognizes two taps within [`consts::DOUBLE_TAP_WINDOW_MS`].
///
/// The detector resets after firing, so a browser double-click (which
/// always delivers both of its constituent clicks first) toggles exactly
/// once, and a triple tap cannot toggle twice.
#[derive(Debug, Default)]
pub struct TapDetector {
    last_tap_ms: Option<f64>,
}

impl TapDetector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tap at `now_ms`; returns `true` when it completes a pair.
    pub fn tap(&mut self, now_ms: f64) -> bool {
        let fired = self
            .last_tap_ms
            .is_some_and(|last| now_ms - last < consts::DOUBLE_TAP_WINDOW_MS);
        self.last_tap_ms = if fired { None } else { Some(now_ms) };
        fired
    }

    /// Record a native `dblclick`; returns `true` when the gesture still
    /// needs a toggle. The browser delivers both constituent clicks before
    /// `dblclick`, so a pending tap here means the pair was too slow for
    /// [`Self::tap`] to fire (OS double-click thresholds can exceed the tap
    /// window); a consumed one means it already toggled.
    pub fn double_click(&mut self) -> bool {
        self.last_tap_ms.take().is_some()
    }
}

// ── Mount layer ─────────────────────────────────────────────────

/// Enhance every post on the page, if this looks like a feed or post page.
pub(crate) fn mount(doc: &Document) -> bool {
    if dom::query(doc, ".feed-list")
        .or_else(|| dom::query(doc, ".container"))
        .is_none()
    {
        return false;
    }

    let ledger = Rc::new(LikeLedger::new(BrowserStorage, consts::LIKES_KEY));
    let title = doc.title();
    for post in dom::query_all(doc, "article.post") {
        enhance_post(doc, &post, &title, &ledger);
    }
    true
}

fn enhance_post(
    doc: &Document,
    post: &Element,
    title: &str,
    ledger: &Rc<LikeLedger<BrowserStorage>>,
) {
    let meta = post.query_selector(".meta").ok().flatten();
    let media = post.query_selector(".post-media img").ok().flatten();
    let href = post
        .query_selector(r#"a[href*="/post/"]"#)
        .ok()
        .flatten()
        .and_then(|a| a.get_attribute("href"));

    let Some(pid) = resolve_post_id(href.as_deref(), title) else {
        return; // cannot enhance without an id
    };

    let like_span = meta
        .as_ref()
        .and_then(|m| m.query_selector("span").ok().flatten());
    let baseline = like_span
        .as_ref()
        .and_then(|span| span.text_content())
        .map_or(0, |t| baseline_likes(&t));

    let like_btn = meta.as_ref().and_then(|m| inject_button(doc, m, &pid));

    sync_post(ledger, &pid, baseline, like_btn.as_ref(), like_span.as_ref());

    let do_toggle: Rc<dyn Fn()> = {
        let ledger = Rc::clone(ledger);
        let pid = pid.clone();
        let like_btn = like_btn.clone();
        let like_span = like_span.clone();
        Rc::new(move || {
            ledger.toggle(&pid);
            sync_post(&ledger, &pid, baseline, like_btn.as_ref(), like_span.as_ref());
        })
    };

    if let Some(btn) = &like_btn {
        let do_toggle = Rc::clone(&do_toggle);
        dom::on(btn, "click", move |_| do_toggle());
    }

    if let Some(media) = media {
        let taps = Rc::new(RefCell::new(TapDetector::new()));
        {
            let do_toggle = Rc::clone(&do_toggle);
            let taps = Rc::clone(&taps);
            dom::on(&media, "click", move |_| {
                if taps.borrow_mut().tap(js_sys::Date::now()) {
                    do_toggle();
                }
            });
        }
        {
            let do_toggle = Rc::clone(&do_toggle);
            let taps = Rc::clone(&taps);
            dom::on(&media, "dblclick", move |ev| {
                ev.prevent_default();
                if taps.borrow_mut().double_click() {
                    do_toggle();
                }
            });
        }
    }
}

/// Prepend a like button to the meta region unless one is already there
/// (repeated enhancement passes must not duplicate controls).
fn inject_button(doc: &Document, meta: &Element, pid: &str) -> Option<Element> {
    if let Ok(Some(existing)) = meta.query_selector("button[data-like]") {
        return Some(existing);
    }
    let btn = doc.create_element("button").ok()?;
    let _ = btn.set_attribute("type", "button");
    let _ = btn.set_attribute("data-like", pid);
    btn.set_class_name("btn btn-secondary");
    btn.set_text_content(Some("Like"));
    let _ = meta.prepend_with_node_1(&btn);
    Some(btn)
}

fn sync_post(
    ledger: &LikeLedger<BrowserStorage>,
    pid: &str,
    baseline: u32,
    btn: Option<&Element>,
    span: Option<&Element>,
) {
    let view = like_view(ledger.liked(pid), baseline);
    if let Some(btn) = btn {
        btn.set_text_content(Some(view.label));
        dom::set_class(btn, "btn-primary", view.primary);
        dom::set_class(btn, "btn-secondary", !view.primary);
    }
    if let Some(span) = span {
        span.set_text_content(Some(&view.count_text));
    }
}
