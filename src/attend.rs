//! Attendance toggle for the conference detail page.
//!
//! The conference id is the path segment after `/conference/`,
//! percent-decoded. Membership lives in local storage as a JSON array of id
//! strings under one key; the button renders one of exactly two states and
//! flips membership on click. Concurrent tabs are not synchronized: last
//! write wins, and other tabs stay stale until their next reload.

#[cfg(test)]
#[path = "attend_test.rs"]
mod attend_test;

use std::rc::Rc;

use web_sys::{Document, Element};

use crate::consts;
use crate::dom;
use crate::storage::{BrowserStorage, KvStore};

/// The attendance set, persisted as a JSON array under a single key.
///
/// Reads are defensive: a missing or malformed value is an empty set.
/// Removal is first-match, mirroring how the set is written (no duplicate
/// ids ever enter through `toggle`).
#[derive(Debug)]
pub struct AttendanceCore<S: KvStore> {
    store: S,
    key: &'static str,
}

impl<S: KvStore> AttendanceCore<S> {
    #[must_use]
    pub fn new(store: S, key: &'static str) -> Self {
        Self { store, key }
    }

    fn read(&self) -> Vec<String> {
        self.store
            .get(self.key)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    fn write(&self, list: &[String]) {
        if let Ok(raw) = serde_json::to_string(list) {
            self.store.set(self.key, &raw);
        }
    }

    /// Whether `id` is currently in the attendance set.
    #[must_use]
    pub fn is_attending(&self, id: &str) -> bool {
        self.read().iter().any(|x| x == id)
    }

    /// Flip membership of `id` and persist; returns the new membership.
    pub fn toggle(&self, id: &str) -> bool {
        let mut list = self.read();
        let attending = match list.iter().position(|x| x == id) {
            Some(i) => {
                list.remove(i);
                false
            }
            None => {
                list.push(id.to_string());
                true
            }
        };
        self.write(&list);
        attending
    }
}

/// Conference id from a path of the shape `/conference/<id>`,
/// percent-decoded. A path without the marker yields the empty string,
/// which the toggle treats as a degenerate but functional key.
#[must_use]
pub fn conference_id_from_path(path: &str) -> String {
    let mut rest = path;
    while let Some((_, after)) = rest.split_once("/conference/") {
        let seg = after.split('/').next().unwrap_or_default();
        if !seg.is_empty() {
            return percent_decode(seg);
        }
        rest = after;
    }
    String::new()
}

/// Decode `%XX` escapes. Invalid escapes pass through literally; if the
/// decoded bytes are not UTF-8 the input is returned as-is.
#[must_use]
pub fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8(out).unwrap_or_else(|_| s.to_string())
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// What the attendance button should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonView {
    pub label: &'static str,
    /// Call-to-action styling when not yet attending.
    pub primary: bool,
}

#[must_use]
pub fn button_view(attending: bool) -> ButtonView {
    if attending {
        ButtonView { label: "Attending \u{2713}", primary: false }
    } else {
        ButtonView { label: "I'm Attending", primary: true }
    }
}

// ── Mount layer ─────────────────────────────────────────────────

/// Wire the toggle if this page has the attendance button.
pub(crate) fn mount(doc: &Document) -> bool {
    let Some(btn) = doc.get_element_by_id("attendBtn") else {
        return false;
    };

    let path = web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default();
    let cid = Rc::new(conference_id_from_path(&path));
    let core = Rc::new(AttendanceCore::new(BrowserStorage, consts::ATTENDING_KEY));

    render_button(&btn, core.is_attending(&cid));

    {
        let btn = btn.clone();
        let core = Rc::clone(&core);
        let cid = Rc::clone(&cid);
        dom::on(&btn.clone(), "click", move |_| {
            let attending = core.toggle(&cid);
            render_button(&btn, attending);
        });
    }

    true
}

fn render_button(btn: &Element, attending: bool) {
    let view = button_view(attending);
    btn.set_text_content(Some(view.label));
    dom::set_class(btn, "btn-primary", view.primary);
    dom::set_class(btn, "btn-secondary", !view.primary);
}
