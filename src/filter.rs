//! List filter for the conferences and explore pages.
//!
//! The server renders every card/tile up front with a precomputed lowercase
//! search string in `data-search`. Filtering is a case-insensitive substring
//! match of the trimmed query against that string, applied on every input
//! event with no debouncing. `FilterCore` holds the search strings and
//! decides visibility; the mount layer owns the matching elements and the
//! keyboard shortcuts (`/` focuses the search box, `Escape` clears it).

#[cfg(test)]
#[path = "filter_test.rs"]
mod filter_test;

use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, KeyboardEvent};

use crate::dom;

/// Visibility decisions for a fixed collection of searchable items.
///
/// Pure and synchronous: `apply` is idempotent for a given query and an
/// empty query shows every item.
#[derive(Debug, Clone)]
pub struct FilterCore {
    items: Vec<String>,
}

impl FilterCore {
    /// Build a core over the precomputed per-item search strings, in the
    /// same order as the elements they describe.
    #[must_use]
    pub fn new(items: Vec<String>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Visibility of each item for the given raw query, in item order.
    #[must_use]
    pub fn apply(&self, raw_query: &str) -> Vec<bool> {
        let query = normalize_query(raw_query);
        self.items.iter().map(|s| s.contains(&query)).collect()
    }
}

/// Whether a single search string matches the raw query. An empty query
/// matches everything.
#[must_use]
pub fn matches(search: &str, raw_query: &str) -> bool {
    search.contains(&normalize_query(raw_query))
}

fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// What a keystroke outside and inside the search box should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIntent {
    /// Swallow the keystroke and focus the search input.
    FocusSearch,
    /// Clear the query, re-show every item, and drop focus.
    ClearSearch,
    /// Not a shortcut; let the browser handle it.
    None,
}

/// Shortcut resolution: `/` focuses the search box unless typed inside a
/// text-entry element; `Escape` clears it only while it holds focus.
#[must_use]
pub fn key_intent(key: &str, target_is_text_entry: bool, search_is_focused: bool) -> KeyIntent {
    if key == "/" && !target_is_text_entry {
        KeyIntent::FocusSearch
    } else if key == "Escape" && search_is_focused {
        KeyIntent::ClearSearch
    } else {
        KeyIntent::None
    }
}

// ── Mount layer ─────────────────────────────────────────────────

/// Wire the filter if this page has a search box and something to filter.
pub(crate) fn mount(doc: &Document) -> bool {
    let Some(search) = doc
        .get_element_by_id("q")
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        return false;
    };

    let items = searchable_items(doc);
    if items.is_empty() {
        return false;
    }

    let searches = items
        .iter()
        .map(|el| el.get_attribute("data-search").unwrap_or_default())
        .collect();
    let core = Rc::new(FilterCore::new(searches));
    let items = Rc::new(items);

    {
        let core = Rc::clone(&core);
        let items = Rc::clone(&items);
        let input = search.clone();
        dom::on(&search, "input", move |_| {
            apply_to_elements(&core, &items, &input.value());
        });
    }

    {
        let doc = doc.clone();
        let search = search.clone();
        dom::on(&doc.clone(), "keydown", move |ev| {
            let Some(key_ev) = ev.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let in_text_entry = ev
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("input,textarea").ok().flatten())
                .is_some();
            let focused = doc
                .active_element()
                .is_some_and(|a| a.is_same_node(Some(search.as_ref())));

            match key_intent(&key_ev.key(), in_text_entry, focused) {
                KeyIntent::FocusSearch => {
                    ev.prevent_default();
                    let _ = search.focus();
                }
                KeyIntent::ClearSearch => {
                    search.set_value("");
                    apply_to_elements(&core, &items, "");
                    let _ = search.blur();
                }
                KeyIntent::None => {}
            }
        });
    }

    true
}

/// The filterable elements on this page: conference cards document-wide,
/// plus explore tiles under the grid when one is present.
fn searchable_items(doc: &Document) -> Vec<Element> {
    let mut items = dom::query_all(doc, ".conf.card");
    if let Some(grid) = doc
        .get_element_by_id("grid")
        .or_else(|| dom::query(doc, ".masonry"))
    {
        items.extend(dom::query_all_in(&grid, ".tile"));
    }
    items
}

fn apply_to_elements(core: &FilterCore, items: &[Element], raw_query: &str) {
    for (el, visible) in items.iter().zip(core.apply(raw_query)) {
        dom::set_visible(el, visible);
    }
}
