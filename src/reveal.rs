//! Load-in reveal for explore tiles.
//!
//! Purely cosmetic: tiles start nudged down and transparent, and a one-shot
//! `IntersectionObserver` fades each one in as it approaches the viewport.
//! Each tile is unobserved as soon as it fires so observations never
//! accumulate. Without `IntersectionObserver` support the tiles are shown
//! immediately.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen::closure::Closure;
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::consts;
use crate::dom;

/// Animate the explore grid tiles, if this page has the grid.
pub(crate) fn mount(doc: &Document) -> bool {
    let Some(grid) = doc
        .get_element_by_id("grid")
        .or_else(|| dom::query(doc, ".masonry"))
    else {
        return false;
    };

    let tiles = dom::query_all_in(&grid, ".tile");
    if tiles.is_empty() {
        return false;
    }

    let observer = make_observer();
    for tile in &tiles {
        if let Some(observer) = &observer {
            stage(tile);
            observer.observe(tile);
        } else {
            reveal(tile);
        }
    }
    true
}

/// A one-shot observer that reveals and then unobserves each target.
fn make_observer() -> Option<IntersectionObserver> {
    let window = web_sys::window()?;
    let supported =
        js_sys::Reflect::has(&window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false);
    if !supported {
        return None;
    }

    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    reveal(&target);
                    observer.unobserve(&target);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_root_margin(consts::REVEAL_ROOT_MARGIN);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options).ok();
    callback.forget();
    observer
}

/// Initial hidden state with the transition armed.
fn stage(el: &Element) {
    if let Some(html) = el.dyn_ref::<web_sys::HtmlElement>() {
        let style = html.style();
        let _ = style.set_property("transform", "translateY(6px)");
        let _ = style.set_property("opacity", "0");
        let _ = style.set_property("transition", "opacity .3s ease, transform .3s ease");
    }
}

fn reveal(el: &Element) {
    if let Some(html) = el.dyn_ref::<web_sys::HtmlElement>() {
        let style = html.style();
        let _ = style.set_property("transform", "translateY(0)");
        let _ = style.set_property("opacity", "1");
    }
}
