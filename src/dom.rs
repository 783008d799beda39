//! Shared web-sys helpers for the enhancer mount layers.
//!
//! Everything here is a thin convenience over the raw DOM bindings: lookups
//! that flatten the `Result<Option<..>>` shapes web-sys produces, listener
//! wiring that leaks the closure (listeners live for the page lifetime and
//! are torn down with it), and the inline-style visibility toggle the
//! filter uses.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, EventTarget};

/// The current document, if we are running in a browser.
#[must_use]
pub fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

/// First element matching `selector`, or `None` (selector errors included).
#[must_use]
pub fn query(doc: &Document, selector: &str) -> Option<Element> {
    doc.query_selector(selector).ok().flatten()
}

/// All elements matching `selector` under the document, in document order.
#[must_use]
pub fn query_all(doc: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = doc.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// All elements matching `selector` under `root`, in document order.
#[must_use]
pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Attach a page-lifetime event listener. The closure is intentionally
/// forgotten; the browser tears it down on unload.
pub fn on(target: &EventTarget, event: &str, handler: impl FnMut(web_sys::Event) + 'static) {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Show or hide an element via its inline `display` style, the same way the
/// server-rendered cards are toggled: hidden is `display: none`, shown
/// removes the inline override so the stylesheet value applies again.
pub fn set_visible(el: &Element, visible: bool) {
    let Some(html) = el.dyn_ref::<web_sys::HtmlElement>() else {
        return;
    };
    let style = html.style();
    if visible {
        let _ = style.remove_property("display");
    } else {
        let _ = style.set_property("display", "none");
    }
}

/// Force a class on or off, tolerating detached or exotic elements.
pub fn set_class(el: &Element, class: &str, enabled: bool) {
    let _ = el.class_list().toggle_with_force(class, enabled);
}
