//! Startup: DOM-ready gate and sequential enhancer mounting.
//!
//! There is no router. Every enhancer probes the document for its page
//! markers and quietly skips pages it does not apply to, so the same bundle
//! ships on every server-rendered page.

#[cfg(test)]
#[path = "boot_test.rs"]
mod boot_test;

use web_sys::Document;

use crate::{attend, dom, feed, filter, reveal, signup};

/// Mount everything, waiting for `DOMContentLoaded` when the bundle was
/// loaded before the document finished parsing.
pub(crate) fn init() {
    let Some(doc) = dom::document() else {
        return;
    };
    if should_defer(&doc.ready_state()) {
        dom::on(&doc, "DOMContentLoaded", |_| {
            if let Some(doc) = dom::document() {
                mount_all(&doc);
            }
        });
    } else {
        mount_all(&doc);
    }
}

/// Whether mounting must wait for `DOMContentLoaded`. `readyState` is
/// `"loading"` only while the document is still being parsed; both
/// `"interactive"` and `"complete"` mean the markers are queryable now.
fn should_defer(ready_state: &str) -> bool {
    ready_state == "loading"
}

fn mount_all(doc: &Document) {
    let mounted = [
        ("filter", filter::mount(doc)),
        ("attend", attend::mount(doc)),
        ("feed", feed::mount(doc)),
        ("signup", signup::mount(doc)),
        ("reveal", reveal::mount(doc)),
    ];
    for (name, active) in mounted {
        if active {
            log::debug!("{name} enhancer mounted");
        }
    }
}
