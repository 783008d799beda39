//! Progressive enhancement layer for the server-rendered muniverse pages.
//!
//! This crate is compiled to WebAssembly and loaded on every page. It never
//! renders markup of its own: the server sends complete HTML, and each
//! enhancer feature-detects its page markers, attaches DOM listeners, and
//! keeps a small piece of client-local state in `localStorage`. Pages
//! without the markers are left untouched, and every storage read degrades
//! to an empty default rather than failing.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | `boot` | DOM-ready gate and sequential enhancer mounting |
//! | [`filter`] | Conference/explore list filtering with keyboard shortcuts |
//! | [`attend`] | Attendance toggle on the conference detail page |
//! | [`feed`] | Like engine for feed and post pages |
//! | [`signup`] | Signup form validation, suggestion, and snapshot cache |
//! | `reveal` | One-shot load-in animation for explore tiles |
//! | [`storage`] | `KvStore` abstraction over `localStorage` |
//! | `dom` | Shared web-sys lookup and listener helpers |
//! | [`consts`] | Storage keys and gesture timing |
//!
//! Each enhancer keeps its logic in a pure core with an injected [`storage::KvStore`],
//! exercised by host-side tests; only the thin mount layers touch web-sys.

mod boot;
pub mod consts;
mod dom;
mod reveal;
pub mod storage;

pub mod attend;
pub mod feed;
pub mod filter;
pub mod signup;

use wasm_bindgen::prelude::wasm_bindgen;

/// WASM entry point: install panic reporting and console logging, then
/// mount whichever enhancers this page supports.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    boot::init();
}
