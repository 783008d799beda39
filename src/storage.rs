//! Client-local key-value persistence.
//!
//! DESIGN
//! ======
//! Every enhancer that persists state goes through the `KvStore` trait so
//! its core can be exercised against `MemoryStore` without a browser. In
//! the page the only implementation that matters is `BrowserStorage`, a
//! thin wrapper over `window.localStorage`.
//!
//! All access is defensive by contract: a missing window, disabled storage,
//! or a throwing accessor degrades a read to `None`, and writes are
//! fire-and-forget. JSON decoding of stored values happens in the owning
//! enhancer, which falls back to its empty default on any parse failure.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;

/// Minimal key-value interface over browser local storage.
pub trait KvStore {
    /// The raw string stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`. Failures (quota, disabled storage) are
    /// swallowed; the in-memory UI state still updates for this page view.
    fn set(&self, key: &str, value: &str);
}

/// In-memory store backing the host-side tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

/// `localStorage`-backed store used by the mounted enhancers.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KvStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        local_storage().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(s) = local_storage() {
            let _ = s.set_item(key, value);
        }
    }
}
