// ============================================================================
// PREFERENCE STORE - Persistent key/value preferences (localStorage)
// ============================================================================
// Keys are opaque strings. Storage that is missing or refuses access
// (private browsing, quota) degrades to a logged no-op.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use web_sys::{window, Storage};

/// Capability over a string key/value store that survives reloads.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Browser `localStorage`, scoped to the page origin.
#[derive(Clone, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Option<Storage> {
        window()?.local_storage().ok()?
    }
}

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        let storage = self.storage()?;
        match storage.get_item(key) {
            Ok(value) => value,
            Err(_) => {
                log::warn!("⚠️ [STORAGE] Could not read '{}' from localStorage", key);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = self.storage() else {
            log::warn!("⚠️ [STORAGE] localStorage unavailable, '{}' not persisted", key);
            return;
        };
        if storage.set_item(key, value).is_err() {
            log::warn!("⚠️ [STORAGE] Error writing '{}' to localStorage", key);
        }
    }

    fn remove(&self, key: &str) {
        let Some(storage) = self.storage() else {
            return;
        };
        if storage.remove_item(key).is_err() {
            log::warn!("⚠️ [STORAGE] Error removing '{}' from localStorage", key);
        }
    }
}

/// In-process store for non-browser hosts and tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set`/`remove` calls seen so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.writes.set(self.writes.get() + 1);
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.writes.set(self.writes.get() + 1);
        self.entries.borrow_mut().remove(key);
    }
}
