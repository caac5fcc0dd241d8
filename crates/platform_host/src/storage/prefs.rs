//! Durable key/value preference storage contracts and adapters.
//!
//! Values are stored as text per key. Most callers go through [`load_pref_with`] and
//! [`save_pref_with`], which treat JSON decoding failures as "absent" so that corrupted
//! or foreign values never escape past the store boundary.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

/// Host service for durable per-origin key/value text storage.
///
/// Implementations are synchronous: browser `localStorage` is a blocking API and every
/// consumer runs on the single UI thread.
pub trait PrefsStore {
    /// Loads the raw text stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage rejects the read.
    fn load_pref(&self, key: &str) -> Result<Option<String>, String>;

    /// Stores raw text under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage rejects the write (for example quota).
    fn save_pref(&self, key: &str, raw: &str) -> Result<(), String>;

    /// Removes `key` if present.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage rejects the delete.
    fn delete_pref(&self, key: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op preference store for hosts without durable storage (server rendering, native tests).
pub struct NoopPrefsStore;

impl PrefsStore for NoopPrefsStore {
    fn load_pref(&self, _key: &str) -> Result<Option<String>, String> {
        Ok(None)
    }

    fn save_pref(&self, _key: &str, _raw: &str) -> Result<(), String> {
        Ok(())
    }

    fn delete_pref(&self, _key: &str) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory preference store keyed by string.
///
/// Clones share the same map, which lets tests model several consumers over one origin.
pub struct MemoryPrefsStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryPrefsStore {
    /// Returns whether any value is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.borrow().contains_key(key)
    }

    /// Returns the raw text stored under `key` without going through the trait.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load_pref(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn save_pref(&self, key: &str, raw: &str) -> Result<(), String> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), raw.to_string());
        Ok(())
    }

    fn delete_pref(&self, key: &str) -> Result<(), String> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}

/// Loads and deserializes a typed value through a [`PrefsStore`] implementation.
///
/// Returns `None` when the key is absent, the store fails, or the stored text is not valid
/// JSON for `T`.
pub fn load_pref_with<S: PrefsStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Option<T> {
    let raw = store.load_pref(key).ok().flatten()?;
    serde_json::from_str(&raw).ok()
}

/// Serializes and saves a typed value through a [`PrefsStore`] implementation.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub fn save_pref_with<S: PrefsStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.save_pref(key, &raw)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Bookmark {
        content_id: String,
    }

    #[test]
    fn memory_prefs_store_round_trip_and_delete() {
        let store = MemoryPrefsStore::default();
        let store_obj: &dyn PrefsStore = &store;

        store_obj.save_pref("pref.key", "{\"k\":1}").expect("save");
        assert_eq!(
            store_obj.load_pref("pref.key").expect("load"),
            Some("{\"k\":1}".to_string())
        );
        store_obj.delete_pref("pref.key").expect("delete");
        assert_eq!(store_obj.load_pref("pref.key").expect("load"), None);
    }

    #[test]
    fn memory_prefs_store_clones_share_state() {
        let first = MemoryPrefsStore::default();
        let second = first.clone();
        first.save_pref("shared", "1").expect("save");
        assert!(second.contains("shared"));
    }

    #[test]
    fn typed_helpers_round_trip() {
        let store = MemoryPrefsStore::default();
        save_pref_with(
            &store,
            "bookmark",
            &Bookmark {
                content_id: "m1".to_string(),
            },
        )
        .expect("save typed pref");

        let loaded: Option<Bookmark> = load_pref_with(&store, "bookmark");
        assert_eq!(
            loaded,
            Some(Bookmark {
                content_id: "m1".to_string()
            })
        );
    }

    #[test]
    fn unparseable_value_reads_as_absent() {
        let store = MemoryPrefsStore::default();
        store.save_pref("broken", "{not json").expect("save");
        assert_eq!(load_pref_with::<_, Bookmark>(&store, "broken"), None);
        assert_eq!(load_pref_with::<_, Vec<String>>(&store, "missing"), None);
    }

    #[test]
    fn noop_prefs_store_is_empty_and_successful() {
        let store = NoopPrefsStore;
        let store_obj: &dyn PrefsStore = &store;
        store_obj.save_pref("k", "{}").expect("save");
        assert_eq!(store_obj.load_pref("k").expect("load"), None);
        store_obj.delete_pref("k").expect("delete");
        assert_eq!(load_pref_with::<_, u32>(store_obj, "k"), None);
    }
}
