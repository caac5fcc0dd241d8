//! Per-content playback progress persisted under `watch-history`.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use leptos::logging;
use platform_host::{load_pref_with, next_monotonic_timestamp_ms, save_pref_with, PrefsStore};
use serde::{Deserialize, Serialize};

use crate::event_bus::{EventBus, Subscription, Topic};

/// Durable key holding the JSON array of [`WatchHistoryEntry`] values.
pub const WATCH_HISTORY_KEY: &str = "watch-history";

/// Last known playback position for one content item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchHistoryEntry {
    pub content_id: String,
    /// Percentage watched. Values are stored as given, without clamping to `0..=100`.
    pub progress: f64,
    /// Unix milliseconds of the last update.
    pub last_watched: u64,
}

/// Write-through cache over the watch history collection.
///
/// Each mounted consumer owns one store. The collection is read from durable storage on
/// first access and re-read after any other store publishes [`Topic::WatchHistoryUpdated`].
pub struct WatchHistoryStore {
    prefs: Rc<dyn PrefsStore>,
    bus: EventBus,
    cache: Rc<RefCell<Option<Vec<WatchHistoryEntry>>>>,
    publishing: Rc<Cell<bool>>,
    _subscription: Subscription,
}

impl WatchHistoryStore {
    /// Creates a store and subscribes it to watch history notifications on `bus`.
    pub fn new(prefs: Rc<dyn PrefsStore>, bus: EventBus) -> Self {
        let cache: Rc<RefCell<Option<Vec<WatchHistoryEntry>>>> = Rc::default();
        let publishing = Rc::new(Cell::new(false));
        let subscription = {
            let cache = Rc::clone(&cache);
            let publishing = Rc::clone(&publishing);
            bus.subscribe(Topic::WatchHistoryUpdated, move || {
                if !publishing.get() {
                    cache.borrow_mut().take();
                }
            })
        };

        Self {
            prefs,
            bus,
            cache,
            publishing,
            _subscription: subscription,
        }
    }

    fn with_entries<R>(&self, f: impl FnOnce(&mut Vec<WatchHistoryEntry>) -> R) -> R {
        let mut cache = self.cache.borrow_mut();
        let entries = cache.get_or_insert_with(|| load_entries(self.prefs.as_ref()));
        f(entries)
    }

    /// Returns the full collection in insertion order.
    pub fn get_all(&self) -> Vec<WatchHistoryEntry> {
        self.with_entries(|entries| entries.clone())
    }

    /// Returns the stored progress for `content_id`, or `0.0` when it was never watched.
    pub fn get_progress(&self, content_id: &str) -> f64 {
        self.with_entries(|entries| {
            entries
                .iter()
                .find(|entry| entry.content_id == content_id)
                .map_or(0.0, |entry| entry.progress)
        })
    }

    /// Upserts the entry for `content_id`, persists the collection, and notifies other stores.
    ///
    /// A failed durable write is logged; the in-memory collection still reflects the update.
    pub fn update_progress(&self, content_id: &str, progress: f64) {
        let last_watched = next_monotonic_timestamp_ms();
        let snapshot = self.with_entries(|entries| {
            match entries
                .iter_mut()
                .find(|entry| entry.content_id == content_id)
            {
                Some(entry) => {
                    entry.progress = progress;
                    entry.last_watched = last_watched;
                }
                None => entries.push(WatchHistoryEntry {
                    content_id: content_id.to_string(),
                    progress,
                    last_watched,
                }),
            }
            entries.clone()
        });

        if let Err(err) = save_pref_with(self.prefs.as_ref(), WATCH_HISTORY_KEY, &snapshot) {
            logging::warn!("persist watch history failed: {err}");
        }

        self.publishing.set(true);
        self.bus.publish(Topic::WatchHistoryUpdated);
        self.publishing.set(false);
    }
}

impl std::fmt::Debug for WatchHistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchHistoryStore")
            .field("cached", &self.cache.borrow().as_ref().map(Vec::len))
            .finish_non_exhaustive()
    }
}

fn load_entries(prefs: &dyn PrefsStore) -> Vec<WatchHistoryEntry> {
    let stored: Vec<WatchHistoryEntry> =
        load_pref_with(prefs, WATCH_HISTORY_KEY).unwrap_or_default();
    let mut entries: Vec<WatchHistoryEntry> = Vec::with_capacity(stored.len());
    for entry in stored {
        match entries
            .iter_mut()
            .find(|existing| existing.content_id == entry.content_id)
        {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use platform_host::{MemoryPrefsStore, NoopPrefsStore};
    use pretty_assertions::assert_eq;

    use super::*;

    fn store_over(prefs: &MemoryPrefsStore, bus: &EventBus) -> WatchHistoryStore {
        WatchHistoryStore::new(Rc::new(prefs.clone()), bus.clone())
    }

    #[test]
    fn unwatched_content_reports_zero() {
        let store = store_over(&MemoryPrefsStore::default(), &EventBus::new());
        assert_eq!(store.get_progress("content-1"), 0.0);
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn update_then_overwrite_keeps_single_entry() {
        let prefs = MemoryPrefsStore::default();
        let store = store_over(&prefs, &EventBus::new());

        store.update_progress("content-1", 50.0);
        assert_eq!(store.get_progress("content-1"), 50.0);

        store.update_progress("content-1", 80.0);
        assert_eq!(store.get_progress("content-1"), 80.0);

        let entries = store.get_all();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].content_id, "content-1");
        assert!(prefs.contains(WATCH_HISTORY_KEY));
    }

    #[test]
    fn repeated_identical_updates_are_idempotent() {
        let prefs = MemoryPrefsStore::default();
        let store = store_over(&prefs, &EventBus::new());
        store.update_progress("c", 30.0);
        store.update_progress("c", 30.0);

        let entries = store.get_all();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].progress, 30.0);
    }

    #[test]
    fn last_watched_advances_on_every_update() {
        let store = store_over(&MemoryPrefsStore::default(), &EventBus::new());
        store.update_progress("c", 10.0);
        let first = store.get_all()[0].last_watched;
        store.update_progress("c", 10.0);
        assert!(store.get_all()[0].last_watched > first);
    }

    #[test]
    fn out_of_range_progress_is_stored_as_is() {
        let store = store_over(&MemoryPrefsStore::default(), &EventBus::new());
        store.update_progress("c", 140.0);
        assert_eq!(store.get_progress("c"), 140.0);
        store.update_progress("c", -5.0);
        assert_eq!(store.get_progress("c"), -5.0);
    }

    #[test]
    fn other_consumers_observe_updates_after_notification() {
        let prefs = MemoryPrefsStore::default();
        let bus = EventBus::new();
        let player = store_over(&prefs, &bus);
        let home_row = store_over(&prefs, &bus);

        assert_eq!(home_row.get_progress("m1"), 0.0);
        player.update_progress("m1", 25.0);
        assert_eq!(home_row.get_progress("m1"), 25.0);
        player.update_progress("m2", 5.0);
        assert_eq!(home_row.get_all().len(), 2);
    }

    #[test]
    fn persisted_layout_uses_camel_case_fields() {
        let prefs = MemoryPrefsStore::default();
        let store = store_over(&prefs, &EventBus::new());
        store.update_progress("c1", 50.0);

        let raw = prefs.raw(WATCH_HISTORY_KEY).expect("persisted");
        let json: serde_json::Value = serde_json::from_str(&raw).expect("json array");
        assert_eq!(json[0]["contentId"], "c1");
        assert_eq!(json[0]["progress"], 50.0);
        assert!(json[0]["lastWatched"].as_u64().is_some());
    }

    #[test]
    fn malformed_storage_reads_as_empty() {
        let prefs = MemoryPrefsStore::default();
        prefs
            .save_pref(WATCH_HISTORY_KEY, "{\"not\": \"an array\"}")
            .expect("seed");
        let store = store_over(&prefs, &EventBus::new());
        assert!(store.get_all().is_empty());

        store.update_progress("c1", 10.0);
        assert_eq!(store.get_progress("c1"), 10.0);
    }

    #[test]
    fn duplicate_stored_entries_collapse_to_latest() {
        let prefs = MemoryPrefsStore::default();
        prefs
            .save_pref(
                WATCH_HISTORY_KEY,
                r#"[{"contentId":"c1","progress":10,"lastWatched":1},
                    {"contentId":"c1","progress":60,"lastWatched":2}]"#,
            )
            .expect("seed");
        let store = store_over(&prefs, &EventBus::new());
        assert_eq!(store.get_all().len(), 1);
        assert_eq!(store.get_progress("c1"), 60.0);
    }

    #[test]
    fn headless_store_keeps_in_memory_updates() {
        let store = WatchHistoryStore::new(Rc::new(NoopPrefsStore), EventBus::new());
        store.update_progress("c1", 42.0);
        assert_eq!(store.get_progress("c1"), 42.0);
    }

    #[test]
    fn dropped_store_unsubscribes() {
        let bus = EventBus::new();
        let store = store_over(&MemoryPrefsStore::default(), &bus);
        assert_eq!(bus.subscriber_count(Topic::WatchHistoryUpdated), 1);
        drop(store);
        assert_eq!(bus.subscriber_count(Topic::WatchHistoryUpdated), 0);
    }
}
