//! Bookmarked content ids persisted under `my-list`.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use leptos::logging;
use platform_host::{load_pref_with, save_pref_with, PrefsStore};

use crate::{
    config::ToastConfig,
    event_bus::{EventBus, Subscription, Topic},
    toast::{ToastCenter, ToastKind},
};

/// Durable key holding the JSON array of bookmarked content ids.
pub const MY_LIST_KEY: &str = "my-list";

/// Write-through cache over the My-List set.
///
/// Ids keep insertion order for display; membership is the only contract.
pub struct MyListStore {
    prefs: Rc<dyn PrefsStore>,
    bus: EventBus,
    toasts: ToastCenter,
    texts: ToastConfig,
    cache: Rc<RefCell<Option<Vec<String>>>>,
    publishing: Rc<Cell<bool>>,
    _subscription: Subscription,
}

impl MyListStore {
    /// Creates a store subscribed to My-List notifications on `bus`.
    ///
    /// Toggle notifications go through `toasts` using the texts and duration in `texts`.
    pub fn new(
        prefs: Rc<dyn PrefsStore>,
        bus: EventBus,
        toasts: ToastCenter,
        texts: ToastConfig,
    ) -> Self {
        let cache: Rc<RefCell<Option<Vec<String>>>> = Rc::default();
        let publishing = Rc::new(Cell::new(false));
        let subscription = {
            let cache = Rc::clone(&cache);
            let publishing = Rc::clone(&publishing);
            bus.subscribe(Topic::MyListUpdated, move || {
                if !publishing.get() {
                    cache.borrow_mut().take();
                }
            })
        };

        Self {
            prefs,
            bus,
            toasts,
            texts,
            cache,
            publishing,
            _subscription: subscription,
        }
    }

    fn with_ids<R>(&self, f: impl FnOnce(&mut Vec<String>) -> R) -> R {
        let mut cache = self.cache.borrow_mut();
        let ids = cache.get_or_insert_with(|| load_ids(self.prefs.as_ref()));
        f(ids)
    }

    /// Returns the bookmarked ids.
    pub fn get_all(&self) -> Vec<String> {
        self.with_ids(|ids| ids.clone())
    }

    /// Returns whether `content_id` is bookmarked.
    pub fn is_in_list(&self, content_id: &str) -> bool {
        self.with_ids(|ids| ids.iter().any(|id| id == content_id))
    }

    /// Adds `content_id` when absent, removes it otherwise, and returns the new membership.
    ///
    /// Persists the set, notifies other stores, and shows exactly one toast describing the
    /// resulting state.
    pub fn toggle(&self, content_id: &str) -> bool {
        let (added, snapshot) = self.with_ids(|ids| {
            let added = match ids.iter().position(|id| id == content_id) {
                Some(index) => {
                    ids.remove(index);
                    false
                }
                None => {
                    ids.push(content_id.to_string());
                    true
                }
            };
            (added, ids.clone())
        });

        if let Err(err) = save_pref_with(self.prefs.as_ref(), MY_LIST_KEY, &snapshot) {
            logging::warn!("persist my list failed: {err}");
        }

        self.publishing.set(true);
        self.bus.publish(Topic::MyListUpdated);
        self.publishing.set(false);

        let message = if added {
            &self.texts.added_to_list
        } else {
            &self.texts.removed_from_list
        };
        self.toasts.show(
            message.clone(),
            ToastKind::Success,
            Some(self.texts.list_duration_ms),
        );
        added
    }
}

impl std::fmt::Debug for MyListStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MyListStore")
            .field("cached", &self.cache.borrow().as_ref().map(Vec::len))
            .finish_non_exhaustive()
    }
}

fn load_ids(prefs: &dyn PrefsStore) -> Vec<String> {
    let stored: Vec<String> = load_pref_with(prefs, MY_LIST_KEY).unwrap_or_default();
    let mut ids: Vec<String> = Vec::with_capacity(stored.len());
    for id in stored {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}
