//! Leptos provider and hooks wiring the catalog services into the view tree.
//!
//! The provider owns the bus subscriptions that mirror session and toast state into signals.
//! Store hooks create one store per calling component; the store is dropped, and its bus
//! subscription released, when the component's owner is disposed.
#![allow(clippy::clone_on_copy)]

use leptos::*;

use crate::{
    cancel::CancelScope,
    config::CatalogConfig,
    event_bus::{Subscription, Topic},
    my_list::MyListStore,
    services::CatalogServices,
    session::{SessionContainer, SessionState},
    toast::Toast,
    watch_history::{WatchHistoryEntry, WatchHistoryStore},
};

#[derive(Clone, Copy)]
/// Leptos context for reading catalog state and reaching the services bundle.
pub struct CatalogRuntimeContext {
    /// Application-scoped services.
    pub services: StoredValue<CatalogServices>,
    /// Mirror of the session container state.
    pub session: RwSignal<SessionState>,
    /// Mirror of the active toast list.
    pub toasts: RwSignal<Vec<Toast>>,
    /// Bumped on every watch history write.
    pub watch_history_revision: RwSignal<u64>,
    /// Bumped on every My-List write.
    pub my_list_revision: RwSignal<u64>,
}

impl CatalogRuntimeContext {
    /// Shared session container.
    pub fn session_container(&self) -> SessionContainer {
        self.services.with_value(|services| services.session.clone())
    }

    /// Typed configuration.
    pub fn config(&self) -> std::rc::Rc<CatalogConfig> {
        self.services.with_value(|services| services.config.clone())
    }
}

fn bump(revision: RwSignal<u64>) {
    revision.update(|value| *value = value.wrapping_add(1));
}

fn install_bus_mirrors(runtime: CatalogRuntimeContext) -> Vec<Subscription> {
    let services = runtime.services;
    let bus = services.with_value(|services| services.bus.clone());

    vec![
        bus.subscribe(Topic::SessionChanged, move || {
            if let Some(state) = services.try_with_value(|services| services.session.state()) {
                runtime.session.set(state);
            }
        }),
        bus.subscribe(Topic::ToastsUpdated, move || {
            if let Some(active) = services.try_with_value(|services| services.toasts.active()) {
                runtime.toasts.set(active);
            }
        }),
        bus.subscribe(Topic::WatchHistoryUpdated, move || {
            bump(runtime.watch_history_revision)
        }),
        bus.subscribe(Topic::MyListUpdated, move || bump(runtime.my_list_revision)),
    ]
}

#[component]
/// Provides [`CatalogRuntimeContext`] to descendant components.
pub fn CatalogProvider(
    /// Services assembled by the entry layer.
    services: CatalogServices,
    children: Children,
) -> impl IntoView {
    let session = create_rw_signal(services.session.state());
    let toasts = create_rw_signal(services.toasts.active());
    logging::log!(
        "catalog runtime on {} host, api {}",
        services.host.host_strategy.as_str(),
        services.config.api.base_url
    );
    if !services.persists_state() {
        logging::warn!("durable storage unavailable; catalog state resets on reload");
    }

    let runtime = CatalogRuntimeContext {
        services: store_value(services),
        session,
        toasts,
        watch_history_revision: create_rw_signal(0),
        my_list_revision: create_rw_signal(0),
    };

    let subscriptions = store_value(install_bus_mirrors(runtime));
    on_cleanup(move || subscriptions.update_value(Vec::clear));

    provide_context(runtime.clone());

    children().into_view()
}

/// Returns the current [`CatalogRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`CatalogProvider`].
pub fn use_catalog() -> CatalogRuntimeContext {
    use_context::<CatalogRuntimeContext>().expect("CatalogRuntimeContext not provided")
}

/// Reactive session snapshot.
pub fn use_session() -> Signal<SessionState> {
    use_catalog().session.into()
}

/// Cancellation scope cancelled when the calling component unmounts.
pub fn use_cancel_scope() -> CancelScope {
    let scope = CancelScope::new();
    let on_unmount = scope.clone();
    on_cleanup(move || on_unmount.cancel());
    scope
}

#[derive(Clone, Copy)]
/// Component-scoped watch history store with reactive reads.
pub struct WatchHistoryHandle {
    store: StoredValue<WatchHistoryStore>,
    revision: RwSignal<u64>,
}

impl WatchHistoryHandle {
    /// Tracked progress read.
    pub fn progress(&self, content_id: &str) -> f64 {
        self.revision.track();
        self.store
            .try_with_value(|store| store.get_progress(content_id))
            .unwrap_or(0.0)
    }

    /// Tracked collection read.
    pub fn entries(&self) -> Vec<WatchHistoryEntry> {
        self.revision.track();
        self.store
            .try_with_value(WatchHistoryStore::get_all)
            .unwrap_or_default()
    }

    pub fn update_progress(&self, content_id: &str, progress: f64) {
        self.store
            .with_value(|store| store.update_progress(content_id, progress));
    }
}

/// Creates a watch history store owned by the calling component.
pub fn use_watch_history() -> WatchHistoryHandle {
    let runtime = use_catalog();
    let store = runtime
        .services
        .with_value(|services| services.watch_history());
    WatchHistoryHandle {
        store: store_value(store),
        revision: runtime.watch_history_revision,
    }
}

#[derive(Clone, Copy)]
/// Component-scoped My-List store with reactive reads.
pub struct MyListHandle {
    store: StoredValue<MyListStore>,
    revision: RwSignal<u64>,
}

impl MyListHandle {
    /// Tracked membership read.
    pub fn is_in_list(&self, content_id: &str) -> bool {
        self.revision.track();
        self.store
            .try_with_value(|store| store.is_in_list(content_id))
            .unwrap_or(false)
    }

    /// Tracked id list read.
    pub fn ids(&self) -> Vec<String> {
        self.revision.track();
        self.store
            .try_with_value(MyListStore::get_all)
            .unwrap_or_default()
    }

    /// Toggles membership and returns the new state.
    pub fn toggle(&self, content_id: &str) -> bool {
        self.store.with_value(|store| store.toggle(content_id))
    }
}

/// Creates a My-List store owned by the calling component.
pub fn use_my_list() -> MyListHandle {
    let runtime = use_catalog();
    let store = runtime.services.with_value(|services| services.my_list());
    MyListHandle {
        store: store_value(store),
        revision: runtime.my_list_revision,
    }
}
