use std::rc::Rc;

use platform_host::{
    HostCapabilities, HostServices, HostStrategy, NoopPrefsStore, PrefsStore,
};

use crate::WebPrefsStore;

/// Returns the compile-time selected host strategy for the active build.
///
/// Browser adapters are selected on `wasm32` unless the `headless-host` feature forces the
/// no-op composition (used by server rendering and smoke builds).
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(all(target_arch = "wasm32", not(feature = "headless-host")))]
    {
        HostStrategy::Browser
    }

    #[cfg(any(not(target_arch = "wasm32"), feature = "headless-host"))]
    {
        HostStrategy::Headless
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    selected_host_strategy().as_str()
}

/// Adapter enum that erases the concrete prefs backend behind [`PrefsStore`].
#[derive(Debug, Clone, Copy)]
pub enum PrefsStoreAdapter {
    /// Browser `localStorage` persistence.
    Browser(WebPrefsStore),
    /// No-op fallback for hosts without durable storage.
    Headless(NoopPrefsStore),
}

impl PrefsStore for PrefsStoreAdapter {
    fn load_pref(&self, key: &str) -> Result<Option<String>, String> {
        match self {
            Self::Browser(store) => store.load_pref(key),
            Self::Headless(store) => store.load_pref(key),
        }
    }

    fn save_pref(&self, key: &str, raw: &str) -> Result<(), String> {
        match self {
            Self::Browser(store) => store.save_pref(key, raw),
            Self::Headless(store) => store.save_pref(key, raw),
        }
    }

    fn delete_pref(&self, key: &str) -> Result<(), String> {
        match self {
            Self::Browser(store) => store.delete_pref(key),
            Self::Headless(store) => store.delete_pref(key),
        }
    }
}

fn prefs_store_for(strategy: HostStrategy) -> PrefsStoreAdapter {
    match strategy {
        HostStrategy::Browser => PrefsStoreAdapter::Browser(WebPrefsStore),
        HostStrategy::Headless => PrefsStoreAdapter::Headless(NoopPrefsStore),
    }
}

/// Returns the prefs adapter for the selected host strategy.
pub fn prefs_store() -> PrefsStoreAdapter {
    prefs_store_for(selected_host_strategy())
}

fn host_capabilities_for(strategy: HostStrategy) -> HostCapabilities {
    match strategy {
        HostStrategy::Browser if WebPrefsStore.is_available() => HostCapabilities::browser(),
        HostStrategy::Browser | HostStrategy::Headless => HostCapabilities::headless(),
    }
}

/// Returns the capability snapshot for the selected host strategy.
pub fn host_capabilities() -> HostCapabilities {
    host_capabilities_for(selected_host_strategy())
}

/// Builds the injected host service bundle for the active build.
pub fn build_host_services() -> HostServices {
    let strategy = selected_host_strategy();
    HostServices::new(
        Rc::new(prefs_store_for(strategy)),
        host_capabilities_for(strategy),
        strategy,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_host_strategy_matches_build_target() {
        #[cfg(all(target_arch = "wasm32", not(feature = "headless-host")))]
        assert_eq!(selected_host_strategy(), HostStrategy::Browser);

        #[cfg(any(not(target_arch = "wasm32"), feature = "headless-host"))]
        assert_eq!(selected_host_strategy(), HostStrategy::Headless);
    }

    #[test]
    fn adapters_follow_selected_strategy() {
        match selected_host_strategy() {
            HostStrategy::Browser => {
                assert!(matches!(prefs_store(), PrefsStoreAdapter::Browser(_)));
            }
            HostStrategy::Headless => {
                assert!(matches!(prefs_store(), PrefsStoreAdapter::Headless(_)));
                assert!(!host_capabilities().durable_storage.is_available());
            }
        }
    }

    #[test]
    fn headless_adapter_noops_calls() {
        let prefs = prefs_store_for(HostStrategy::Headless);
        assert!(prefs.save_pref("my-list", "[\"m1\"]").is_ok());
        assert_eq!(prefs.load_pref("my-list").expect("load"), None);
    }

    #[test]
    fn host_bundle_reports_strategy() {
        let host = build_host_services();
        assert_eq!(host.host_strategy, selected_host_strategy());
        assert_eq!(host_strategy_name(), host.host_strategy.as_str());
    }
}
