//! Application-scoped service bundle shared by every view.

use std::rc::Rc;

use catalog_api::{ApiClient, ApiError, AuthApi, ContentApi, HttpAuthApi, HttpContentApi};
use platform_host::{HostServices, PrefsStore};

use crate::{
    config::CatalogConfig, event_bus::EventBus, my_list::MyListStore, session::SessionContainer,
    toast::ToastCenter, watch_history::WatchHistoryStore,
};

/// Explicitly constructed services: one bus, toast center and session per application.
///
/// Store instances are per consumer; build them with [`CatalogServices::watch_history`] and
/// [`CatalogServices::my_list`] so they share this bundle's storage and bus.
#[derive(Clone)]
pub struct CatalogServices {
    pub config: Rc<CatalogConfig>,
    pub host: HostServices,
    pub bus: EventBus,
    pub toasts: ToastCenter,
    pub session: SessionContainer,
    pub content: Rc<dyn ContentApi>,
}

impl CatalogServices {
    /// Assembles services around explicit API collaborators.
    pub fn new(
        host: HostServices,
        config: CatalogConfig,
        auth: Rc<dyn AuthApi>,
        content: Rc<dyn ContentApi>,
    ) -> Self {
        let bus = EventBus::new();
        let toasts = ToastCenter::new(bus.clone(), config.toast.default_duration_ms);
        let session = SessionContainer::new(Rc::clone(&host.prefs), auth, bus.clone());
        Self {
            config: Rc::new(config),
            host,
            bus,
            toasts,
            session,
            content,
        }
    }

    /// Assembles services with HTTP collaborators for `config.api.base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] when the configured base URL is unusable.
    pub fn with_http_apis(host: HostServices, config: CatalogConfig) -> Result<Self, ApiError> {
        let client = ApiClient::new(&config.api.base_url)?;
        let auth = Rc::new(HttpAuthApi::new(client.clone()));
        let content = Rc::new(HttpContentApi::new(client));
        Ok(Self::new(host, config, auth, content))
    }

    /// Returns whether store writes survive a reload on this host.
    pub fn persists_state(&self) -> bool {
        self.host.capabilities.durable_storage.is_available()
    }

    fn prefs(&self) -> Rc<dyn PrefsStore> {
        Rc::clone(&self.host.prefs)
    }

    /// Creates a watch history store for one consumer.
    pub fn watch_history(&self) -> WatchHistoryStore {
        WatchHistoryStore::new(self.prefs(), self.bus.clone())
    }

    /// Creates a My-List store for one consumer.
    pub fn my_list(&self) -> MyListStore {
        MyListStore::new(
            self.prefs(),
            self.bus.clone(),
            self.toasts.clone(),
            self.config.toast.clone(),
        )
    }
}

impl std::fmt::Debug for CatalogServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogServices")
            .field("host", &self.host)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use platform_host::{HostCapabilities, HostStrategy, MemoryPrefsStore};
    use pretty_assertions::assert_eq;

    use super::*;

    fn memory_host() -> HostServices {
        HostServices::new(
            Rc::new(MemoryPrefsStore::default()),
            HostCapabilities::browser(),
            HostStrategy::Browser,
        )
    }

    #[test]
    fn stores_built_from_one_bundle_stay_in_sync() {
        let services =
            CatalogServices::with_http_apis(memory_host(), CatalogConfig::default()).expect("services");
        let player = services.watch_history();
        let row = services.watch_history();
        let card = services.my_list();
        let page = services.my_list();

        assert_eq!(row.get_progress("m1"), 0.0);
        player.update_progress("m1", 33.0);
        assert_eq!(row.get_progress("m1"), 33.0);

        card.toggle("m1");
        assert!(page.is_in_list("m1"));
        assert_eq!(services.toasts.active().len(), 1);
    }

    #[test]
    fn separate_bundles_do_not_share_notifications() {
        let first = CatalogServices::with_http_apis(memory_host(), CatalogConfig::default())
            .expect("services");
        let second = CatalogServices::with_http_apis(memory_host(), CatalogConfig::default())
            .expect("services");
        first.my_list().toggle("m1");
        assert!(second.toasts.active().is_empty());
    }

    #[test]
    fn durable_storage_follows_host_capabilities() {
        let browser = CatalogServices::with_http_apis(memory_host(), CatalogConfig::default())
            .expect("services");
        assert!(browser.persists_state());

        let headless =
            CatalogServices::with_http_apis(HostServices::headless(), CatalogConfig::default())
                .expect("services");
        assert!(!headless.persists_state());
        headless.watch_history().update_progress("m1", 10.0);
        assert_eq!(headless.watch_history().get_progress("m1"), 0.0);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let mut config = CatalogConfig::default();
        config.api.base_url = "localhost:3001".to_string();
        let err = CatalogServices::with_http_apis(HostServices::headless(), config)
            .expect_err("invalid url");
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }
}
