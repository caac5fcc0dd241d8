//! Client-side state core for the Zenithflix catalog.
//!
//! Durable collections (watch history, My-List, session) are write-through caches over a
//! [`platform_host::PrefsStore`]; an [`EventBus`] tells other store instances to re-read after
//! a write. [`SessionContainer`] drives authentication against a [`catalog_api::AuthApi`], and
//! [`AuthGuard`] decides what protected views render.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use catalog_runtime::{EventBus, WatchHistoryStore};
//! use platform_host::MemoryPrefsStore;
//!
//! let prefs = Rc::new(MemoryPrefsStore::default());
//! let bus = EventBus::new();
//! let player = WatchHistoryStore::new(prefs.clone(), bus.clone());
//! let home_row = WatchHistoryStore::new(prefs, bus);
//!
//! player.update_progress("content-1", 50.0);
//! assert_eq!(home_row.get_progress("content-1"), 50.0);
//! ```

pub mod cancel;
pub mod config;
pub mod event_bus;
pub mod guard;
pub mod my_list;
pub mod player;
pub mod runtime_context;
pub mod services;
pub mod session;
pub mod toast;
pub mod validation;
pub mod watch_history;

pub use cancel::{CancelScope, Cancelled};
pub use config::{ApiConfig, AuthConfig, CatalogConfig, ConfigError, ToastConfig};
pub use event_bus::{EventBus, Subscription, Topic};
pub use guard::{decide, AuthGuard, GuardDecision};
pub use my_list::{MyListStore, MY_LIST_KEY};
pub use player::{format_time, PlaybackSimulator, PlaybackStatus};
pub use runtime_context::{
    use_cancel_scope, use_catalog, use_my_list, use_session, use_watch_history,
    CatalogProvider, CatalogRuntimeContext, MyListHandle, WatchHistoryHandle,
};
pub use services::CatalogServices;
pub use session::{
    reduce_session, SessionAction, SessionContainer, SessionEffect, SessionError, SessionPhase,
    SessionReducerError, SessionState,
};
pub use toast::{Toast, ToastCenter, ToastId, ToastKind};
pub use validation::{
    registration_error_message, validate_login, validate_password_change, validate_register,
    ValidationError,
};
pub use watch_history::{WatchHistoryEntry, WatchHistoryStore, WATCH_HISTORY_KEY};
