//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side host wiring layer. Today it provides the
//! `localStorage` prefs adapter and the compile-time host strategy that decides whether the
//! catalog runs against real browser storage or the headless no-op composition.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod storage;

pub use adapters::{
    build_host_services, host_capabilities, host_strategy_name, prefs_store,
    selected_host_strategy, PrefsStoreAdapter,
};
pub use storage::local_prefs::WebPrefsStore;
