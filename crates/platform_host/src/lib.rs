//! Typed host-domain contracts shared by the catalog runtime and browser adapters.
//!
//! This crate is the API-first boundary for platform services. It exposes the durable
//! key/value storage contract, the injected host bundle, and clock helpers, while concrete
//! browser adapters live in `platform_host_web`.
//!
//! # Example
//!
//! ```rust
//! use platform_host::{load_pref_with, save_pref_with, MemoryPrefsStore};
//!
//! let store = MemoryPrefsStore::default();
//! save_pref_with(&store, "my-list", &vec!["m1".to_string()]).expect("serialize");
//! assert_eq!(load_pref_with::<_, Vec<String>>(&store, "my-list"), Some(vec!["m1".to_string()]));
//! ```

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod host;
pub mod storage;
pub mod time;

pub use host::{CapabilityStatus, HostCapabilities, HostServices, HostStrategy};
pub use storage::{load_pref_with, save_pref_with, MemoryPrefsStore, NoopPrefsStore, PrefsStore};
pub use time::{next_monotonic_timestamp_ms, unix_time_ms_now};
