//! Durable storage contracts and lightweight test adapters.

pub mod prefs;

pub use prefs::{
    load_pref_with, save_pref_with, MemoryPrefsStore, NoopPrefsStore, PrefsStore,
};
