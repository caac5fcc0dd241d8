//! `localStorage`-backed preference store implementation.
//!
//! A missing `window` or a disabled `localStorage` (private browsing, server rendering, native
//! builds) is not an error: reads return `None` and writes silently succeed.

use platform_host::PrefsStore;

#[derive(Debug, Clone, Copy, Default)]
/// Browser preference store backed by `window.localStorage`.
pub struct WebPrefsStore;

impl WebPrefsStore {
    /// Returns whether `localStorage` is reachable from the current context.
    pub fn is_available(self) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage().is_some()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            false
        }
    }
}

impl PrefsStore for WebPrefsStore {
    fn load_pref(&self, key: &str) -> Result<Option<String>, String> {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(storage) = local_storage() else {
                return Ok(None);
            };
            storage
                .get_item(key)
                .map_err(|e| format!("localStorage get_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(None)
        }
    }

    fn save_pref(&self, key: &str, raw: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(storage) = local_storage() else {
                return Ok(());
            };
            storage
                .set_item(key, raw)
                .map_err(|e| format!("localStorage set_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, raw);
            Ok(())
        }
    }

    fn delete_pref(&self, key: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(storage) = local_storage() else {
                return Ok(());
            };
            storage
                .remove_item(key)
                .map_err(|e| format!("localStorage remove_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}
