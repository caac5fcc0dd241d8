//! Durable `auth_token` / `user` keys.

use catalog_api::AuthUser;
use platform_host::{load_pref_with, save_pref_with, PrefsStore};

use super::model::PersistedSession;

/// Durable key holding the raw bearer token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";
/// Durable key holding the JSON-serialized user.
pub const USER_KEY: &str = "user";

/// Reads the stored session. A missing, empty or unparseable half makes the pair absent.
pub fn load_persisted_session(prefs: &dyn PrefsStore) -> Option<PersistedSession> {
    let token = prefs
        .load_pref(AUTH_TOKEN_KEY)
        .ok()
        .flatten()
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())?;
    let user: AuthUser = load_pref_with(prefs, USER_KEY)?;
    Some(PersistedSession { user, token })
}

/// Writes both auth keys.
///
/// # Errors
///
/// Returns the first storage error; the token is written before the user.
pub fn persist_session(prefs: &dyn PrefsStore, user: &AuthUser, token: &str) -> Result<(), String> {
    prefs.save_pref(AUTH_TOKEN_KEY, token)?;
    persist_user(prefs, user)
}

/// Rewrites the stored user.
///
/// # Errors
///
/// Returns an error when serialization or the storage write fails.
pub fn persist_user(prefs: &dyn PrefsStore, user: &AuthUser) -> Result<(), String> {
    save_pref_with(prefs, USER_KEY, user)
}

/// Deletes both auth keys, attempting each even if the other fails.
///
/// # Errors
///
/// Returns the joined storage errors.
pub fn clear_persisted_session(prefs: &dyn PrefsStore) -> Result<(), String> {
    let errors: Vec<String> = [AUTH_TOKEN_KEY, USER_KEY]
        .into_iter()
        .filter_map(|key| prefs.delete_pref(key).err())
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("; "))
    }
}
