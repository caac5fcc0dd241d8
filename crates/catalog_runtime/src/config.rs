//! Typed client configuration loaded once from the embedded `catalog.config.toml`.

use serde::Deserialize;
use thiserror::Error;

const EMBEDDED_CONFIG_TOML: &str = include_str!("../catalog.config.toml");

/// Compile-time override for [`ApiConfig::base_url`].
const API_URL_OVERRIDE: Option<&str> = option_env!("CATALOG_API_URL");

/// Errors raised while parsing configuration text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Configuration text is not valid TOML for [`CatalogConfig`].
    #[error("invalid catalog config: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
/// REST endpoint settings.
pub struct ApiConfig {
    /// API base URL, for example `http://localhost:3001/api`.
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001/api".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
/// Notification texts and durations.
pub struct ToastConfig {
    /// Shown after a My-List toggle adds an item.
    pub added_to_list: String,
    /// Shown after a My-List toggle removes an item.
    pub removed_from_list: String,
    /// Lifetime of My-List toasts.
    pub list_duration_ms: u32,
    /// Lifetime of toasts shown without an explicit duration.
    pub default_duration_ms: u32,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            added_to_list: "Added to My List".to_string(),
            removed_from_list: "Removed from My List".to_string(),
            list_duration_ms: 2000,
            default_duration_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
/// Auth routing, form thresholds and user-facing auth error texts.
pub struct AuthConfig {
    /// Sign-in view the auth guard redirects to.
    pub login_route: String,
    /// Landing view after a successful sign-in.
    pub home_route: String,
    /// Minimum accepted password length.
    pub min_password_len: usize,
    /// Minimum accepted display-name length on registration.
    pub min_name_len: usize,
    pub invalid_email: String,
    /// `{min}` expands to `min_password_len`.
    pub password_too_short: String,
    /// `{min}` expands to `min_name_len`.
    pub name_too_short: String,
    pub email_exists: String,
    pub registration_failed: String,
    pub passwords_mismatch: String,
    pub current_password_required: String,
    pub not_authenticated: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_route: "/login".to_string(),
            home_route: "/".to_string(),
            min_password_len: 6,
            min_name_len: 2,
            invalid_email: "Please enter a valid email address".to_string(),
            password_too_short: "Password must be at least {min} characters".to_string(),
            name_too_short: "Name must be at least {min} characters".to_string(),
            email_exists: "This email is already registered. Please sign in instead.".to_string(),
            registration_failed: "Registration failed. Please try again.".to_string(),
            passwords_mismatch: "New passwords do not match".to_string(),
            current_password_required: "Current password is required".to_string(),
            not_authenticated: "Not authenticated".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
/// Root client configuration.
pub struct CatalogConfig {
    /// REST endpoint settings.
    pub api: ApiConfig,
    /// Notification settings.
    pub toast: ToastConfig,
    /// Auth settings.
    pub auth: AuthConfig,
}

impl CatalogConfig {
    /// Parses configuration text. Missing tables and keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when `raw` is not valid TOML or a key has the wrong type.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Loads the configuration compiled into the binary.
    ///
    /// A parse failure is logged and falls back to [`CatalogConfig::default`]. The
    /// `CATALOG_API_URL` build environment variable overrides the API base URL.
    pub fn embedded() -> Self {
        let mut config = match Self::from_toml_str(EMBEDDED_CONFIG_TOML) {
            Ok(config) => config,
            Err(err) => {
                leptos::logging::warn!("{err}; using default catalog config");
                Self::default()
            }
        };
        if let Some(url) = API_URL_OVERRIDE.filter(|url| !url.trim().is_empty()) {
            config.api.base_url = url.trim().to_string();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn embedded_config_matches_defaults() {
        let parsed = CatalogConfig::from_toml_str(EMBEDDED_CONFIG_TOML).expect("embedded config");
        assert_eq!(parsed, CatalogConfig::default());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let parsed = CatalogConfig::from_toml_str(
            r#"
            [toast]
            list_duration_ms = 1500
            "#,
        )
        .expect("partial config");
        assert_eq!(parsed.toast.list_duration_ms, 1500);
        assert_eq!(parsed.toast.default_duration_ms, 3000);
        assert_eq!(parsed.auth.login_route, "/login");
        assert_eq!(parsed.api.base_url, "http://localhost:3001/api");
    }

    #[test]
    fn wrong_type_is_a_parse_error() {
        let err = CatalogConfig::from_toml_str("[auth]\nmin_password_len = \"six\"")
            .expect_err("type mismatch");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
