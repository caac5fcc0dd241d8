//! Shared host-bundle and capability models for browser and headless composition.

use std::rc::Rc;

use crate::{NoopPrefsStore, PrefsStore};

/// Stable host strategy selected for the current build/runtime composition path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Browser-backed runtime composition (`wasm32` with `window.localStorage`).
    Browser,
    /// Headless composition with no durable storage (server rendering, native tests).
    Headless,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Headless => "headless",
        }
    }
}

/// Host availability state for one optional capability domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityStatus {
    /// Capability is available.
    Available,
    /// Capability is not supported on the active host; operations silently no-op.
    Unavailable,
}

impl CapabilityStatus {
    /// Returns whether the capability can be used immediately.
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Host capability snapshot exposed to runtime wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCapabilities {
    /// Durable per-origin key/value storage.
    pub durable_storage: CapabilityStatus,
}

impl HostCapabilities {
    /// Browser capability posture.
    pub const fn browser() -> Self {
        Self {
            durable_storage: CapabilityStatus::Available,
        }
    }

    /// Headless capability posture.
    pub const fn headless() -> Self {
        Self {
            durable_storage: CapabilityStatus::Unavailable,
        }
    }
}

/// Runtime-selected host service bundle injected into the catalog runtime.
///
/// Environment-specific adapter selection happens before this bundle is built, which keeps
/// `catalog_runtime` decoupled from browser APIs.
#[derive(Clone)]
pub struct HostServices {
    /// Durable key/value store shared by every catalog store.
    pub prefs: Rc<dyn PrefsStore>,
    /// Host availability snapshot.
    pub capabilities: HostCapabilities,
    /// Stable strategy identifier for diagnostics.
    pub host_strategy: HostStrategy,
}

impl HostServices {
    /// Builds a bundle around an explicit prefs store.
    pub fn new(
        prefs: Rc<dyn PrefsStore>,
        capabilities: HostCapabilities,
        host_strategy: HostStrategy,
    ) -> Self {
        Self {
            prefs,
            capabilities,
            host_strategy,
        }
    }

    /// Headless bundle whose storage silently no-ops.
    pub fn headless() -> Self {
        Self::new(
            Rc::new(NoopPrefsStore),
            HostCapabilities::headless(),
            HostStrategy::Headless,
        )
    }
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices")
            .field("capabilities", &self.capabilities)
            .field("host_strategy", &self.host_strategy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_bundle_reports_missing_storage() {
        let host = HostServices::headless();
        assert_eq!(host.host_strategy, HostStrategy::Headless);
        assert!(!host.capabilities.durable_storage.is_available());
        assert_eq!(host.prefs.load_pref("anything").expect("load"), None);
    }

    #[test]
    fn strategy_tokens_are_stable() {
        assert_eq!(HostStrategy::Browser.as_str(), "browser");
        assert_eq!(HostStrategy::Headless.as_str(), "headless");
    }
}
