//! Render gating for protected views.

use std::cell::Cell;

use crate::session::SessionState;

/// What a protected view should do for the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Show the loading placeholder while durable storage has not been read.
    Hydrating {
        /// The caller should run hydration now. Set at most once per mount.
        start_hydration: bool,
    },
    /// Show the loading placeholder and navigate to `to`.
    Redirect {
        /// Sign-in route.
        to: String,
    },
    /// Render the protected children.
    Render,
}

impl GuardDecision {
    /// Returns whether protected children may be rendered.
    pub fn renders_children(&self) -> bool {
        matches!(self, Self::Render)
    }
}

/// Pure guard decision. `hydration_started` tells whether this mount already asked for
/// hydration.
pub fn decide(session: &SessionState, hydration_started: bool, login_route: &str) -> GuardDecision {
    if !session.hydrated {
        return GuardDecision::Hydrating {
            start_hydration: !hydration_started,
        };
    }
    if session.is_authenticated() {
        GuardDecision::Render
    } else {
        GuardDecision::Redirect {
            to: login_route.to_string(),
        }
    }
}

/// Per-mount guard that remembers whether hydration was already requested.
#[derive(Debug)]
pub struct AuthGuard {
    login_route: String,
    hydration_requested: Cell<bool>,
}

impl AuthGuard {
    /// Creates a guard for one mounted protected view.
    pub fn new(login_route: impl Into<String>) -> Self {
        Self {
            login_route: login_route.into(),
            hydration_requested: Cell::new(false),
        }
    }

    /// Evaluates `session`. The first evaluation before hydration returns
    /// `start_hydration: true`; later ones return `false`.
    pub fn evaluate(&self, session: &SessionState) -> GuardDecision {
        let decision = decide(session, self.hydration_requested.get(), &self.login_route);
        if let GuardDecision::Hydrating {
            start_hydration: true,
        } = decision
        {
            self.hydration_requested.set(true);
        }
        decision
    }
}
