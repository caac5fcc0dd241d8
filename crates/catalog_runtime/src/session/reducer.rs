//! Session actions, persistence intents, and transition logic.

use catalog_api::AuthUser;
use thiserror::Error;

use super::model::{PersistedSession, SessionPhase, SessionState};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Actions accepted by [`reduce_session`].
pub enum SessionAction {
    /// A login or register request started.
    AuthRequested,
    /// The auth collaborator accepted the credentials.
    AuthSucceeded {
        /// Signed-in user.
        user: AuthUser,
        /// Bearer token.
        token: String,
    },
    /// The auth collaborator rejected the credentials or the network failed.
    AuthFailed {
        /// User-facing failure text.
        message: String,
    },
    /// The in-flight request was abandoned by its view.
    RequestCancelled,
    /// A profile read, profile update or password change started.
    ProfileRequested,
    /// The server returned a fresh profile.
    ProfileLoaded {
        /// Updated user.
        user: AuthUser,
    },
    /// A profile read, profile update or password change failed.
    ProfileFailed {
        /// User-facing failure text.
        message: String,
    },
    /// The password change succeeded.
    PasswordChanged,
    /// Durable storage was read.
    Hydrated {
        /// Stored pair, or `None` when absent or malformed.
        session: Option<PersistedSession>,
    },
    /// Explicit sign-out.
    SignedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Persistence intents emitted by [`reduce_session`] for the container to execute.
pub enum SessionEffect {
    /// Write both `auth_token` and `user`.
    PersistSession,
    /// Rewrite `user` after a profile change.
    PersistUser,
    /// Delete both durable auth keys.
    ClearSession,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that do not apply to the current state.
pub enum SessionReducerError {
    /// Profile actions need an authenticated session.
    #[error("session is not authenticated")]
    NotAuthenticated,
    /// An auth result arrived with no login or register in flight.
    #[error("no auth request in flight")]
    NoAuthInFlight,
}

/// Applies a [`SessionAction`] and collects persistence effects.
///
/// # Errors
///
/// Returns [`SessionReducerError`] when the action does not apply to the current phase; the
/// state is left untouched in that case.
pub fn reduce_session(
    state: &mut SessionState,
    action: SessionAction,
) -> Result<Vec<SessionEffect>, SessionReducerError> {
    let mut effects = Vec::new();
    match action {
        SessionAction::AuthRequested => {
            state.phase = SessionPhase::Authenticating;
            state.user = None;
            state.token = None;
            state.loading = true;
            state.error = None;
        }
        SessionAction::AuthSucceeded { user, token } => {
            ensure_authenticating(state)?;
            state.phase = SessionPhase::Authenticated;
            state.user = Some(user);
            state.token = Some(token);
            state.loading = false;
            state.error = None;
            state.hydrated = true;
            effects.push(SessionEffect::PersistSession);
        }
        SessionAction::AuthFailed { message } => {
            ensure_authenticating(state)?;
            state.phase = SessionPhase::Error;
            state.loading = false;
            state.error = Some(message);
        }
        SessionAction::RequestCancelled => {
            if state.phase == SessionPhase::Authenticating {
                state.phase = SessionPhase::SignedOut;
            }
            state.loading = false;
        }
        SessionAction::ProfileRequested => {
            ensure_authenticated(state)?;
            state.loading = true;
            state.error = None;
        }
        SessionAction::ProfileLoaded { user } => {
            ensure_authenticated(state)?;
            state.user = Some(user);
            state.loading = false;
            effects.push(SessionEffect::PersistUser);
        }
        SessionAction::ProfileFailed { message } => {
            state.loading = false;
            state.error = Some(message);
        }
        SessionAction::PasswordChanged => {
            state.loading = false;
            state.error = None;
        }
        SessionAction::Hydrated { session } => {
            state.hydrated = true;
            let can_restore = matches!(state.phase, SessionPhase::SignedOut | SessionPhase::Error);
            if let (true, Some(session)) = (can_restore, session) {
                state.phase = SessionPhase::Authenticated;
                state.user = Some(session.user);
                state.token = Some(session.token);
                state.error = None;
            }
        }
        SessionAction::SignedOut => {
            *state = SessionState {
                hydrated: true,
                ..SessionState::default()
            };
            effects.push(SessionEffect::ClearSession);
        }
    }
    Ok(effects)
}

fn ensure_authenticating(state: &SessionState) -> Result<(), SessionReducerError> {
    if state.phase == SessionPhase::Authenticating {
        Ok(())
    } else {
        Err(SessionReducerError::NoAuthInFlight)
    }
}

fn ensure_authenticated(state: &SessionState) -> Result<(), SessionReducerError> {
    if state.is_authenticated() {
        Ok(())
    } else {
        Err(SessionReducerError::NotAuthenticated)
    }
}
