use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use catalog_api::{
    ApiError, ApiResult, AuthApi, AuthResponse, AuthUser, LoginRequest, PasswordChange,
    ProfileUpdate, RegisterRequest,
};
use leptos::logging;
use platform_host::PrefsStore;
use thiserror::Error;

use super::{
    model::{SessionPhase, SessionState},
    reducer::{reduce_session, SessionAction, SessionEffect, SessionReducerError},
    storage::{clear_persisted_session, load_persisted_session, persist_session, persist_user},
};
use crate::{
    cancel::{CancelScope, Cancelled},
    event_bus::{EventBus, Topic},
    validation::ValidationError,
};

/// Failure returned to the view that started a session action.
///
/// Only [`SessionError::Rejected`] is also recorded in [`SessionState::error`]; cancellation and
/// superseding leave it untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The auth collaborator rejected the request or the network failed.
    #[error("{0}")]
    Rejected(String),
    /// The initiating view went away before the response arrived.
    #[error("Request cancelled")]
    Cancelled,
    /// The action needs a signed-in session.
    #[error("Not authenticated")]
    NotAuthenticated,
    /// Form input failed local checks.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A sign-out or newer action replaced this one; its response was discarded.
    #[error("superseded by a newer session action")]
    Superseded,
}

impl SessionError {
    /// Returns whether the view should ignore this outcome silently.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Superseded)
    }
}

impl From<Cancelled> for SessionError {
    fn from(_: Cancelled) -> Self {
        Self::Cancelled
    }
}

struct SessionInner {
    state: RefCell<SessionState>,
    prefs: Rc<dyn PrefsStore>,
    auth: Rc<dyn AuthApi>,
    bus: EventBus,
    epoch: Cell<u64>,
}

/// Owner of the session state.
///
/// Clones share one session. Every action starts a new request epoch; a response that
/// arrives after a newer action (including sign-out) is discarded.
#[derive(Clone)]
pub struct SessionContainer {
    inner: Rc<SessionInner>,
}

impl SessionContainer {
    /// Creates a signed-out, not yet hydrated session.
    pub fn new(prefs: Rc<dyn PrefsStore>, auth: Rc<dyn AuthApi>, bus: EventBus) -> Self {
        Self {
            inner: Rc::new(SessionInner {
                state: RefCell::new(SessionState::default()),
                prefs,
                auth,
                bus,
                epoch: Cell::new(0),
            }),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn phase(&self) -> SessionPhase {
        self.inner.state.borrow().phase
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    pub fn is_hydrated(&self) -> bool {
        self.inner.state.borrow().hydrated
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.inner.state.borrow().user.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.state.borrow().token.clone()
    }

    pub fn loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.inner.state.borrow().error.clone()
    }

    fn dispatch(&self, action: SessionAction) -> Result<(), SessionReducerError> {
        let (changed, effects, snapshot) = {
            let mut state = self.inner.state.borrow_mut();
            let previous = state.clone();
            let effects = reduce_session(&mut state, action)?;
            (*state != previous, effects, state.clone())
        };

        for effect in effects {
            self.run_effect(effect, &snapshot);
        }
        if changed {
            self.inner.bus.publish(Topic::SessionChanged);
        }
        Ok(())
    }

    fn dispatch_logged(&self, action: SessionAction) {
        if let Err(err) = self.dispatch(action) {
            logging::warn!("session reducer error: {err}");
        }
    }

    fn run_effect(&self, effect: SessionEffect, state: &SessionState) {
        let prefs = self.inner.prefs.as_ref();
        let result = match (effect, state.user.as_ref(), state.token.as_deref()) {
            (SessionEffect::PersistSession, Some(user), Some(token)) => {
                persist_session(prefs, user, token)
            }
            (SessionEffect::PersistUser, Some(user), _) => persist_user(prefs, user),
            (SessionEffect::ClearSession, _, _) => clear_persisted_session(prefs),
            _ => Ok(()),
        };
        if let Err(err) = result {
            logging::warn!("session persistence failed ({effect:?}): {err}");
        }
    }

    fn next_epoch(&self) -> u64 {
        let epoch = self.inner.epoch.get().wrapping_add(1);
        self.inner.epoch.set(epoch);
        epoch
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.inner.epoch.get() == epoch
    }

    /// Restores the session from durable storage.
    ///
    /// Absent or malformed stored values leave the session signed out without an error.
    pub fn hydrate(&self) {
        let session = load_persisted_session(self.inner.prefs.as_ref());
        if session.is_some() {
            logging::log!("session restored from storage");
        }
        self.dispatch_logged(SessionAction::Hydrated { session });
    }

    /// Signs in. On success both durable auth keys are written before this resolves.
    ///
    /// # Errors
    ///
    /// [`SessionError::Rejected`] with the collaborator's message (also stored in
    /// [`SessionState::error`]), [`SessionError::Cancelled`] when `scope` is cancelled, or
    /// [`SessionError::Superseded`] when a newer action replaced this one.
    pub async fn login(
        &self,
        scope: &CancelScope,
        request: LoginRequest,
    ) -> Result<AuthUser, SessionError> {
        let epoch = self.begin_auth();
        let outcome = scope.run(self.inner.auth.login(&request)).await;
        self.finish_auth(epoch, outcome)
    }

    /// Registers and signs in; same contract as [`SessionContainer::login`].
    ///
    /// # Errors
    ///
    /// See [`SessionContainer::login`].
    pub async fn register(
        &self,
        scope: &CancelScope,
        request: RegisterRequest,
    ) -> Result<AuthUser, SessionError> {
        let epoch = self.begin_auth();
        let outcome = scope.run(self.inner.auth.register(&request)).await;
        self.finish_auth(epoch, outcome)
    }

    fn begin_auth(&self) -> u64 {
        let epoch = self.next_epoch();
        self.dispatch_logged(SessionAction::AuthRequested);
        epoch
    }

    fn finish_auth(
        &self,
        epoch: u64,
        outcome: Result<ApiResult<AuthResponse>, Cancelled>,
    ) -> Result<AuthUser, SessionError> {
        if !self.is_current(epoch) {
            return Err(stale_outcome(&outcome));
        }
        match outcome {
            Err(Cancelled) => {
                self.dispatch_logged(SessionAction::RequestCancelled);
                Err(SessionError::Cancelled)
            }
            Ok(Err(err)) => {
                let message = err.to_string();
                self.dispatch_logged(SessionAction::AuthFailed {
                    message: message.clone(),
                });
                Err(SessionError::Rejected(message))
            }
            Ok(Ok(AuthResponse { user, access_token })) => {
                logging::log!("signed in as user {}", user.id);
                self.dispatch_logged(SessionAction::AuthSucceeded {
                    user: user.clone(),
                    token: access_token,
                });
                Ok(user)
            }
        }
    }

    /// Clears the in-memory session and both durable auth keys. Never fails.
    ///
    /// Any in-flight action is superseded.
    pub fn sign_out(&self) {
        self.next_epoch();
        self.dispatch_logged(SessionAction::SignedOut);
        logging::log!("signed out");
    }

    /// Reloads the profile for the current token and persists it.
    ///
    /// A rejected token (HTTP 401) signs the session out.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotAuthenticated`] before any network call when signed out, otherwise
    /// as [`SessionContainer::login`].
    pub async fn refresh_profile(&self, scope: &CancelScope) -> Result<AuthUser, SessionError> {
        let (epoch, token) = self.begin_profile()?;
        let outcome = scope.run(self.inner.auth.get_profile(&token)).await;
        self.finish_profile(epoch, outcome)
    }

    /// Sends the changed profile fields and persists the returned user.
    ///
    /// An empty update resolves to the current user without a network call.
    ///
    /// # Errors
    ///
    /// See [`SessionContainer::refresh_profile`].
    pub async fn update_profile(
        &self,
        scope: &CancelScope,
        update: ProfileUpdate,
    ) -> Result<AuthUser, SessionError> {
        if update.is_empty() {
            return self.user().ok_or(SessionError::NotAuthenticated);
        }
        let (epoch, token) = self.begin_profile()?;
        let outcome = scope
            .run(self.inner.auth.update_profile(&token, &update))
            .await;
        self.finish_profile(epoch, outcome)
    }

    /// Changes the password. Session state only reflects `loading` and `error`.
    ///
    /// # Errors
    ///
    /// See [`SessionContainer::refresh_profile`].
    pub async fn change_password(
        &self,
        scope: &CancelScope,
        change: PasswordChange,
    ) -> Result<(), SessionError> {
        let (epoch, token) = self.begin_profile()?;
        let outcome = scope
            .run(self.inner.auth.change_password(&token, &change))
            .await;
        if !self.is_current(epoch) {
            return Err(stale_outcome(&outcome));
        }
        match outcome {
            Err(Cancelled) => {
                self.dispatch_logged(SessionAction::RequestCancelled);
                Err(SessionError::Cancelled)
            }
            Ok(Err(err)) => Err(self.profile_failed(err)),
            Ok(Ok(())) => {
                self.dispatch_logged(SessionAction::PasswordChanged);
                Ok(())
            }
        }
    }

    fn begin_profile(&self) -> Result<(u64, String), SessionError> {
        let token = self.token().ok_or(SessionError::NotAuthenticated)?;
        self.dispatch(SessionAction::ProfileRequested)
            .map_err(|_| SessionError::NotAuthenticated)?;
        Ok((self.next_epoch(), token))
    }

    fn finish_profile(
        &self,
        epoch: u64,
        outcome: Result<ApiResult<AuthUser>, Cancelled>,
    ) -> Result<AuthUser, SessionError> {
        if !self.is_current(epoch) {
            return Err(stale_outcome(&outcome));
        }
        match outcome {
            Err(Cancelled) => {
                self.dispatch_logged(SessionAction::RequestCancelled);
                Err(SessionError::Cancelled)
            }
            Ok(Err(err)) => Err(self.profile_failed(err)),
            Ok(Ok(user)) => {
                self.dispatch_logged(SessionAction::ProfileLoaded { user: user.clone() });
                Ok(user)
            }
        }
    }

    fn profile_failed(&self, err: ApiError) -> SessionError {
        let message = err.to_string();
        if err.is_unauthorized() {
            logging::warn!("session token rejected; signing out");
            self.sign_out();
        } else {
            self.dispatch_logged(SessionAction::ProfileFailed {
                message: message.clone(),
            });
        }
        SessionError::Rejected(message)
    }
}

fn stale_outcome<T>(outcome: &Result<T, Cancelled>) -> SessionError {
    match outcome {
        Err(Cancelled) => SessionError::Cancelled,
        Ok(_) => SessionError::Superseded,
    }
}

impl std::fmt::Debug for SessionContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("SessionContainer")
            .field("phase", &state.phase)
            .field("loading", &state.loading)
            .field("hydrated", &state.hydrated)
            .finish_non_exhaustive()
    }
}
