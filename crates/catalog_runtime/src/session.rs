//! Session state container: authentication phase, user profile and bearer token.
//!
//! State transitions live in a pure reducer ([`reduce_session`]); [`SessionContainer`] owns the
//! state, calls the auth collaborator, executes persistence effects and publishes
//! [`crate::event_bus::Topic::SessionChanged`].

mod container;
mod model;
mod reducer;
mod storage;

pub use container::{SessionContainer, SessionError};
pub use model::{PersistedSession, SessionPhase, SessionState};
pub use reducer::{reduce_session, SessionAction, SessionEffect, SessionReducerError};
pub use storage::{
    clear_persisted_session, load_persisted_session, persist_session, persist_user,
    AUTH_TOKEN_KEY, USER_KEY,
};
