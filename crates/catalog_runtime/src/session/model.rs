use catalog_api::AuthUser;

/// Coarse authentication phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// No credentials.
    #[default]
    SignedOut,
    /// A login or register request is in flight.
    Authenticating,
    /// User and token are both present.
    Authenticated,
    /// The last login or register attempt failed. Not authenticated.
    Error,
}

/// User and token pair read back from durable storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSession {
    pub user: AuthUser,
    pub token: String,
}

/// Session snapshot exposed to views through selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub user: Option<AuthUser>,
    pub token: Option<String>,
    /// True strictly between a request starting and its resolution.
    pub loading: bool,
    /// Message from the most recent failed request; cleared when the next one starts.
    pub error: Option<String>,
    /// Whether durable storage has been read during this page life.
    pub hydrated: bool,
}

impl SessionState {
    /// Authenticated exactly when both user and token are present.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }
}
