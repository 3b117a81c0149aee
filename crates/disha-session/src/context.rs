//! The session context: one state machine, one transition function.
//!
//! States: `Uninitialized → Loading → {Authenticated, Unauthenticated}`.
//! Every mutation goes through [`SessionContext::transition`]; storage writes
//! always persist token and user together (never one without the other).

use crate::client::{IdentityClient, SessionError};
use crate::guard;
use crate::storage::{AUTH_TOKEN_KEY, AUTH_USER_KEY, SessionStorage};
use crate::user::SessionUser;

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
    /// True once `user` (and its `onboarding_completed` flag) came from the
    /// server in this process lifetime — not merely from persisted storage.
    /// Guards only trust the onboarding flag when this is set.
    pub server_verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Loading,
    Authenticated(Session),
    Unauthenticated,
}

impl SessionState {
    fn name(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Loading => "loading",
            Self::Authenticated(_) => "authenticated",
            Self::Unauthenticated => "unauthenticated",
        }
    }
}

/// Holds the authenticated identity for the whole client application.
///
/// Constructed once at startup and passed down the component tree; pages
/// read state via [`SessionContext::state`] and mutate it only through
/// `initialize` / `login` / `logout` / `refresh_user`.
pub struct SessionContext<S: SessionStorage, C: IdentityClient> {
    storage: S,
    client: C,
    state: SessionState,
    last_error: Option<String>,
}

impl<S: SessionStorage, C: IdentityClient> SessionContext<S, C> {
    pub fn new(storage: S, client: C) -> Self {
        Self {
            storage,
            client,
            state: SessionState::Uninitialized,
            last_error: None,
        }
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    /// Last re-validation error, if the most recent fetch failed in a way
    /// that did not invalidate the session (e.g. network down).
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Hydrate from persisted storage, then re-validate against the server.
    ///
    /// A persisted session is shown optimistically (with
    /// `server_verified = false`) before the `/api/auth/me` round-trip
    /// completes. A rejected token clears both layers; a transport failure
    /// keeps the optimistic state and records the error.
    pub async fn initialize(&mut self) {
        self.transition(SessionState::Loading);

        let Some((token, user)) = self.read_persisted() else {
            self.transition(SessionState::Unauthenticated);
            return;
        };

        self.transition(SessionState::Authenticated(Session {
            token: token.clone(),
            user,
            server_verified: false,
        }));

        self.revalidate(token).await;
    }

    /// Enter the authenticated state with a token+user pair just issued by
    /// the server (OTP verification). Persists both values as one step.
    pub fn login(&mut self, token: String, user: SessionUser) {
        self.write_persisted(&token, &user);
        self.last_error = None;
        self.transition(SessionState::Authenticated(Session {
            token,
            user,
            server_verified: true,
        }));
    }

    /// Clear the persisted session and return the route to navigate to.
    pub fn logout(&mut self) -> &'static str {
        self.clear_persisted();
        self.transition(SessionState::Unauthenticated);
        guard::LOGIN_ROUTE
    }

    /// Re-fetch identity and write it through both layers. Called after
    /// state-changing operations (e.g. completing an onboarding step) so the
    /// cached `onboarding_completed` flag stays current.
    pub async fn refresh_user(&mut self) {
        let token = match &self.state {
            SessionState::Authenticated(session) => session.token.clone(),
            _ => return,
        };
        self.revalidate(token).await;
    }

    async fn revalidate(&mut self, token: String) {
        match self.client.fetch_me(&token).await {
            Ok(Some(fresh)) => {
                // Server is the source of truth; overwrite both layers.
                self.write_persisted(&token, &fresh);
                self.last_error = None;
                self.transition(SessionState::Authenticated(Session {
                    token,
                    user: fresh,
                    server_verified: true,
                }));
            }
            Ok(None) => {
                self.clear_persisted();
                self.last_error = None;
                self.transition(SessionState::Unauthenticated);
            }
            Err(e @ (SessionError::Transport(_) | SessionError::Malformed)) => {
                // Not a rejection: keep the optimistic session, surface the
                // error instead of leaving the call silently pending.
                tracing::warn!(error = %e, "session re-validation failed");
                self.last_error = Some(e.to_string());
            }
        }
    }

    fn read_persisted(&mut self) -> Option<(String, SessionUser)> {
        let token = self.storage.get(AUTH_TOKEN_KEY)?;
        let raw_user = self.storage.get(AUTH_USER_KEY)?;
        match serde_json::from_str::<SessionUser>(&raw_user) {
            Ok(user) => Some((token, user)),
            Err(_) => {
                // Corrupt cache: drop both halves rather than trust one.
                self.clear_persisted();
                None
            }
        }
    }

    fn write_persisted(&mut self, token: &str, user: &SessionUser) {
        let json = serde_json::to_string(user).expect("SessionUser serializes");
        self.storage.set(AUTH_TOKEN_KEY, token);
        self.storage.set(AUTH_USER_KEY, &json);
    }

    fn clear_persisted(&mut self) {
        self.storage.remove(AUTH_TOKEN_KEY);
        self.storage.remove(AUTH_USER_KEY);
    }

    fn transition(&mut self, next: SessionState) {
        tracing::debug!(from = self.state.name(), to = next.name(), "session transition");
        self.state = next;
    }
}
