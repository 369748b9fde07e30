//! Session controller — the process-wide authentication state machine.
//!
//! STATE MACHINE
//! =============
//! `Anonymous -> Authenticating -> Authenticated | Failed`, with logout
//! and forced invalidation collapsing back to `Anonymous`. The tagged
//! state keeps the identity and bearer token inside `Authenticated`, so
//! a user without a token (or the reverse) cannot be represented.
//!
//! CONCURRENCY
//! ===========
//! At most one login/register/initialize attempt is in flight; later
//! calls get `SessionError::Busy` before any network traffic happens.
//! Every reset bumps an attempt epoch, and a response is applied only
//! if its epoch is still current; a response that raced a logout is
//! dropped instead of resurrecting the session. The mutex is held only
//! across synchronous sections, never across an await.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use crate::net::api::{ApiError, AuthApi};
use crate::net::types::{AuthSuccess, User};
use crate::util::token_store::TokenStore;

const LOGIN_FAILED: &str = "invalid email or password";
const REGISTER_FAILED: &str = "registration failed";
const NETWORK_FAILED: &str = "could not reach the marketplace service";

// =============================================================================
// STATE
// =============================================================================

/// Tagged authentication state. `Failed` gates like `Anonymous` but
/// retains the last failure message until the next attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated { user: User, token: String },
    Failed { error: String },
}

impl SessionState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    #[must_use]
    pub fn is_authenticating(&self) -> bool {
        matches!(self, Self::Authenticating)
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Authenticated { token, .. } => Some(token),
            _ => None,
        }
    }

    /// Display text of the last failed attempt, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { error } => Some(error),
            _ => None,
        }
    }
}

// =============================================================================
// ERROR
// =============================================================================

/// Errors surfaced to the view that initiated a session operation.
/// Views display the message text and nothing more.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("email already registered")]
    EmailTaken,

    #[error("network failure: {0}")]
    NetworkFailure(String),

    #[error("session is no longer valid")]
    Unauthorized,

    /// Another login/register/initialize attempt is already in flight.
    #[error("another sign-in attempt is already in progress")]
    Busy,
}

impl From<ApiError> for SessionError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::InvalidCredentials => Self::InvalidCredentials,
            ApiError::EmailTaken => Self::EmailTaken,
            ApiError::Unauthorized => Self::Unauthorized,
            other => Self::NetworkFailure(other.to_string()),
        }
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

#[derive(Clone, Copy, Debug)]
enum AttemptKind {
    Login,
    Register,
}

struct Inner {
    state: SessionState,
    epoch: u64,
}

/// Owner of the session singleton. The only writer of the token store.
///
/// Methods take `&self`; the controller is safe to share across host
/// tasks behind an `Arc`.
pub struct SessionController {
    api: Arc<dyn AuthApi>,
    store: TokenStore,
    inner: Mutex<Inner>,
    changed: watch::Sender<SessionState>,
}

impl SessionController {
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>, store: TokenStore) -> Self {
        let (changed, _) = watch::channel(SessionState::Anonymous);
        Self { api, store, inner: Mutex::new(Inner { state: SessionState::Anonymous, epoch: 0 }), changed }
    }

    /// Current state snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.lock().state.clone()
    }

    /// Watch state transitions; the receiver always holds the latest
    /// snapshot. The router re-resolves on every change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.changed.subscribe()
    }

    /// Restore a persisted session at start-up, if any.
    ///
    /// With no stored token this settles in `Anonymous` immediately and
    /// without network traffic. Otherwise the profile endpoint validates
    /// the token: success moves to `Authenticated`, any failure purges
    /// the token and settles in `Anonymous`, never half-authenticated.
    /// Collaborator failures are logged rather than returned; start-up
    /// has no view to display them.
    ///
    /// # Errors
    ///
    /// `Busy` if another attempt is already in flight.
    pub async fn initialize(&self) -> Result<SessionState, SessionError> {
        let Some(token) = self.store.get() else {
            return Ok(self.snapshot());
        };
        let attempt = self.begin_attempt()?;
        let result = self.api.get_profile(&token).await;
        let mut inner = self.lock();
        if inner.epoch != attempt {
            tracing::debug!("discarding stale profile response");
            return Ok(inner.state.clone());
        }
        match result {
            Ok(user) => {
                inner.state = SessionState::Authenticated { user, token };
            }
            Err(error) => {
                tracing::debug!(%error, "silent re-authentication failed");
                self.store.clear();
                inner.state = SessionState::Anonymous;
            }
        }
        self.publish(&inner.state);
        Ok(inner.state.clone())
    }

    /// Exchange credentials for a session.
    ///
    /// On success the token is persisted and the state moves to
    /// `Authenticated`. On rejection the state moves to `Failed` with a
    /// display message that does not reveal whether the email exists or
    /// the password was wrong.
    ///
    /// # Errors
    ///
    /// `Busy` while another attempt is in flight; otherwise the failure
    /// that moved the state to `Failed`.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionState, SessionError> {
        let attempt = self.begin_attempt()?;
        let result = self.api.login(email, password).await;
        self.finish_attempt(AttemptKind::Login, attempt, result)
    }

    /// Create an account and sign it in. Same shape as [`Self::login`];
    /// an already-registered email is surfaced verbatim as `EmailTaken`.
    ///
    /// # Errors
    ///
    /// As `login`, plus `EmailTaken`.
    pub async fn register(&self, email: &str, password: &str) -> Result<SessionState, SessionError> {
        let attempt = self.begin_attempt()?;
        let result = self.api.register(email, password).await;
        self.finish_attempt(AttemptKind::Register, attempt, result)
    }

    /// Drop the session: token cleared, user cleared, error cleared.
    /// Synchronous, idempotent, cannot fail. Any in-flight attempt is
    /// invalidated and its response will be discarded.
    pub fn logout(&self) {
        self.reset();
    }

    /// Forced logout: a downstream call reported that the bearer token
    /// is no longer valid. Reachable from any view; the trigger is never
    /// surfaced there as a raw error.
    pub fn invalidate(&self) {
        tracing::info!("session invalidated by the service");
        self.reset();
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &SessionState) {
        self.changed.send_replace(state.clone());
    }

    /// Clear the session and invalidate any in-flight attempt. Bumping the
    /// epoch ensures a late response is discarded by `finish_attempt`.
    fn reset(&self) {
        let mut inner = self.lock();
        self.store.clear();
        inner.state = SessionState::Anonymous;
        inner.epoch += 1;
        self.publish(&inner.state);
    }

    /// Move to `Authenticating` and reserve the attempt slot.
    fn begin_attempt(&self) -> Result<u64, SessionError> {
        let mut inner = self.lock();
        if inner.state.is_authenticating() {
            return Err(SessionError::Busy);
        }
        inner.state = SessionState::Authenticating;
        inner.epoch += 1;
        self.publish(&inner.state);
        Ok(inner.epoch)
    }

    fn finish_attempt(
        &self,
        kind: AttemptKind,
        attempt: u64,
        result: Result<AuthSuccess, ApiError>,
    ) -> Result<SessionState, SessionError> {
        let mut inner = self.lock();
        if inner.epoch != attempt {
            // The session moved on (logout/invalidate) while the call
            // was in flight; the response must not resurrect it.
            tracing::debug!(?kind, "discarding stale auth response");
            return Ok(inner.state.clone());
        }
        match result {
            Ok(AuthSuccess { user, token }) => {
                if let Err(error) = self.store.set(&token) {
                    tracing::warn!(%error, "token persistence failed");
                }
                inner.state = SessionState::Authenticated { user, token };
                self.publish(&inner.state);
                Ok(inner.state.clone())
            }
            Err(error) => {
                inner.state = SessionState::Failed { error: failure_text(kind, &error) };
                self.publish(&inner.state);
                Err(error.into())
            }
        }
    }
}

fn failure_text(kind: AttemptKind, error: &ApiError) -> String {
    match error {
        ApiError::EmailTaken => error.to_string(),
        ApiError::InvalidCredentials | ApiError::Unauthorized | ApiError::Forbidden => match kind {
            AttemptKind::Login => LOGIN_FAILED.to_owned(),
            AttemptKind::Register => REGISTER_FAILED.to_owned(),
        },
        ApiError::Request(_) | ApiError::Response { .. } | ApiError::Parse(_) => NETWORK_FAILED.to_owned(),
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
