//! Session store: who is logged in, and how that changes.
//!
//! ARCHITECTURE
//! ============
//! `Session` is plain data with pure transition methods. `SessionStore` runs
//! the async operations (startup validation, login, register, logout) over
//! four seams: the API client, the token storage it carries, a `SessionCell`
//! holding the observable state, and a `Navigator` for redirects. The browser
//! client backs the cell with a reactive signal; tests and the CLI use
//! [`MemoryCell`].
//!
//! STATE MACHINE
//! =============
//! ```text
//! Uninitialized -> Validating      (token persisted)
//! Uninitialized -> Anonymous       (no token)
//! Validating    -> Authenticated   (backend accepted token)
//! Validating    -> Anonymous       (backend rejected token, or logout)
//! Authenticated -> Anonymous       (logout)
//! Anonymous     -> Authenticated   (login / register)
//! ```
//! Every phase change bumps `epoch`. Async operations remember the epoch they
//! started under and drop their result if it moved while they were waiting.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::api::ApiClient;
use crate::error::{ApiError, SessionError};
use crate::routes;
use crate::types::{AuthResponse, Credentials, Registration, Role, User};

/// Lifecycle phase of the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Application has not run startup validation yet.
    #[default]
    Uninitialized,
    /// A persisted token is being checked against the backend.
    Validating,
    Authenticated,
    Anonymous,
}

impl Phase {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Validating => "validating",
            Self::Authenticated => "authenticated",
            Self::Anonymous => "anonymous",
        }
    }
}

/// Client-held record of the current identity and its validity.
///
/// `user` is only ever set together with `token` after the backend vouched
/// for it (validation, login, or register).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
    pub phase: Phase,
    /// Login or register calls still in flight.
    pub in_flight: u32,
    epoch: u64,
}

impl Session {
    /// True until startup validation settles, and during login/register.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Uninitialized | Phase::Validating) || self.is_pending()
    }

    /// At least one login or register call is in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.in_flight > 0
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.phase == Phase::Authenticated && self.user.is_some()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Enter the first real phase from the persisted token, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::IllegalTransition`] unless `Uninitialized`.
    pub fn begin(&mut self, persisted: Option<String>) -> Result<(), SessionError> {
        self.expect_phase(Phase::Uninitialized, "start")?;
        match persisted {
            Some(token) => {
                self.token = Some(token);
                self.advance(Phase::Validating);
            }
            None => self.advance(Phase::Anonymous),
        }
        Ok(())
    }

    /// Backend accepted the persisted token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::IllegalTransition`] unless `Validating`.
    pub fn validated(&mut self, user: User) -> Result<(), SessionError> {
        self.expect_phase(Phase::Validating, "confirm session")?;
        self.user = Some(user);
        self.advance(Phase::Authenticated);
        Ok(())
    }

    /// Backend rejected the persisted token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::IllegalTransition`] unless `Validating`.
    pub fn invalidated(&mut self) -> Result<(), SessionError> {
        self.expect_phase(Phase::Validating, "reject session")?;
        self.clear();
        Ok(())
    }

    /// Login or register succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::IllegalTransition`] unless `Anonymous`.
    pub fn authenticate(&mut self, token: String, user: User) -> Result<(), SessionError> {
        self.expect_phase(Phase::Anonymous, "sign in")?;
        self.token = Some(token);
        self.user = Some(user);
        self.advance(Phase::Authenticated);
        Ok(())
    }

    /// Drop identity and settle as `Anonymous`. Valid from any phase.
    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
        self.advance(Phase::Anonymous);
    }

    fn advance(&mut self, phase: Phase) {
        self.phase = phase;
        self.epoch = self.epoch.wrapping_add(1);
    }

    fn expect_phase(&self, expected: Phase, operation: &'static str) -> Result<(), SessionError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SessionError::IllegalTransition { operation, phase: self.phase.label() })
        }
    }
}

/// Holder of the observable session state.
pub trait SessionCell: Send + Sync {
    fn get(&self) -> Session;
    fn set(&self, session: Session);
}

/// Mutex-backed session cell for native consumers and tests.
#[derive(Debug, Default)]
pub struct MemoryCell {
    inner: Mutex<Session>,
}

impl MemoryCell {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionCell for MemoryCell {
    fn get(&self) -> Session {
        self.inner.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn set(&self, session: Session) {
        if let Ok(mut guard) = self.inner.lock() {
            *guard = session;
        }
    }
}

/// Performs client-side navigation requested by the store.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Single source of truth for "who is logged in", shared by every view.
///
/// Cheap to clone; clones share all state.
#[derive(Clone)]
pub struct SessionStore {
    api: ApiClient,
    cell: Arc<dyn SessionCell>,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &self.cell.get().phase)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    #[must_use]
    pub fn new(api: ApiClient, cell: Arc<dyn SessionCell>, navigator: Arc<dyn Navigator>) -> Self {
        Self { api, cell, navigator }
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.cell.get()
    }

    /// Startup validation of the persisted token.
    ///
    /// With no persisted token the session settles as `Anonymous` without
    /// calling the backend. A rejected token is an implicit logout, not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::IllegalTransition`] if called twice.
    pub async fn start(&self) -> Result<(), SessionError> {
        let persisted = self.api.storage().load().filter(|t| !t.is_empty());
        let has_token = persisted.is_some();
        let epoch = self.transition(|s| s.begin(persisted))?;
        if !has_token {
            log::debug!("no persisted token; session is anonymous");
            return Ok(());
        }

        let result = self.api.user_details().await;
        if self.cell.get().epoch() != epoch {
            log::debug!("session changed during validation; dropping result");
            return Ok(());
        }

        match result {
            Ok(user) => {
                log::info!("session restored for {}", user.username);
                self.transition(|s| s.validated(user))?;
                if let Some(token) = self.cell.get().token {
                    self.api.storage().save(&token);
                }
            }
            Err(err) => {
                log::info!("persisted session rejected: {err}");
                self.transition(Session::invalidated)?;
                self.api.storage().clear();
                self.navigator.navigate(routes::LOGIN);
            }
        }
        Ok(())
    }

    /// Sign in and redirect.
    ///
    /// Goes to `return_to` when it is a safe path the user's role may open,
    /// otherwise to the role's landing view.
    ///
    /// # Errors
    ///
    /// Returns the backend failure (session untouched), or
    /// [`SessionError::IllegalTransition`] unless the session is `Anonymous`.
    pub async fn login(&self, credentials: &Credentials, return_to: Option<&str>) -> Result<User, SessionError> {
        let user = self.sign_in("log in", || self.api.login(credentials)).await?;
        let destination = routes::post_login_destination(user.role, return_to);
        self.navigator.navigate(&destination);
        Ok(user)
    }

    /// Create an account, sign in, and go to the dashboard.
    ///
    /// # Errors
    ///
    /// Returns the backend failure (session untouched), or
    /// [`SessionError::IllegalTransition`] unless the session is `Anonymous`.
    pub async fn register(&self, registration: &Registration) -> Result<User, SessionError> {
        let user = self.sign_in("register", || self.api.register(registration)).await?;
        self.navigator.navigate(routes::DASHBOARD);
        Ok(user)
    }

    /// Forget the session and go to the login view. Safe to repeat.
    pub fn logout(&self) {
        let mut session = self.cell.get();
        session.clear();
        self.cell.set(session);
        self.api.storage().clear();
        log::info!("signed out");
        self.navigator.navigate(routes::LOGIN);
    }

    async fn sign_in<F, Fut>(&self, operation: &'static str, call: F) -> Result<User, SessionError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<AuthResponse, ApiError>>,
    {
        let mut session = self.cell.get();
        if session.phase != Phase::Anonymous {
            return Err(SessionError::IllegalTransition { operation, phase: session.phase.label() });
        }
        let epoch = session.epoch();
        session.in_flight += 1;
        self.cell.set(session);

        let result = call().await;

        let mut session = self.cell.get();
        session.in_flight = session.in_flight.saturating_sub(1);
        let superseded = session.epoch() != epoch;
        self.cell.set(session);
        if superseded {
            return Err(SessionError::Superseded(operation));
        }

        let auth = result?;
        self.transition(|s| s.authenticate(auth.token.clone(), auth.user.clone()))?;
        self.api.storage().save(&auth.token);
        log::info!("signed in as {} ({})", auth.user.username, auth.user.role.label());
        Ok(auth.user)
    }

    /// Apply a transition atomically from the caller's view: the cell only
    /// changes when the transition succeeds. Returns the new epoch.
    fn transition<F>(&self, apply: F) -> Result<u64, SessionError>
    where
        F: FnOnce(&mut Session) -> Result<(), SessionError>,
    {
        let mut session = self.cell.get();
        apply(&mut session)?;
        let epoch = session.epoch();
        self.cell.set(session);
        Ok(epoch)
    }
}
