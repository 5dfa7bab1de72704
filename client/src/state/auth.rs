//! Auth-session state for the current page.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `AuthContext` exists per page load. Pages reach it through an
//! [`AuthScope`]; the context is the only code that touches the stored
//! credential or the identity slot.
//!
//! ERROR HANDLING
//! ==============
//! Failures take one of two paths. During bootstrap a rejected or
//! unreachable session only means "nobody is signed in", so the error is
//! absorbed and the stale credential dropped. During login and register the
//! user asked for something, so the failure is announced and returned.
//!
//! Overlapping login/register calls are not sequenced. Whichever backend
//! reply lands last decides the final identity. Bootstrap is the exception:
//! a login, register or logout that completes while bootstrap is waiting on
//! the backend supersedes whatever bootstrap learns.
//!
//! Every write to the identity slot or the stored credential happens under
//! the state lock, and `establish`/`logout` bump `generation` there.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use super::notify::{self, Notifier};
use super::session::{self, SessionStore};
use crate::net::api::{ApiError, AuthBackend};
use crate::net::types::{TokenResponse, User};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("auth context used outside of its provider")]
    OutsideProvider,
}

/// Authentication state tracking the current user and loading status.
///
/// `loading` is only true between context creation and the end of the
/// first bootstrap.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

// =============================================================================
// CONTEXT
// =============================================================================

pub struct AuthContext {
    backend: Arc<dyn AuthBackend>,
    store: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
    state: RwLock<AuthState>,
    bootstrapped: AtomicBool,
    /// Bumped on every identity change made by login, register or logout.
    generation: AtomicU64,
}

impl AuthContext {
    /// Create a context in the loading state. Call [`Self::bootstrap`] next.
    #[must_use]
    pub fn new(backend: Arc<dyn AuthBackend>, store: Arc<dyn SessionStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            backend,
            store,
            notifier,
            state: RwLock::new(AuthState { user: None, loading: true }),
            bootstrapped: AtomicBool::new(false),
            generation: AtomicU64::new(0),
        }
    }

    /// Restore the session from the stored credential.
    ///
    /// Runs at most once per context; later calls return immediately. Never
    /// fails: a credential the backend will not honor is removed and the
    /// context settles as anonymous.
    pub async fn bootstrap(&self) {
        if self.bootstrapped.swap(true, Ordering::SeqCst) {
            return;
        }

        let started = self.generation.load(Ordering::SeqCst);
        let restored = match session::token(self.store.as_ref()) {
            Some(token) => Some(self.backend.current_user(&token).await),
            None => None,
        };

        self.write(|state| {
            let superseded = self.generation.load(Ordering::SeqCst) != started;
            match restored {
                Some(Ok(user)) if !superseded => state.user = Some(user),
                Some(Err(e)) if !superseded => {
                    tracing::debug!(error = %e, "stored session rejected; clearing credential");
                    session::clear_token(self.store.as_ref());
                }
                Some(_) => tracing::debug!("session changed during bootstrap; keeping it"),
                None => {}
            }
            state.loading = false;
        });
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns the backend or transport failure after notifying the user.
    /// Prior identity and credential are left as they were.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        match self.backend.login(email, password).await {
            Ok(resp) => {
                self.establish(resp);
                self.notifier.success(notify::LOGIN_SUCCEEDED);
                Ok(())
            }
            Err(e) => Err(self.surface(e, notify::LOGIN_FAILED)),
        }
    }

    /// Create an account and sign in as it.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::login`].
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<(), AuthError> {
        match self.backend.register(name, email, password).await {
            Ok(resp) => {
                self.establish(resp);
                self.notifier.success(notify::REGISTER_SUCCEEDED);
                Ok(())
            }
            Err(e) => Err(self.surface(e, notify::REGISTER_FAILED)),
        }
    }

    /// Drop the credential and identity. Always succeeds.
    pub fn logout(&self) {
        self.write(|state| {
            session::clear_token(self.store.as_ref());
            self.generation.fetch_add(1, Ordering::SeqCst);
            state.user = None;
        });
        self.notifier.success(notify::LOGOUT_SUCCEEDED);
    }

    fn establish(&self, resp: TokenResponse) {
        tracing::info!(user_id = resp.user.id, "session established");
        self.write(|state| {
            session::set_token(self.store.as_ref(), &resp.access_token);
            self.generation.fetch_add(1, Ordering::SeqCst);
            state.user = Some(resp.user);
        });
    }

    fn surface(&self, error: ApiError, message: &str) -> AuthError {
        tracing::warn!(error = %error, "auth request failed");
        self.notifier.error(message);
        AuthError::Api(error)
    }

    fn write(&self, apply: impl FnOnce(&mut AuthState)) {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        apply(&mut state);
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state().user
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state().user.is_some()
    }
}

// =============================================================================
// PROVIDER SCOPE
// =============================================================================

/// The region of a page tree that can see an [`AuthContext`].
///
/// Consumers outside a provider get [`AuthError::OutsideProvider`] from
/// [`AuthScope::use_auth`] instead of a silently empty context.
#[derive(Clone, Default)]
pub struct AuthScope {
    provider: Option<Arc<AuthContext>>,
}

impl AuthScope {
    /// A scope with no provider above it.
    #[must_use]
    pub fn detached() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn provide(context: Arc<AuthContext>) -> Self {
        Self { provider: Some(context) }
    }

    /// Build a fresh context for a page load, bootstrap it, and provide it.
    pub async fn mount(
        backend: Arc<dyn AuthBackend>,
        store: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let context = Arc::new(AuthContext::new(backend, store, notifier));
        context.bootstrap().await;
        Self::provide(context)
    }

    /// # Errors
    ///
    /// Returns [`AuthError::OutsideProvider`] when no context was provided.
    pub fn use_auth(&self) -> Result<Arc<AuthContext>, AuthError> {
        self.provider.clone().ok_or(AuthError::OutsideProvider)
    }
}
