#![warn(missing_docs)]
//! # neuro-sight-auth
//!
//! ## Purpose
//! Gates the "upload & analyze" action behind an authenticated session.
//!
//! ## Responsibilities
//! - Abstract the external authentication provider behind [`SessionProvider`].
//! - Track the last observed session in [`SessionGate`] and decide whether the
//!   caller may proceed or must be redirected to the login view.
//! - Expose sign-out with success/error outcome for the identity affordance.
//!
//! ## Data flow
//! UI asks the gate before leaving home -> [`SessionGate::check`] queries
//! [`SessionProvider::current_session`] -> returns a [`GateDecision`].
//!
//! ## Ownership and lifetimes
//! Providers are shared as `Arc<dyn SessionProvider>` so the demo shell and
//! tests can keep a handle to flip the session while the gate holds another.
//!
//! ## Error model
//! Provider failures are reported as [`AuthError`]. The gate itself treats a
//! failing lookup as "no session" and redirects.
//!
//! ## Security and privacy notes
//! Only the user's display identity (email) crosses this boundary; tokens stay
//! inside the provider.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use neuro_sight_auth::{GateDecision, InMemorySessionProvider, SessionGate};
//!
//! let provider = Arc::new(InMemorySessionProvider::new());
//! let mut gate = SessionGate::new(provider, true);
//! assert_eq!(gate.check(), GateDecision::RedirectToLogin);
//! ```

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Route of the login view the gate redirects to.
pub const LOGIN_ROUTE: &str = "/auth";

/// Authenticated session as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Email shown in the identity affordance.
    pub user_email: String,
}

impl Session {
    /// Creates a validated session.
    ///
    /// # Errors
    /// Returns [`AuthError::EmptyIdentity`] for a blank email.
    pub fn new(user_email: impl Into<String>) -> Result<Self, AuthError> {
        let user_email = user_email.into();
        if user_email.trim().is_empty() {
            return Err(AuthError::EmptyIdentity);
        }
        Ok(Self { user_email })
    }
}

/// External authentication collaborator.
pub trait SessionProvider: Send + Sync {
    /// Returns the current session, if any.
    fn current_session(&self) -> Result<Option<Session>, AuthError>;

    /// Ends the current session.
    fn sign_out(&self) -> Result<(), AuthError>;
}

/// Last session state observed by the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Provider not queried yet.
    Unknown,
    /// No session (or lookup failed).
    SignedOut,
    /// Valid session.
    SignedIn(Session),
}

/// Outcome of a gate check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Caller may continue.
    Proceed {
        /// Identity of the signed-in user; `None` when the gate is disabled and
        /// nobody is signed in.
        identity: Option<String>,
    },
    /// Caller must be sent to [`LOGIN_ROUTE`].
    RedirectToLogin,
}

/// Session gate over an injectable provider.
#[derive(Clone)]
pub struct SessionGate {
    provider: Arc<dyn SessionProvider>,
    required: bool,
    state: SessionState,
}

impl SessionGate {
    /// Creates a gate. With `required == false` every check proceeds.
    pub fn new(provider: Arc<dyn SessionProvider>, required: bool) -> Self {
        Self {
            provider,
            required,
            state: SessionState::Unknown,
        }
    }

    /// Returns `true` when a session is required to proceed.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the last observed state without querying the provider.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Re-queries the provider and stores the observed state.
    pub fn refresh(&mut self) -> &SessionState {
        self.state = match self.provider.current_session() {
            Ok(Some(session)) => SessionState::SignedIn(session),
            Ok(None) => SessionState::SignedOut,
            Err(error) => {
                tracing::warn!(stage = "auth", action = "session_lookup", %error);
                SessionState::SignedOut
            }
        };
        &self.state
    }

    /// Refreshes and decides whether the gated action may proceed.
    pub fn check(&mut self) -> GateDecision {
        let identity = match self.refresh() {
            SessionState::SignedIn(session) => Some(session.user_email.clone()),
            SessionState::SignedOut | SessionState::Unknown => None,
        };

        if self.required && identity.is_none() {
            return GateDecision::RedirectToLogin;
        }
        GateDecision::Proceed { identity }
    }

    /// Returns the last observed identity.
    pub fn identity(&self) -> Option<&str> {
        match &self.state {
            SessionState::SignedIn(session) => Some(session.user_email.as_str()),
            SessionState::SignedOut | SessionState::Unknown => None,
        }
    }

    /// Signs out through the provider.
    ///
    /// # Errors
    /// Propagates provider errors; the observed state is left unchanged then.
    pub fn sign_out(&mut self) -> Result<(), AuthError> {
        self.provider.sign_out()?;
        self.state = SessionState::SignedOut;
        Ok(())
    }
}

/// Process-local provider used by the demo shell and tests.
#[derive(Debug, Default)]
pub struct InMemorySessionProvider {
    session: Mutex<Option<Session>>,
    reject_sign_out: bool,
}

impl InMemorySessionProvider {
    /// Creates a provider with no session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider already signed in as `user_email`.
    ///
    /// # Errors
    /// Returns [`AuthError::EmptyIdentity`] for a blank email.
    pub fn signed_in(user_email: impl Into<String>) -> Result<Self, AuthError> {
        Ok(Self {
            session: Mutex::new(Some(Session::new(user_email)?)),
            reject_sign_out: false,
        })
    }

    /// Makes every subsequent sign-out fail.
    pub fn with_failing_sign_out(mut self) -> Self {
        self.reject_sign_out = true;
        self
    }

    /// Replaces the current session.
    ///
    /// # Errors
    /// Returns [`AuthError::EmptyIdentity`] for a blank email and
    /// [`AuthError::Provider`] when the session lock is poisoned.
    pub fn sign_in(&self, user_email: impl Into<String>) -> Result<(), AuthError> {
        let session = Session::new(user_email)?;
        *self.lock()? = Some(session);
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<Session>>, AuthError> {
        self.session
            .lock()
            .map_err(|_| AuthError::Provider("session lock poisoned".to_string()))
    }
}

impl SessionProvider for InMemorySessionProvider {
    fn current_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.lock()?.clone())
    }

    fn sign_out(&self) -> Result<(), AuthError> {
        if self.reject_sign_out {
            return Err(AuthError::Provider("sign-out rejected".to_string()));
        }
        *self.lock()? = None;
        Ok(())
    }
}

/// Errors produced by session lookup and sign-out.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Session identity is blank.
    #[error("session identity must be non-empty")]
    EmptyIdentity,
    /// Provider-side failure.
    #[error("auth provider failure: {0}")]
    Provider(String),
}

#[cfg(test)]
mod tests {
    //! Unit tests for gate decisions.

    use super::*;

    struct BrokenProvider;

    impl SessionProvider for BrokenProvider {
        fn current_session(&self) -> Result<Option<Session>, AuthError> {
            Err(AuthError::Provider("offline".to_string()))
        }

        fn sign_out(&self) -> Result<(), AuthError> {
            Err(AuthError::Provider("offline".to_string()))
        }
    }

    #[test]
    fn gate_proceeds_with_identity_when_signed_in() {
        let provider = InMemorySessionProvider::signed_in("analyst@example.test")
            .expect("provider should build");
        let mut gate = SessionGate::new(Arc::new(provider), true);

        assert_eq!(
            gate.check(),
            GateDecision::Proceed {
                identity: Some("analyst@example.test".to_string())
            }
        );
        assert_eq!(gate.identity(), Some("analyst@example.test"));
    }

    #[test]
    fn provider_failure_counts_as_signed_out() {
        let mut gate = SessionGate::new(Arc::new(BrokenProvider), true);
        assert_eq!(gate.check(), GateDecision::RedirectToLogin);
        assert_eq!(gate.state(), &SessionState::SignedOut);
    }

    #[test]
    fn ungated_check_proceeds_without_session() {
        let mut gate = SessionGate::new(Arc::new(InMemorySessionProvider::new()), false);
        assert_eq!(gate.check(), GateDecision::Proceed { identity: None });
    }

    #[test]
    fn failed_sign_out_keeps_session() {
        let provider = InMemorySessionProvider::signed_in("analyst@example.test")
            .expect("provider should build")
            .with_failing_sign_out();
        let mut gate = SessionGate::new(Arc::new(provider), true);
        gate.refresh();

        assert!(gate.sign_out().is_err());
        assert_eq!(gate.identity(), Some("analyst@example.test"));
    }

    #[test]
    fn blank_identity_is_rejected() {
        assert!(matches!(Session::new("  "), Err(AuthError::EmptyIdentity)));
    }
}
