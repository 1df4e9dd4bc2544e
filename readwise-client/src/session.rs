//! Session state
//!
//! Identity comes from an external provider. The client only reads it: the
//! provider may still be loading, may report no user, or may report a signed-in
//! identity. Guards must not make decisions while the state is `Loading`.

use readwise_common::{Error, Identity, Result};
use std::sync::RwLock;

/// Authentication state as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    SignedOut,
    SignedIn(Identity),
}

impl SessionState {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::SignedIn(identity) => Some(identity),
            _ => None,
        }
    }
}

/// Read access to the current session
pub trait Session: Send + Sync {
    fn state(&self) -> SessionState;

    /// Bearer credential for backend requests, if the provider issues one
    fn credential(&self) -> Option<String> {
        None
    }

    /// Signed-in identity, or [`Error::NotSignedIn`]
    fn require_identity(&self) -> Result<Identity> {
        match self.state() {
            SessionState::SignedIn(identity) => Ok(identity),
            _ => Err(Error::NotSignedIn),
        }
    }
}

/// Session whose state is set by the host
///
/// The CLI builds one from `--user`; tests flip it between states to exercise
/// guards and identity changes.
#[derive(Debug)]
pub struct StaticSession {
    state: RwLock<SessionState>,
    credential: Option<String>,
}

impl StaticSession {
    pub fn new(state: SessionState) -> Self {
        Self {
            state: RwLock::new(state),
            credential: None,
        }
    }

    pub fn signed_in(user: impl Into<String>) -> Self {
        Self::new(SessionState::SignedIn(Identity::new(user)))
    }

    pub fn signed_out() -> Self {
        Self::new(SessionState::SignedOut)
    }

    pub fn with_credential(mut self, credential: Option<String>) -> Self {
        self.credential = credential;
        self
    }

    /// Replace the session state (sign-in, sign-out, provider finished loading)
    pub fn set_state(&self, state: SessionState) {
        match self.state.write() {
            Ok(mut guard) => *guard = state,
            Err(poisoned) => *poisoned.into_inner() = state,
        }
    }
}

impl Session for StaticSession {
    fn state(&self) -> SessionState {
        match self.state.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn credential(&self) -> Option<String> {
        self.credential.clone()
    }
}
