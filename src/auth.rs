//! Authentication Module
//!
//! Session state for the console. `AuthManager` is the single owner of the
//! session; the HTTP client only ever sees it through a [`SessionReader`].

use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::storage::{SecureStorage, SIGNAL_SLOT, TOKEN_SLOT};

/// Lifetime of the persisted auth signal
pub const SIGNAL_MAX_AGE_HOURS: i64 = 24;

/// Current credential held by the console
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub authenticated: bool,
}

impl Session {
    /// A session carrying no credential
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session authenticated by `token`
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            authenticated: true,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("authenticated", &self.authenticated)
            .finish()
    }
}

/// Short-lived flag used to recover authentication on a fresh start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSignal {
    pub expires_at: DateTime<Utc>,
}

impl AuthSignal {
    /// Issue a signal valid for [`SIGNAL_MAX_AGE_HOURS`]
    pub fn issue() -> Self {
        Self {
            expires_at: Utc::now() + Duration::hours(SIGNAL_MAX_AGE_HOURS),
        }
    }

    /// Check if the signal is expired
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Authentication state as seen by route gating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

/// Read-only view of the session handed to the HTTP client
#[derive(Clone)]
pub struct SessionReader {
    session: Arc<RwLock<Session>>,
}

impl fmt::Debug for SessionReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionReader")
            .field("session", &*read(&self.session))
            .finish()
    }
}

impl SessionReader {
    /// Bearer token, if one is held
    pub fn token(&self) -> Option<String> {
        read(&self.session).token.clone()
    }
}

/// Manages authentication state and its persisted slots
#[derive(Debug)]
pub struct AuthManager {
    session: Arc<RwLock<Session>>,
    storage: Arc<SecureStorage>,
}

impl AuthManager {
    /// Create an unauthenticated manager backed by `storage`
    pub fn new(storage: Arc<SecureStorage>) -> Self {
        Self {
            session: Arc::new(RwLock::new(Session::anonymous())),
            storage,
        }
    }

    /// Create a manager and recover any persisted token
    pub fn restore(storage: Arc<SecureStorage>) -> Self {
        let manager = Self::new(storage);

        if manager.storage.exists(TOKEN_SLOT) {
            match manager.storage.load::<String>(TOKEN_SLOT) {
                Ok(token) if !token.is_empty() => {
                    info!("Restored persisted session");
                    *write(&manager.session) = Session::with_token(token);
                }
                Ok(_) => debug!("Persisted token slot is empty"),
                Err(e) => warn!("Failed to restore persisted token: {}", e),
            }
        }

        manager
    }

    /// Handle for components that may read but never change the session
    pub fn reader(&self) -> SessionReader {
        SessionReader {
            session: Arc::clone(&self.session),
        }
    }

    /// Snapshot of the current session
    pub fn session(&self) -> Session {
        read(&self.session).clone()
    }

    /// Get the access token if authenticated
    pub fn token(&self) -> Option<String> {
        read(&self.session).token.clone()
    }

    /// Check if currently authenticated
    pub fn is_authenticated(&self) -> bool {
        read(&self.session).authenticated
    }

    pub fn state(&self) -> AuthState {
        if self.is_authenticated() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }

    /// Whether an unexpired auth signal is persisted
    pub fn has_signal(&self) -> bool {
        if !self.storage.exists(SIGNAL_SLOT) {
            return false;
        }

        match self.storage.load::<AuthSignal>(SIGNAL_SLOT) {
            Ok(signal) if !signal.is_expired() => true,
            Ok(_) => {
                debug!("Auth signal expired");
                self.discard_signal();
                false
            }
            Err(e) => {
                warn!("Unreadable auth signal: {}", e);
                self.discard_signal();
                false
            }
        }
    }

    /// Store `token` as the current session and persist it
    pub(crate) fn set_token(&self, token: String) {
        if let Err(e) = self.storage.save(TOKEN_SLOT, &token) {
            error!("Failed to save token: {}", e);
        }

        *write(&self.session) = Session::with_token(token);
        info!("Session set");
    }

    /// Persist a fresh 24h auth signal
    pub(crate) fn set_signal(&self) {
        if let Err(e) = self.storage.save(SIGNAL_SLOT, &AuthSignal::issue()) {
            error!("Failed to save auth signal: {}", e);
        }
    }

    /// Drop the token and the auth signal
    pub(crate) fn clear_session(&self) {
        *write(&self.session) = Session::anonymous();

        if let Err(e) = self.storage.delete(TOKEN_SLOT) {
            error!("Failed to delete token: {}", e);
        }
        self.discard_signal();

        info!("Session cleared");
    }

    fn discard_signal(&self) {
        if let Err(e) = self.storage.delete(SIGNAL_SLOT) {
            error!("Failed to delete auth signal: {}", e);
        }
    }
}

// A poisoned lock still holds a consistent `Session`: every write replaces it whole.
fn read(lock: &RwLock<Session>) -> RwLockReadGuard<'_, Session> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write(lock: &RwLock<Session>) -> RwLockWriteGuard<'_, Session> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
