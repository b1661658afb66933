//! Session context: tokens plus the signed-in identity.
//!
//! ARCHITECTURE
//! ============
//! One [`SessionContext`] is injected into the gateway at construction. It is
//! the single writer of session state: login, refresh success and logout go
//! through [`SessionContext::establish`], [`SessionContext::set_tokens`] and
//! [`SessionContext::clear`]/[`SessionContext::expire`]. Every request producer
//! only reads. The in-memory copy is authoritative; the store mirrors it so a
//! restarted process resumes the session.
//!
//! Auth status changes are published on a `watch` channel; the navigation
//! layer (CLI prompt, UI router) subscribes to learn when to send the user
//! back to login.

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::GatewayError;
use crate::store::KeyValueStore;

pub const ACCESS_TOKEN_KEY: &str = "jwt_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const CURRENT_USER_KEY: &str = "current_user";

/// Denormalized identity snapshot of the signed-in admin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Backend user id; `0` until the profile lookup fills it in.
    #[serde(default)]
    pub id: i64,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl CurrentUser {
    #[must_use]
    pub fn from_email(email: &str) -> Self {
        Self { email: email.to_owned(), ..Self::default() }
    }

    /// "First Last" when names are known, otherwise the email.
    #[must_use]
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() { self.email.clone() } else { parts.join(" ") }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub current_user: Option<CurrentUser>,
}

impl Session {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none() && self.current_user.is_none()
    }
}

/// What the navigation layer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    SignedOut,
    Authenticated,
    /// The session was torn down by a failed refresh; redirect to login.
    ReauthRequired,
}

pub struct SessionContext {
    store: Arc<dyn KeyValueStore>,
    state: RwLock<Session>,
    status: watch::Sender<AuthStatus>,
}

impl SessionContext {
    /// Restore whatever session the store holds.
    ///
    /// A stored user snapshot that fails to parse is dropped rather than
    /// failing the restore.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] if the store cannot be read.
    pub fn restore(store: Arc<dyn KeyValueStore>) -> Result<Self, GatewayError> {
        let access_token = store.get(ACCESS_TOKEN_KEY)?;
        let refresh_token = store.get(REFRESH_TOKEN_KEY)?;
        let current_user = match store.get(CURRENT_USER_KEY)? {
            Some(raw) => match serde_json::from_str::<CurrentUser>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(error = %e, "discarding unreadable stored user");
                    None
                }
            },
            None => None,
        };
        let session = Session { access_token, refresh_token, current_user };
        let initial = if session.access_token.is_some() { AuthStatus::Authenticated } else { AuthStatus::SignedOut };
        let (status, _) = watch::channel(initial);
        Ok(Self { store, state: RwLock::new(session), status })
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.read().access_token.clone()
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.read().refresh_token.clone()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<CurrentUser> {
        self.read().current_user.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().access_token.is_some()
    }

    #[must_use]
    pub fn status(&self) -> AuthStatus {
        *self.status.borrow()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.status.subscribe()
    }

    /// Install a freshly issued token pair and identity (login).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] if persisting fails; the in-memory
    /// session is updated regardless.
    pub fn establish(&self, access: &str, refresh: &str, user: CurrentUser) -> Result<(), GatewayError> {
        let user_json = serde_json::to_string(&user)?;
        {
            let mut state = self.write();
            state.access_token = Some(access.to_owned());
            state.refresh_token = Some(refresh.to_owned());
            state.current_user = Some(user);
        }
        self.status.send_replace(AuthStatus::Authenticated);
        self.store.set(ACCESS_TOKEN_KEY, access)?;
        self.store.set(REFRESH_TOKEN_KEY, refresh)?;
        self.store.set(CURRENT_USER_KEY, &user_json)?;
        Ok(())
    }

    /// Store a refreshed access token, rotating the refresh token when one is issued.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] if persisting fails; the in-memory
    /// session is updated regardless.
    pub fn set_tokens(&self, access: &str, refresh: Option<&str>) -> Result<(), GatewayError> {
        {
            let mut state = self.write();
            state.access_token = Some(access.to_owned());
            if let Some(refresh) = refresh {
                state.refresh_token = Some(refresh.to_owned());
            }
        }
        self.status.send_replace(AuthStatus::Authenticated);
        self.store.set(ACCESS_TOKEN_KEY, access)?;
        if let Some(refresh) = refresh {
            self.store.set(REFRESH_TOKEN_KEY, refresh)?;
        }
        Ok(())
    }

    /// Replace the identity snapshot, keeping tokens.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] if persisting fails.
    pub fn set_user(&self, user: CurrentUser) -> Result<(), GatewayError> {
        let user_json = serde_json::to_string(&user)?;
        self.write().current_user = Some(user);
        self.store.set(CURRENT_USER_KEY, &user_json)?;
        Ok(())
    }

    /// Destroy the session (logout). Idempotent and infallible.
    pub fn clear(&self) {
        self.teardown(AuthStatus::SignedOut);
    }

    /// Destroy the session because it can no longer be refreshed.
    pub fn expire(&self) {
        self.teardown(AuthStatus::ReauthRequired);
    }

    fn teardown(&self, status: AuthStatus) {
        *self.write() = Session::default();
        self.status.send_replace(status);
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, CURRENT_USER_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!(error = %e, key, "failed to remove persisted session key");
            }
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Session> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Session> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
