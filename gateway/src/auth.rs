//! Login, logout and session queries.
//!
//! Login goes straight to the transport: credentials are never combined with a
//! stale bearer token, and a rejected login must not trigger a refresh.
//! After the token pair is stored the admin profile is fetched to fill in the
//! identity snapshot; a failed lookup keeps the email-only identity.
//!
//! A rejected login ends whatever session was there before. So does a profile
//! lookup whose refresh fails, and then the login itself fails.

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

use crate::client::Gateway;
use crate::error::GatewayError;
use crate::request::ApiRequest;
use crate::session::{CurrentUser, Session};

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenPair {
    access: String,
    refresh: String,
}

#[derive(Deserialize)]
pub(crate) struct RefreshedTokens {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

#[derive(Deserialize)]
struct Profile {
    #[serde(default)]
    id: i64,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
}

impl Profile {
    fn into_user(self, login_email: &str) -> CurrentUser {
        CurrentUser {
            id: self.id,
            email: self.email.unwrap_or_else(|| login_email.to_owned()),
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }
}

#[derive(Deserialize)]
struct Rejection {
    detail: String,
}

fn rejection_reason(body: &str) -> String {
    match serde_json::from_str::<Rejection>(body) {
        Ok(rejection) => rejection.detail,
        Err(_) => "invalid credentials".to_owned(),
    }
}

// =============================================================================
// OPERATIONS
// =============================================================================

impl Gateway {
    /// Exchange credentials for a token pair and start a session.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::AuthenticationFailed`] when the backend rejects
    /// the credentials (`400`/`401`) or when the new session is torn down by a
    /// failed refresh during the profile lookup. Either way the session is
    /// cleared. Returns [`GatewayError::Decode`] when the token response is
    /// malformed, and transport/storage errors unchanged.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, GatewayError> {
        let request = ApiRequest::post(self.config().login_url()).json(&LoginRequest { email, password })?;
        let response = match self.dispatch_unauthenticated(&request).await {
            Ok(response) => response,
            Err(GatewayError::Unauthorized { body } | GatewayError::Http { status: 400, body }) => {
                tracing::info!(email, "login rejected");
                self.session().expire();
                return Err(GatewayError::AuthenticationFailed(rejection_reason(&body)));
            }
            Err(e) => return Err(e),
        };

        let tokens: TokenPair = response.json()?;
        self.session()
            .establish(&tokens.access, &tokens.refresh, CurrentUser::from_email(email))?;
        tracing::info!(email, "logged in");

        match self.load_profile(email).await {
            Ok(Some(user)) => {
                if let Err(e) = self.session().set_user(user) {
                    tracing::warn!(error = %e, "failed to persist user profile");
                }
            }
            Ok(None) => {}
            Err(GatewayError::AuthenticationFailed(reason)) => {
                tracing::warn!(%reason, "session ended during profile lookup");
                return Err(GatewayError::AuthenticationFailed(reason));
            }
            Err(e) => tracing::warn!(error = %e, "profile lookup failed; keeping email-only identity"),
        }
        if !self.session().is_authenticated() {
            return Err(GatewayError::AuthenticationFailed("session ended during login".to_owned()));
        }
        Ok(self.session().snapshot())
    }

    /// End the session. Safe to call repeatedly.
    pub fn logout(&self) {
        self.session().clear();
        tracing::info!("logged out");
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<CurrentUser> {
        self.session().current_user()
    }

    async fn load_profile(&self, email: &str) -> Result<Option<CurrentUser>, GatewayError> {
        let Some(url) = self.config().profile_url() else {
            return Ok(None);
        };
        let profile: Profile = self.send(ApiRequest::get(url)).await?.json()?;
        Ok(Some(profile.into_user(email)))
    }
}
