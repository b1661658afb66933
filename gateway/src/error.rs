//! Gateway error taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! Only `401` from a protected endpoint is intercepted by the gateway. Every
//! other failure reaches the caller unchanged: transport faults as
//! [`GatewayError::Transport`], non-success statuses as [`GatewayError::Http`].
//! [`GatewayError::AuthenticationFailed`] is terminal and always coincides with
//! the session being cleared.

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

/// A request never produced an HTTP response (DNS, connect, TLS, timeout).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self(err.to_string())
    }
}

/// Failures from the persisted session store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("session store io failed: {0}")]
    Io(#[from] std::io::Error),
    /// The backing file does not contain a JSON string map.
    #[error("session store is corrupt: {0}")]
    Format(#[from] serde_json::Error),
}

/// Errors returned by [`crate::Gateway`] operations.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The downstream transport failed before a response arrived.
    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),

    /// A protected endpoint rejected the request after the single allowed replay.
    #[error("unauthorized: {body}")]
    Unauthorized { body: String },

    /// Login or refresh credentials were rejected; the session has been cleared.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Any other non-success status, passed through untouched.
    #[error("http status {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body did not match the expected JSON shape.
    #[error("response decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// A header value (typically a token) contained illegal characters.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// Persisting or restoring the session failed.
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// The HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl GatewayError {
    /// HTTP status carried by this error, if it came from a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `true` when the caller should send the user back to the login entry point.
    #[must_use]
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_))
    }
}
