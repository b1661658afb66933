//! Errors surfaced by the resource clients.

use gateway::GatewayError;

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ConsoleError {
    /// True when the caller must log in again before retrying.
    #[must_use]
    pub fn requires_reauthentication(&self) -> bool {
        match self {
            Self::Gateway(e) => e.requires_reauthentication(),
            Self::InvalidInput(_) => false,
        }
    }
}
