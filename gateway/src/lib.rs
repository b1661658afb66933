//! Authenticated HTTP gateway for the RADIUS provisioning API.
//!
//! Every outbound API call goes through [`Gateway::send`], which attaches the
//! session's bearer token and recovers from an expired access token with a
//! single coordinated refresh. Authentication endpoints (login, refresh,
//! verify) bypass both.
//!
//! ARCHITECTURE
//! ============
//! - [`client`]: the gateway and its refresh state machine.
//! - [`auth`]: login/logout on top of the gateway.
//! - [`session`]: the single-owner session context and auth-status channel.
//! - [`store`]: persisted key-value storage backing the session.
//! - [`transport`]: the HTTP seam (`reqwest` in production).

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod request;
pub mod session;
pub mod store;
pub mod transport;

pub use client::{Gateway, RefreshPhase};
pub use config::{GatewayConfig, HttpTimeouts};
pub use error::{GatewayError, StoreError, TransportError};
pub use request::{ApiRequest, ApiResponse, Method};
pub use session::{AuthStatus, CurrentUser, Session, SessionContext};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use transport::{ReqwestTransport, Transport};
