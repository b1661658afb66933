//! Authenticated request gateway with single-flight token refresh.
//!
//! DESIGN
//! ======
//! Every protected request carries `Authorization: Bearer <access>`. A `401`
//! starts a refresh *episode*:
//!
//! - `Idle -> Refreshing`: the first request to see `401` becomes the leader
//!   and issues the one refresh call.
//! - While `Refreshing`, later `401`s park a oneshot continuation in a FIFO
//!   queue instead of refreshing again.
//! - When the refresh settles the leader moves to `Draining`, resolves every
//!   continuation in arrival order with the outcome, and returns to `Idle`.
//!   Each woken request replays itself with the new token; the leader replays
//!   the triggering request.
//!
//! A replayed request is never refreshed again: a second `401` reaches the
//! caller as [`GatewayError::Unauthorized`].
//!
//! A `401` for a request that went out with an older token than the session
//! now holds (a refresh finished while it was in flight) is replayed with the
//! current token without starting a new episode.
//!
//! PERSISTENCE
//! ===========
//! The in-memory session is authoritative. A refreshed token that cannot be
//! written to the store is logged at `warn` and used anyway; the next process
//! restores the older token from the store and pays one extra refresh. If the
//! refresh token was rotated and not persisted, that restart needs a new
//! login.
//!
//! CANCELLATION
//! ============
//! A queued caller that drops its future removes its continuation. A leader
//! dropped mid-refresh resets the phase to `Idle` and fails its waiters, so no
//! caller waits on a refresh nobody is driving.

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;
use uuid::Uuid;

use crate::auth::RefreshedTokens;
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::request::{ApiRequest, ApiResponse};
use crate::session::SessionContext;
use crate::store::KeyValueStore;
use crate::transport::{ReqwestTransport, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPhase {
    Idle,
    Refreshing,
    Draining,
}

#[derive(Debug, Clone)]
enum RefreshOutcome {
    Refreshed(String),
    Failed(String),
}

struct Waiter {
    id: Uuid,
    reply: oneshot::Sender<RefreshOutcome>,
}

struct RefreshState {
    phase: RefreshPhase,
    queue: VecDeque<Waiter>,
}

enum Role {
    Lead,
    Wait(Uuid, oneshot::Receiver<RefreshOutcome>),
    Replay(String),
}

pub struct Gateway {
    config: GatewayConfig,
    transport: Arc<dyn Transport>,
    session: Arc<SessionContext>,
    refresh: Mutex<RefreshState>,
}

impl Gateway {
    #[must_use]
    pub fn new(config: GatewayConfig, transport: Arc<dyn Transport>, session: Arc<SessionContext>) -> Self {
        Self {
            config,
            transport,
            session,
            refresh: Mutex::new(RefreshState { phase: RefreshPhase::Idle, queue: VecDeque::new() }),
        }
    }

    /// Production wiring: `reqwest` transport plus a session restored from `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the store cannot be read.
    pub fn connect(config: GatewayConfig, store: Arc<dyn KeyValueStore>) -> Result<Self, GatewayError> {
        let transport = Arc::new(ReqwestTransport::new(config.timeouts)?);
        let session = Arc::new(SessionContext::restore(store)?);
        Ok(Self::new(config, transport, session))
    }

    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    /// Absolute URL for an API path.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    #[must_use]
    pub fn refresh_phase(&self) -> RefreshPhase {
        self.lock_state().phase
    }

    /// Number of requests parked behind an in-flight refresh.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.lock_state().queue.len()
    }

    /// Dispatch `request`, attaching the session's bearer token and recovering
    /// once from an expired access token.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Transport`] when no response arrived.
    /// - [`GatewayError::AuthenticationFailed`] when the refresh could not
    ///   recover the session (the session is cleared).
    /// - [`GatewayError::Unauthorized`] when the replayed request is rejected again.
    /// - [`GatewayError::Http`] for any other non-success status.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, GatewayError> {
        if self.config.is_auth_endpoint(&request.url) {
            return self.dispatch_unauthenticated(&request).await;
        }

        let token = self.session.access_token();
        let outbound = match &token {
            Some(token) => request.with_bearer(token)?,
            None => request.clone(),
        };
        let response = self.transport.dispatch(&outbound).await?;
        if response.status != 401 {
            return response.into_result();
        }

        tracing::debug!(method = %request.method, url = %request.url, "protected request rejected with 401");
        self.recover(&request, token).await
    }

    /// Dispatch without credentials or refresh interception.
    pub(crate) async fn dispatch_unauthenticated(&self, request: &ApiRequest) -> Result<ApiResponse, GatewayError> {
        self.transport.dispatch(request).await?.into_result()
    }

    async fn recover(&self, request: &ApiRequest, sent_with: Option<String>) -> Result<ApiResponse, GatewayError> {
        let role = {
            let mut state = self.lock_state();
            match state.phase {
                RefreshPhase::Refreshing => {
                    let id = Uuid::new_v4();
                    let (reply, rx) = oneshot::channel();
                    state.queue.push_back(Waiter { id, reply });
                    tracing::debug!(queued = state.queue.len(), "refresh in flight; request queued");
                    Role::Wait(id, rx)
                }
                RefreshPhase::Idle | RefreshPhase::Draining => match self.session.access_token() {
                    Some(current) if sent_with.as_deref() != Some(current.as_str()) => Role::Replay(current),
                    _ => {
                        state.phase = RefreshPhase::Refreshing;
                        Role::Lead
                    }
                },
            }
        };

        match role {
            Role::Lead => self.lead_refresh(request).await,
            Role::Wait(id, rx) => self.await_refresh(request, id, rx).await,
            Role::Replay(token) => self.replay(request, &token).await,
        }
    }

    async fn lead_refresh(&self, request: &ApiRequest) -> Result<ApiResponse, GatewayError> {
        let mut episode = Episode { gateway: self, settled: false };
        let outcome = self.refresh_access_token().await;
        episode.settle(match &outcome {
            Ok(token) => RefreshOutcome::Refreshed(token.clone()),
            Err(reason) => RefreshOutcome::Failed(reason.clone()),
        });

        match outcome {
            Ok(token) => self.replay(request, &token).await,
            Err(reason) => Err(GatewayError::AuthenticationFailed(reason)),
        }
    }

    async fn await_refresh(
        &self,
        request: &ApiRequest,
        id: Uuid,
        rx: oneshot::Receiver<RefreshOutcome>,
    ) -> Result<ApiResponse, GatewayError> {
        let _entry = QueuedEntry { gateway: self, id };
        match rx.await {
            Ok(RefreshOutcome::Refreshed(token)) => self.replay(request, &token).await,
            Ok(RefreshOutcome::Failed(reason)) => Err(GatewayError::AuthenticationFailed(reason)),
            Err(_) => Err(GatewayError::AuthenticationFailed("token refresh was abandoned".into())),
        }
    }

    async fn replay(&self, request: &ApiRequest, token: &str) -> Result<ApiResponse, GatewayError> {
        let outbound = request.with_bearer(token)?;
        let response = self.transport.dispatch(&outbound).await?;
        if response.status == 401 {
            tracing::warn!(method = %request.method, url = %request.url, "replayed request rejected again");
        }
        response.into_result()
    }

    /// Mint a new access token from the stored refresh token.
    ///
    /// Every failure tears the session down; the `Err` carries the reason.
    async fn refresh_access_token(&self) -> Result<String, String> {
        let Some(refresh) = self.session.refresh_token() else {
            tracing::warn!("no refresh token available; ending session");
            self.session.expire();
            return Err("no refresh token available".to_owned());
        };

        tracing::info!("access token rejected; refreshing");
        let mut request = ApiRequest::post(self.config.refresh_url());
        request.body = Some(serde_json::json!({ "refresh": refresh }));

        let result = match self.transport.dispatch(&request).await {
            Ok(response) if response.is_success() => response
                .json::<RefreshedTokens>()
                .map_err(|e| format!("refresh response unreadable: {e}")),
            Ok(response) => Err(format!("refresh rejected with status {}", response.status)),
            Err(e) => Err(format!("refresh request failed: {e}")),
        };

        match result {
            Ok(tokens) => {
                if let Err(e) = self
                    .session
                    .set_tokens(&tokens.access, tokens.refresh.as_deref())
                {
                    tracing::warn!(error = %e, "failed to persist refreshed tokens");
                }
                tracing::info!(rotated = tokens.refresh.is_some(), "access token refreshed");
                Ok(tokens.access)
            }
            Err(reason) => {
                tracing::warn!(%reason, "token refresh failed; ending session");
                self.session.expire();
                Err(reason)
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, RefreshState> {
        self.refresh.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// GUARDS
// =============================================================================

/// Leader-side handle on the current refresh episode.
struct Episode<'a> {
    gateway: &'a Gateway,
    settled: bool,
}

impl Episode<'_> {
    fn settle(&mut self, outcome: RefreshOutcome) {
        self.settled = true;
        let waiters = {
            let mut state = self.gateway.lock_state();
            state.phase = RefreshPhase::Draining;
            std::mem::take(&mut state.queue)
        };
        tracing::debug!(waiters = waiters.len(), "refresh settled; draining queue");
        for waiter in waiters {
            if waiter.reply.send(outcome.clone()).is_err() {
                tracing::debug!(id = %waiter.id, "queued request went away before replay");
            }
        }
        let mut state = self.gateway.lock_state();
        if state.phase == RefreshPhase::Draining {
            state.phase = RefreshPhase::Idle;
        }
    }
}

impl Drop for Episode<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let abandoned = {
            let mut state = self.gateway.lock_state();
            state.phase = RefreshPhase::Idle;
            std::mem::take(&mut state.queue)
        };
        tracing::warn!(waiters = abandoned.len(), "refresh abandoned before completion");
        // Dropping the senders wakes every waiter with a closed channel.
        drop(abandoned);
    }
}

/// Waiter-side handle; removes the continuation if the caller goes away.
struct QueuedEntry<'a> {
    gateway: &'a Gateway,
    id: Uuid,
}

impl Drop for QueuedEntry<'_> {
    fn drop(&mut self) {
        let mut state = self.gateway.lock_state();
        state.queue.retain(|waiter| waiter.id != self.id);
    }
}
