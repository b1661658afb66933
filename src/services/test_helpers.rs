//! Shared fixtures for service tests: a signed-in gateway over a scripted transport.

use std::sync::Arc;

use gateway::mock::MockTransport;
use gateway::{ApiRequest, ApiResponse, Gateway, GatewayConfig, KeyValueStore, MemoryStore, SessionContext};

pub const API: &str = "http://api.test/api";

/// Gateway holding a valid session whose every call is answered by `reply`.
pub fn signed_in(
    reply: impl Fn(&ApiRequest) -> ApiResponse + Send + Sync + 'static,
) -> (Arc<MockTransport>, Gateway) {
    let store = Arc::new(MemoryStore::new());
    store.set("jwt_token", "a1").unwrap();
    store.set("refresh_token", "r1").unwrap();
    let session = Arc::new(SessionContext::restore(store).unwrap());
    let transport = Arc::new(MockTransport::new(move |request| Ok(reply(request))));
    let gateway = Gateway::new(GatewayConfig::new(API), transport.clone(), session);
    (transport, gateway)
}

/// Gateway that answers every call with `status` and a fixed body.
pub fn replying(status: u16, body: &'static str) -> (Arc<MockTransport>, Gateway) {
    signed_in(move |_| ApiResponse::new(status, body))
}

/// The single request the transport saw.
pub fn only_request(transport: &MockTransport) -> ApiRequest {
    let mut requests = transport.requests();
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests.remove(0)
}

pub fn url(path: &str) -> String {
    format!("{API}{path}")
}
