//! Scripted [`Transport`] double for tests in this and dependent crates.
//!
//! Responses come from a closure over the outbound request. Requests are
//! recorded before they are answered, and [`MockTransport::gate`] can hold
//! matching requests until the test releases a permit, which is how tests
//! line up several `401`s behind one in-flight refresh.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::Semaphore;

use crate::error::TransportError;
use crate::request::{ApiRequest, ApiResponse};
use crate::transport::Transport;

type Responder = dyn Fn(&ApiRequest) -> Result<ApiResponse, TransportError> + Send + Sync;

pub struct MockTransport {
    responder: Box<Responder>,
    gates: Mutex<Vec<(String, Arc<Semaphore>)>>,
    log: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new(responder: impl Fn(&ApiRequest) -> Result<ApiResponse, TransportError> + Send + Sync + 'static) -> Self {
        Self { responder: Box::new(responder), gates: Mutex::new(Vec::new()), log: Mutex::new(Vec::new()) }
    }

    /// Hold requests whose URL contains `fragment`; each consumes one permit.
    pub fn gate(&self, fragment: &str) -> Arc<Semaphore> {
        let semaphore = Arc::new(Semaphore::new(0));
        self.gates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((fragment.to_owned(), semaphore.clone()));
        semaphore
    }

    /// Every request dispatched so far, in dispatch order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn count_matching(&self, fragment: &str) -> usize {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|request| request.url.contains(fragment))
            .count()
    }

    fn gate_for(&self, url: &str) -> Option<Arc<Semaphore>> {
        self.gates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|(fragment, _)| url.contains(fragment.as_str()))
            .map(|(_, semaphore)| semaphore.clone())
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn dispatch(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        if let Some(gate) = self.gate_for(&request.url) {
            let permit = gate
                .acquire()
                .await
                .map_err(|_| TransportError("mock gate closed".to_owned()))?;
            permit.forget();
        }
        (self.responder)(request)
    }
}
