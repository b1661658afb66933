//! HTTP transport seam.
//!
//! The gateway only ever sees [`Transport`]; production code plugs in
//! [`ReqwestTransport`], tests plug in scripted doubles. A transport reports
//! every HTTP status as a response; only failures to obtain a response at all
//! are errors.

#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;

use std::time::Duration;

use crate::config::HttpTimeouts;
use crate::error::{GatewayError, TransportError};
use crate::request::{ApiRequest, ApiResponse};

/// Issue one HTTP request and return its response, whatever the status.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn dispatch(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}

pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with the given timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::HttpClientBuild`] if the TLS backend fails to initialise.
    pub fn new(timeouts: HttpTimeouts) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| GatewayError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http })
    }

    /// Wrap an already configured client.
    #[must_use]
    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn dispatch(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut builder = self
            .http
            .request(request.method.clone(), &request.url)
            .headers(request.headers.clone());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(method = %request.method, url = %request.url, status, "api response");
        Ok(ApiResponse { status, body })
    }
}
