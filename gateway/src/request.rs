//! Transport-neutral request and response descriptions.
//!
//! DESIGN
//! ======
//! The gateway needs to hold, clone and replay requests after a token refresh,
//! so requests are plain data (method, URL, headers, query, JSON body) rather
//! than a half-built `reqwest::RequestBuilder`.

#[cfg(test)]
#[path = "request_test.rs"]
mod tests;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
pub use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::GatewayError;

/// An outbound API call as seen by the gateway.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), headers: HeaderMap::new(), query: Vec::new(), body: None }
    }

    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    #[must_use]
    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    #[must_use]
    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::PATCH, url)
    }

    #[must_use]
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Append a query parameter.
    #[must_use]
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_owned(), value.to_string()));
        self
    }

    /// Set a header, replacing any previous value under the same name.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Serialize `body` as the JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Decode`] if `body` cannot be represented as JSON.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, GatewayError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Copy of this request carrying `Authorization: Bearer <token>`.
    ///
    /// Any existing `Authorization` header is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidHeader`] if the token is not a legal header value.
    pub fn with_bearer(&self, token: &str) -> Result<Self, GatewayError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
        value.set_sensitive(true);
        let mut request = self.clone();
        request.headers.insert(AUTHORIZATION, value);
        Ok(request)
    }

    /// The `Authorization` header value, if one is set and is valid UTF-8.
    #[must_use]
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
    }
}

/// A completed HTTP exchange, successful or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Deserialize the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Decode`] if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, GatewayError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Map a raw response to the gateway's error taxonomy.
    ///
    /// # Errors
    ///
    /// `401` becomes [`GatewayError::Unauthorized`]; any other non-2xx status
    /// becomes [`GatewayError::Http`].
    pub fn into_result(self) -> Result<Self, GatewayError> {
        match self.status {
            200..=299 => Ok(self),
            401 => Err(GatewayError::Unauthorized { body: self.body }),
            status => Err(GatewayError::Http { status, body: self.body }),
        }
    }
}
