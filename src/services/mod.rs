//! Typed clients for the provisioning API's resources.
//!
//! ARCHITECTURE
//! ============
//! Each service borrows the shared [`Gateway`] and only builds requests and
//! decodes responses; credentials, refresh and replay are the gateway's job.
//! Paths mirror the backend's routes, trailing slashes included.

pub mod admin;
pub mod api_key;
pub mod attribute;
pub mod attribute_group;
pub mod identifier_auth;
pub mod nas;
pub mod radsec;
pub mod secret;
pub mod timezone;
pub mod user;
pub mod vendor;

#[cfg(test)]
pub(crate) mod test_helpers;

use gateway::{ApiRequest, Gateway};
use serde::de::DeserializeOwned;

use crate::error::ConsoleError;

/// Send `request` and decode the JSON body.
async fn fetch<T: DeserializeOwned>(gateway: &Gateway, request: ApiRequest) -> Result<T, ConsoleError> {
    let response = gateway.send(request).await?;
    Ok(response.json()?)
}

/// Send `request` for its side effect; the body is not inspected.
async fn execute(gateway: &Gateway, request: ApiRequest) -> Result<(), ConsoleError> {
    gateway.send(request).await?;
    Ok(())
}

/// `POST` with an empty JSON object, as the action endpoints expect.
fn action(url: String) -> Result<ApiRequest, ConsoleError> {
    Ok(ApiRequest::post(url).json(&serde_json::json!({}))?)
}
