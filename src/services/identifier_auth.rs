//! Per-identifier NAS authorizations with an attribute group
//! (`/users/users/{user}/identifiers/{identifier}/nas-authorizations/`).
//!
//! Unlike the bare allow/deny switches on [`NasService`](super::nas::NasService),
//! each authorization here also pins the attribute group the RADIUS server
//! returns when the identifier authenticates through that device.

#[cfg(test)]
#[path = "identifier_auth_test.rs"]
mod tests;

use gateway::{ApiRequest, Gateway};
use serde::{Deserialize, Serialize};

use super::nas::Nas;
use super::{execute, fetch};
use crate::error::ConsoleError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NasAuthorization {
    pub id: i64,
    pub nas_device: i64,
    #[serde(default)]
    pub nas_device_name: String,
    #[serde(default)]
    pub attribute_group: Option<i64>,
    #[serde(default)]
    pub attribute_group_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NasAuthorizationCreate {
    pub nas_device: i64,
    pub attribute_group: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NasAuthorizationUpdate {
    pub attribute_group: i64,
}

pub struct IdentifierNasAuthService<'a> {
    gateway: &'a Gateway,
}

impl<'a> IdentifierNasAuthService<'a> {
    #[must_use]
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    fn url(&self, user_id: i64, identifier_id: i64, suffix: &str) -> String {
        self.gateway
            .endpoint(&format!("/users/users/{user_id}/identifiers/{identifier_id}{suffix}"))
    }

    pub async fn list(&self, user_id: i64, identifier_id: i64) -> Result<Vec<NasAuthorization>, ConsoleError> {
        let url = self.url(user_id, identifier_id, "/nas-authorizations/");
        fetch(self.gateway, ApiRequest::get(url)).await
    }

    /// Devices the identifier has no authorization on yet.
    pub async fn available_nas(&self, user_id: i64, identifier_id: i64) -> Result<Vec<Nas>, ConsoleError> {
        let url = self.url(user_id, identifier_id, "/available-nas/");
        fetch(self.gateway, ApiRequest::get(url)).await
    }

    pub async fn create(
        &self,
        user_id: i64,
        identifier_id: i64,
        input: &NasAuthorizationCreate,
    ) -> Result<NasAuthorization, ConsoleError> {
        let url = self.url(user_id, identifier_id, "/nas-authorizations/");
        fetch(self.gateway, ApiRequest::post(url).json(input)?).await
    }

    pub async fn update(
        &self,
        user_id: i64,
        identifier_id: i64,
        authorization_id: i64,
        input: &NasAuthorizationUpdate,
    ) -> Result<NasAuthorization, ConsoleError> {
        let url = self.url(user_id, identifier_id, &format!("/nas-authorizations/{authorization_id}/"));
        fetch(self.gateway, ApiRequest::patch(url).json(input)?).await
    }

    pub async fn delete(&self, user_id: i64, identifier_id: i64, authorization_id: i64) -> Result<(), ConsoleError> {
        let url = self.url(user_id, identifier_id, &format!("/nas-authorizations/{authorization_id}/"));
        execute(self.gateway, ApiRequest::delete(url)).await
    }
}
