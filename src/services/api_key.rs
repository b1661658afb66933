//! Machine API keys (`/api-keys/`).
//!
//! A key's lifetime is fixed at creation: `validity_days` must lie in
//! `1..=3650`. The bound is checked here so an out-of-range request never
//! leaves the process.

#[cfg(test)]
#[path = "api_key_test.rs"]
mod tests;

use std::ops::RangeInclusive;

use gateway::{ApiRequest, Gateway};
use serde::{Deserialize, Serialize};

use super::{action, execute, fetch};
use crate::error::ConsoleError;
use crate::paging::{Page, PageParams};

const BASE: &str = "/api-keys/";

pub const VALIDITY_DAYS: RangeInclusive<u16> = 1..=3650;
pub const DEFAULT_VALIDITY_DAYS: u16 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: i64,
    pub name: String,
    /// Full key on creation; masked in later reads.
    #[serde(default)]
    pub key: String,
    pub expires_at: String,
    #[serde(default)]
    pub created_by: Option<i64>,
    #[serde(default)]
    pub created_by_email: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub last_used_at: Option<String>,
    #[serde(default)]
    pub is_expired: bool,
    #[serde(default)]
    pub days_until_expiry: i64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiKeyCreate {
    name: String,
    validity_days: u16,
}

impl ApiKeyCreate {
    /// # Errors
    ///
    /// [`ConsoleError::InvalidInput`] for a blank name or a validity outside `1..=3650` days.
    pub fn new(name: &str, validity_days: u16) -> Result<Self, ConsoleError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ConsoleError::InvalidInput("API key name must not be empty".into()));
        }
        if !VALIDITY_DAYS.contains(&validity_days) {
            return Err(ConsoleError::InvalidInput(format!(
                "validity must be between {} and {} days, got {validity_days}",
                VALIDITY_DAYS.start(),
                VALIDITY_DAYS.end()
            )));
        }
        Ok(Self { name: name.to_owned(), validity_days })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn validity_days(&self) -> u16 {
        self.validity_days
    }
}

pub struct ApiKeyService<'a> {
    gateway: &'a Gateway,
}

impl<'a> ApiKeyService<'a> {
    #[must_use]
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    fn url(&self, suffix: &str) -> String {
        self.gateway.endpoint(&format!("{BASE}{suffix}"))
    }

    pub async fn list(&self, params: PageParams) -> Result<Page<ApiKey>, ConsoleError> {
        fetch(self.gateway, params.apply(ApiRequest::get(self.url("")))).await
    }

    pub async fn get(&self, id: i64) -> Result<ApiKey, ConsoleError> {
        fetch(self.gateway, ApiRequest::get(self.url(&format!("{id}/")))).await
    }

    pub async fn create(&self, input: &ApiKeyCreate) -> Result<ApiKey, ConsoleError> {
        let key: ApiKey = fetch(self.gateway, ApiRequest::post(self.url("")).json(input)?).await?;
        tracing::info!(id = key.id, expires_at = %key.expires_at, "API key created");
        Ok(key)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ConsoleError> {
        execute(self.gateway, ApiRequest::delete(self.url(&format!("{id}/")))).await
    }

    pub async fn revoke(&self, id: i64) -> Result<ApiKey, ConsoleError> {
        fetch(self.gateway, action(self.url(&format!("{id}/revoke/")))?).await
    }

    pub async fn activate(&self, id: i64) -> Result<ApiKey, ConsoleError> {
        fetch(self.gateway, action(self.url(&format!("{id}/activate/")))?).await
    }
}
