//! RADIUS shared secrets (`/radius/secrets`).

#[cfg(test)]
#[path = "secret_test.rs"]
mod tests;

use gateway::{ApiRequest, Gateway};
use serde::{Deserialize, Serialize};

use super::{action, execute, fetch};
use crate::error::ConsoleError;
use crate::paging::{Page, PageParams};

const BASE: &str = "/radius/secrets";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub rad_sec: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub source_subnets: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretCreate {
    pub name: String,
    pub secret: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rad_sec: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub source_subnets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SecretUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rad_sec: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_subnets: Option<Vec<String>>,
}

pub struct SecretService<'a> {
    gateway: &'a Gateway,
}

impl<'a> SecretService<'a> {
    #[must_use]
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    fn url(&self, suffix: &str) -> String {
        self.gateway.endpoint(&format!("{BASE}{suffix}"))
    }

    pub async fn list(&self, params: PageParams) -> Result<Page<Secret>, ConsoleError> {
        fetch(self.gateway, params.apply(ApiRequest::get(self.url("")))).await
    }

    pub async fn get(&self, id: i64) -> Result<Secret, ConsoleError> {
        fetch(self.gateway, ApiRequest::get(self.url(&format!("/{id}")))).await
    }

    pub async fn create(&self, input: &SecretCreate) -> Result<Secret, ConsoleError> {
        fetch(self.gateway, ApiRequest::post(self.url("")).json(input)?).await
    }

    pub async fn update(&self, id: i64, input: &SecretUpdate) -> Result<Secret, ConsoleError> {
        fetch(self.gateway, ApiRequest::patch(self.url(&format!("/{id}"))).json(input)?).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ConsoleError> {
        execute(self.gateway, ApiRequest::delete(self.url(&format!("/{id}")))).await
    }

    /// Store the secret value encrypted at rest; returns the updated record.
    pub async fn encrypt(&self, id: i64) -> Result<Secret, ConsoleError> {
        fetch(self.gateway, action(self.url(&format!("/{id}/encrypt")))?).await
    }

    pub async fn decrypt(&self, id: i64) -> Result<Secret, ConsoleError> {
        fetch(self.gateway, action(self.url(&format!("/{id}/decrypt")))?).await
    }
}
