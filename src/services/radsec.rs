//! RadSec (RADIUS over TLS) sources (`/radsec/sources/`).

#[cfg(test)]
#[path = "radsec_test.rs"]
mod tests;

use gateway::{ApiRequest, Gateway};
use serde::{Deserialize, Serialize};

use super::{execute, fetch};
use crate::error::ConsoleError;
use crate::paging::{Page, PageParams};

const BASE: &str = "/radsec/sources";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadSecSource {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub source_subnets: Vec<String>,
    #[serde(default)]
    pub tls_key: String,
    #[serde(default)]
    pub tls_cert: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Create/update payload. The TLS material is always sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RadSecSourceInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_subnets: Option<Vec<String>>,
    pub tls_key: String,
    pub tls_cert: String,
}

pub struct RadSecService<'a> {
    gateway: &'a Gateway,
}

impl<'a> RadSecService<'a> {
    #[must_use]
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    fn url(&self, suffix: &str) -> String {
        self.gateway.endpoint(&format!("{BASE}{suffix}"))
    }

    pub async fn list(&self, params: PageParams) -> Result<Page<RadSecSource>, ConsoleError> {
        fetch(self.gateway, params.apply(ApiRequest::get(self.url("/")))).await
    }

    pub async fn list_all(&self) -> Result<Vec<RadSecSource>, ConsoleError> {
        fetch(self.gateway, ApiRequest::get(self.url("/list_all/"))).await
    }

    pub async fn get(&self, id: i64) -> Result<RadSecSource, ConsoleError> {
        fetch(self.gateway, ApiRequest::get(self.url(&format!("/{id}")))).await
    }

    pub async fn create(&self, input: &RadSecSourceInput) -> Result<RadSecSource, ConsoleError> {
        fetch(self.gateway, ApiRequest::post(self.url("/")).json(input)?).await
    }

    pub async fn update(&self, id: i64, input: &RadSecSourceInput) -> Result<RadSecSource, ConsoleError> {
        fetch(self.gateway, ApiRequest::patch(self.url(&format!("/{id}/"))).json(input)?).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ConsoleError> {
        execute(self.gateway, ApiRequest::delete(self.url(&format!("/{id}/")))).await
    }
}
