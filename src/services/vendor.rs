//! NAS vendors (`/nas/vendors`).

#[cfg(test)]
#[path = "vendor_test.rs"]
mod tests;

use gateway::{ApiRequest, Gateway};
use serde::{Deserialize, Serialize};

use super::{execute, fetch};
use crate::error::ConsoleError;
use crate::paging::{Page, PageParams};

const BASE: &str = "/nas/vendors";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// IANA private enterprise number.
    #[serde(default)]
    pub vendor_id: i64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Create/update payload; unset fields are left out of the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VendorInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<i64>,
}

pub struct VendorService<'a> {
    gateway: &'a Gateway,
}

impl<'a> VendorService<'a> {
    #[must_use]
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    fn url(&self, suffix: &str) -> String {
        self.gateway.endpoint(&format!("{BASE}{suffix}"))
    }

    pub async fn list(&self, params: PageParams) -> Result<Page<Vendor>, ConsoleError> {
        fetch(self.gateway, params.apply(ApiRequest::get(self.url("")))).await
    }

    /// Every vendor, unpaged.
    pub async fn list_all(&self) -> Result<Vec<Vendor>, ConsoleError> {
        fetch(self.gateway, ApiRequest::get(self.url("/list_all/"))).await
    }

    pub async fn get(&self, id: i64) -> Result<Vendor, ConsoleError> {
        fetch(self.gateway, ApiRequest::get(self.url(&format!("/{id}/")))).await
    }

    pub async fn create(&self, input: &VendorInput) -> Result<Vendor, ConsoleError> {
        fetch(self.gateway, ApiRequest::post(self.url("")).json(input)?).await
    }

    /// Full replacement (`PUT`).
    pub async fn update(&self, id: i64, input: &VendorInput) -> Result<Vendor, ConsoleError> {
        fetch(self.gateway, ApiRequest::put(self.url(&format!("/{id}/"))).json(input)?).await
    }

    pub async fn partial_update(&self, id: i64, input: &VendorInput) -> Result<Vendor, ConsoleError> {
        fetch(self.gateway, ApiRequest::patch(self.url(&format!("/{id}/"))).json(input)?).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ConsoleError> {
        execute(self.gateway, ApiRequest::delete(self.url(&format!("/{id}/")))).await
    }
}
