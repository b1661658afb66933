//! NAS devices, NAS groups and per-identifier NAS authorization (`/nas`).
//!
//! NAS groups form a hierarchy; [`NasService::flattened_group_tree`] returns
//! it in the indented pre-order listing form.

#[cfg(test)]
#[path = "nas_test.rs"]
mod tests;

use gateway::{ApiRequest, Gateway};
use serde::{Deserialize, Serialize};

use super::secret::Secret;
use super::timezone::Timezone;
use super::vendor::Vendor;
use super::{action, execute, fetch};
use crate::error::ConsoleError;
use crate::paging::{Page, PageParams};
use crate::tree::{TreeNode, flatten_tree};

const BASE: &str = "/nas";

// =============================================================================
// MODELS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NasGroup {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NasGroup>,
    /// Depth in the hierarchy; set by tree flattening.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl TreeNode for NasGroup {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn parent_id(&self) -> Option<i64> {
        self.parent_id
    }

    fn take_children(&mut self) -> Vec<Self> {
        std::mem::take(&mut self.children)
    }

    // A root of a partial tree keeps the parent id the server reported.
    fn place(&mut self, level: u32, parent_id: Option<i64>) {
        self.level = Some(level);
        if parent_id.is_some() {
            self.parent_id = parent_id;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NasGroupInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nas {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub ip_address: String,
    #[serde(default)]
    pub coa_enabled: bool,
    #[serde(default)]
    pub coa_port: Option<u16>,
    #[serde(default)]
    pub groups: Vec<NasGroup>,
    #[serde(default)]
    pub secret_id: Option<i64>,
    #[serde(default)]
    pub secret: Option<Secret>,
    #[serde(default)]
    pub vendor_id: Option<i64>,
    #[serde(default)]
    pub vendor: Option<Vendor>,
    #[serde(default)]
    pub timezone_id: Option<i64>,
    /// Only the id is ever written back.
    #[serde(default)]
    pub timezone: Option<Timezone>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NasCreate {
    pub name: String,
    pub description: String,
    pub ip_address: String,
    pub coa_enabled: bool,
    pub coa_port: u16,
    pub group_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_id: Option<i64>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NasUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coa_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coa_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone_id: Option<i64>,
}

// =============================================================================
// SERVICE
// =============================================================================

pub struct NasService<'a> {
    gateway: &'a Gateway,
}

impl<'a> NasService<'a> {
    #[must_use]
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    fn url(&self, suffix: &str) -> String {
        self.gateway.endpoint(&format!("{BASE}{suffix}"))
    }

    // --- devices ---

    pub async fn list(&self, params: PageParams) -> Result<Page<Nas>, ConsoleError> {
        fetch(self.gateway, params.apply(ApiRequest::get(self.url("/nas/")))).await
    }

    pub async fn get(&self, id: i64) -> Result<Nas, ConsoleError> {
        fetch(self.gateway, ApiRequest::get(self.url(&format!("/nas/{id}/")))).await
    }

    pub async fn create(&self, input: &NasCreate) -> Result<Nas, ConsoleError> {
        fetch(self.gateway, ApiRequest::post(self.url("/nas/")).json(input)?).await
    }

    pub async fn update(&self, id: i64, input: &NasUpdate) -> Result<Nas, ConsoleError> {
        fetch(self.gateway, ApiRequest::patch(self.url(&format!("/nas/{id}"))).json(input)?).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ConsoleError> {
        execute(self.gateway, ApiRequest::delete(self.url(&format!("/nas/{id}")))).await
    }

    pub async fn by_group(&self, group_id: i64) -> Result<Vec<Nas>, ConsoleError> {
        let request = ApiRequest::get(self.url("/by_group")).query("group_id", group_id);
        fetch(self.gateway, request).await
    }

    // --- authorization per user identifier ---

    /// Devices the identifier may authenticate through.
    pub async fn authorized(&self, user_id: i64, identifier_id: i64) -> Result<Vec<Nas>, ConsoleError> {
        fetch(self.gateway, ApiRequest::get(self.url(&format!("/authorized/{user_id}/{identifier_id}")))).await
    }

    /// Devices not yet authorized for the identifier.
    pub async fn available(&self, user_id: i64, identifier_id: i64) -> Result<Vec<Nas>, ConsoleError> {
        fetch(self.gateway, ApiRequest::get(self.url(&format!("/available/{user_id}/{identifier_id}")))).await
    }

    pub async fn authorize(&self, user_id: i64, identifier_id: i64, nas_id: i64) -> Result<(), ConsoleError> {
        let url = self.url(&format!("/authorize/{user_id}/{identifier_id}/{nas_id}"));
        execute(self.gateway, action(url)?).await
    }

    pub async fn revoke(&self, user_id: i64, identifier_id: i64, nas_id: i64) -> Result<(), ConsoleError> {
        let url = self.url(&format!("/authorize/{user_id}/{identifier_id}/{nas_id}"));
        execute(self.gateway, ApiRequest::delete(url)).await
    }

    pub async fn authorize_all(&self, user_id: i64, identifier_id: i64) -> Result<(), ConsoleError> {
        let url = self.url(&format!("/authorize-all/{user_id}/{identifier_id}"));
        execute(self.gateway, action(url)?).await
    }

    pub async fn revoke_all(&self, user_id: i64, identifier_id: i64) -> Result<(), ConsoleError> {
        let url = self.url(&format!("/authorize-all/{user_id}/{identifier_id}"));
        execute(self.gateway, ApiRequest::delete(url)).await
    }

    // --- groups ---

    pub async fn list_groups(&self, params: PageParams) -> Result<Page<NasGroup>, ConsoleError> {
        fetch(self.gateway, params.apply(ApiRequest::get(self.url("/groups/")))).await
    }

    pub async fn get_group(&self, id: i64) -> Result<NasGroup, ConsoleError> {
        fetch(self.gateway, ApiRequest::get(self.url(&format!("/groups/{id}")))).await
    }

    pub async fn create_group(&self, input: &NasGroupInput) -> Result<NasGroup, ConsoleError> {
        fetch(self.gateway, ApiRequest::post(self.url("/groups/")).json(input)?).await
    }

    pub async fn update_group(&self, id: i64, input: &NasGroupInput) -> Result<NasGroup, ConsoleError> {
        fetch(self.gateway, ApiRequest::patch(self.url(&format!("/groups/{id}/"))).json(input)?).await
    }

    pub async fn delete_group(&self, id: i64) -> Result<(), ConsoleError> {
        execute(self.gateway, ApiRequest::delete(self.url(&format!("/groups/{id}")))).await
    }

    /// The group forest with `children` nested.
    pub async fn group_tree(&self) -> Result<Vec<NasGroup>, ConsoleError> {
        fetch(self.gateway, ApiRequest::get(self.url("/groups/tree/"))).await
    }

    pub async fn flattened_group_tree(&self) -> Result<Vec<NasGroup>, ConsoleError> {
        Ok(flatten_tree(self.group_tree().await?))
    }
}
