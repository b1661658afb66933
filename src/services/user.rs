//! RADIUS subscribers and their groups (`/users`).

#[cfg(test)]
#[path = "user_test.rs"]
mod tests;

use gateway::{ApiRequest, Gateway};
use serde::{Deserialize, Serialize};

use super::attribute_group::AttributeGroup;
use super::{execute, fetch};
use crate::error::ConsoleError;
use crate::paging::{Page, PageParams};
use crate::tree::{TreeNode, flatten_tree};

const BASE: &str = "/users";

// =============================================================================
// MODELS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierType {
    pub id: i64,
    pub name: String,
    /// `PWD`, `SIM` or `MAC`.
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A credential a subscriber authenticates with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentifier {
    pub id: i64,
    pub identifier_type: IdentifierType,
    pub value: String,
    #[serde(default)]
    pub is_enabled: bool,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub auth_attribute_group: Option<AttributeGroup>,
    #[serde(default)]
    pub expiration_date: Option<String>,
    #[serde(default)]
    pub reject_expired: bool,
    #[serde(default)]
    pub expired_auth_attribute_group: Option<AttributeGroup>,
    #[serde(default)]
    pub is_expired: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub groups: Vec<UserGroup>,
    #[serde(default)]
    pub identifiers: Vec<UserIdentifier>,
    #[serde(default)]
    pub last_login: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroup {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
    /// Members may authenticate through any NAS.
    #[serde(default)]
    pub allow_any_nas: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<UserGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl TreeNode for UserGroup {
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

    fn place(&mut self, level: u32, parent_id: Option<i64>) {
        self.level = Some(level);
        if parent_id.is_some() {
            self.parent_id = parent_id;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserGroupInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_any_nas: Option<bool>,
}

// =============================================================================
// USERS
// =============================================================================

pub struct UserService<'a> {
    gateway: &'a Gateway,
}

impl<'a> UserService<'a> {
    #[must_use]
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    fn url(&self, suffix: &str) -> String {
        self.gateway.endpoint(&format!("{BASE}/users{suffix}"))
    }

    pub async fn list(&self, params: PageParams) -> Result<Page<User>, ConsoleError> {
        fetch(self.gateway, params.apply(ApiRequest::get(self.url("/")))).await
    }

    pub async fn get(&self, id: i64) -> Result<User, ConsoleError> {
        fetch(self.gateway, ApiRequest::get(self.url(&format!("/{id}/")))).await
    }

    pub async fn create(&self, input: &UserInput) -> Result<User, ConsoleError> {
        fetch(self.gateway, ApiRequest::post(self.url("/")).json(input)?).await
    }

    pub async fn update(&self, id: i64, input: &UserInput) -> Result<User, ConsoleError> {
        fetch(self.gateway, ApiRequest::patch(self.url(&format!("/{id}/"))).json(input)?).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ConsoleError> {
        execute(self.gateway, ApiRequest::delete(self.url(&format!("/{id}/")))).await
    }
}

// =============================================================================
// USER GROUPS
// =============================================================================

pub struct UserGroupService<'a> {
    gateway: &'a Gateway,
}

impl<'a> UserGroupService<'a> {
    #[must_use]
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    fn url(&self, suffix: &str) -> String {
        self.gateway.endpoint(&format!("{BASE}/groups{suffix}"))
    }

    pub async fn list(&self, params: PageParams) -> Result<Page<UserGroup>, ConsoleError> {
        fetch(self.gateway, params.apply(ApiRequest::get(self.url("/")))).await
    }

    pub async fn list_all(&self) -> Result<Vec<UserGroup>, ConsoleError> {
        fetch(self.gateway, ApiRequest::get(self.url("/list_all/"))).await
    }

    pub async fn get(&self, id: i64) -> Result<UserGroup, ConsoleError> {
        fetch(self.gateway, ApiRequest::get(self.url(&format!("/{id}/")))).await
    }

    pub async fn create(&self, input: &UserGroupInput) -> Result<UserGroup, ConsoleError> {
        fetch(self.gateway, ApiRequest::post(self.url("/")).json(input)?).await
    }

    pub async fn update(&self, id: i64, input: &UserGroupInput) -> Result<UserGroup, ConsoleError> {
        fetch(self.gateway, ApiRequest::patch(self.url(&format!("/{id}/"))).json(input)?).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ConsoleError> {
        execute(self.gateway, ApiRequest::delete(self.url(&format!("/{id}/")))).await
    }

    pub async fn tree(&self) -> Result<Vec<UserGroup>, ConsoleError> {
        fetch(self.gateway, ApiRequest::get(self.url("/tree/"))).await
    }

    pub async fn flattened_tree(&self) -> Result<Vec<UserGroup>, ConsoleError> {
        Ok(flatten_tree(self.tree().await?))
    }
}

// =============================================================================
// IDENTIFIER TYPES
// =============================================================================

pub struct UserIdentifierTypeService<'a> {
    gateway: &'a Gateway,
}

impl<'a> UserIdentifierTypeService<'a> {
    #[must_use]
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Every identifier type (`PWD`, `SIM`, `MAC`, ...), unpaged.
    pub async fn list_all(&self) -> Result<Vec<IdentifierType>, ConsoleError> {
        let url = self.gateway.endpoint(&format!("{BASE}/identifier-types/list_all/"));
        fetch(self.gateway, ApiRequest::get(url)).await
    }
}
