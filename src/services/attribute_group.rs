//! RADIUS attribute groups (`/radius/attribute-groups`).

#[cfg(test)]
#[path = "attribute_group_test.rs"]
mod tests;

use gateway::{ApiRequest, Gateway};
use serde::{Deserialize, Serialize};

use super::{execute, fetch};
use crate::error::ConsoleError;
use crate::paging::{Page, PageParams};

const BASE: &str = "/radius/attribute-groups";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeGroup {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Built-in groups cannot be edited or deleted.
    #[serde(default)]
    pub is_system: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttributeGroupInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

pub struct AttributeGroupService<'a> {
    gateway: &'a Gateway,
}

impl<'a> AttributeGroupService<'a> {
    #[must_use]
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    fn url(&self, suffix: &str) -> String {
        self.gateway.endpoint(&format!("{BASE}{suffix}"))
    }

    pub async fn list(&self, params: PageParams) -> Result<Page<AttributeGroup>, ConsoleError> {
        fetch(self.gateway, params.apply(ApiRequest::get(self.url("")))).await
    }

    pub async fn get(&self, id: i64) -> Result<AttributeGroup, ConsoleError> {
        fetch(self.gateway, ApiRequest::get(self.url(&format!("/{id}/")))).await
    }

    pub async fn create(&self, input: &AttributeGroupInput) -> Result<AttributeGroup, ConsoleError> {
        fetch(self.gateway, ApiRequest::post(self.url("")).json(input)?).await
    }

    pub async fn update(&self, id: i64, input: &AttributeGroupInput) -> Result<AttributeGroup, ConsoleError> {
        fetch(self.gateway, ApiRequest::patch(self.url(&format!("/{id}/"))).json(input)?).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ConsoleError> {
        execute(self.gateway, ApiRequest::delete(self.url(&format!("/{id}/")))).await
    }
}
