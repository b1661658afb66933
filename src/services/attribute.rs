//! RADIUS attributes inside an attribute group (`/radius/attributes`).
//!
//! An attribute is a vendor-specific `(vendor_id, attribute_id)` pair with a
//! typed value. Groups are what NAS authorizations reference; the attributes
//! are what the RADIUS server actually returns in an Access-Accept.

#[cfg(test)]
#[path = "attribute_test.rs"]
mod tests;

use gateway::{ApiRequest, Gateway};
use serde::{Deserialize, Serialize};

use super::{execute, fetch};
use crate::error::ConsoleError;
use crate::paging::{Page, PageParams};

const BASE: &str = "/radius/attributes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    String,
    Integer,
    Ipaddr,
    Date,
    Octets,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadiusAttribute {
    pub id: i64,
    /// Owning attribute group id.
    pub group: i64,
    pub vendor_id: i64,
    pub attribute_id: i64,
    pub attribute_name: String,
    pub attribute_type: AttributeType,
    pub attribute_value: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadiusAttributeCreate {
    pub group: i64,
    pub vendor_id: i64,
    pub attribute_id: i64,
    pub attribute_name: String,
    pub attribute_type: AttributeType,
    pub attribute_value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RadiusAttributeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_type: Option<AttributeType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_value: Option<String>,
}

pub struct RadiusAttributeService<'a> {
    gateway: &'a Gateway,
}

impl<'a> RadiusAttributeService<'a> {
    #[must_use]
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    fn url(&self, suffix: &str) -> String {
        self.gateway.endpoint(&format!("{BASE}{suffix}"))
    }

    /// One page of a group's attributes, filtered server-side.
    pub async fn list(&self, group_id: i64, params: PageParams) -> Result<Page<RadiusAttribute>, ConsoleError> {
        let request = ApiRequest::get(self.url("/")).query("group", group_id);
        fetch(self.gateway, params.apply(request)).await
    }

    /// Every attribute of a group in one response.
    pub async fn by_group(&self, group_id: i64) -> Result<Vec<RadiusAttribute>, ConsoleError> {
        let request = ApiRequest::get(self.url("/by_group/")).query("group_id", group_id);
        fetch(self.gateway, request).await
    }

    pub async fn get(&self, id: i64) -> Result<RadiusAttribute, ConsoleError> {
        fetch(self.gateway, ApiRequest::get(self.url(&format!("/{id}/")))).await
    }

    pub async fn create(&self, input: &RadiusAttributeCreate) -> Result<RadiusAttribute, ConsoleError> {
        fetch(self.gateway, ApiRequest::post(self.url("/")).json(input)?).await
    }

    pub async fn update(&self, id: i64, input: &RadiusAttributeUpdate) -> Result<RadiusAttribute, ConsoleError> {
        fetch(self.gateway, ApiRequest::patch(self.url(&format!("/{id}/"))).json(input)?).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ConsoleError> {
        execute(self.gateway, ApiRequest::delete(self.url(&format!("/{id}/")))).await
    }
}
