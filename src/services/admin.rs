//! Console administrators and admin groups (`/admin-users`).

#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;

use gateway::{ApiRequest, Gateway};
use serde::{Deserialize, Serialize};

use super::{action, execute, fetch};
use crate::error::ConsoleError;
use crate::paging::{Page, PageParams};

const BASE: &str = "/admin-users";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub groups: Vec<AdminGroup>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Create/update payload. `password` is required by the backend on create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdminUserInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_staff: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_superuser: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminGroup {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdminGroupInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Serialize)]
struct PasswordChange<'a> {
    old_password: &'a str,
    new_password: &'a str,
}

#[derive(Serialize)]
struct Membership {
    user_id: i64,
}

pub struct AdminService<'a> {
    gateway: &'a Gateway,
}

impl<'a> AdminService<'a> {
    #[must_use]
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    fn url(&self, suffix: &str) -> String {
        self.gateway.endpoint(&format!("{BASE}{suffix}"))
    }

    // --- users ---

    pub async fn list(&self, params: PageParams) -> Result<Page<AdminUser>, ConsoleError> {
        fetch(self.gateway, params.apply(ApiRequest::get(self.url("/users/")))).await
    }

    pub async fn get(&self, id: i64) -> Result<AdminUser, ConsoleError> {
        fetch(self.gateway, ApiRequest::get(self.url(&format!("/users/{id}/")))).await
    }

    pub async fn create(&self, input: &AdminUserInput) -> Result<AdminUser, ConsoleError> {
        if input.password.as_deref().is_none_or(str::is_empty) {
            return Err(ConsoleError::InvalidInput("a new admin needs a password".into()));
        }
        fetch(self.gateway, ApiRequest::post(self.url("/users/")).json(input)?).await
    }

    pub async fn update(&self, id: i64, input: &AdminUserInput) -> Result<AdminUser, ConsoleError> {
        fetch(self.gateway, ApiRequest::patch(self.url(&format!("/users/{id}/"))).json(input)?).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ConsoleError> {
        execute(self.gateway, ApiRequest::delete(self.url(&format!("/users/{id}/")))).await
    }

    pub async fn activate(&self, id: i64) -> Result<AdminUser, ConsoleError> {
        fetch(self.gateway, action(self.url(&format!("/users/{id}/activate")))?).await
    }

    pub async fn deactivate(&self, id: i64) -> Result<AdminUser, ConsoleError> {
        fetch(self.gateway, action(self.url(&format!("/users/{id}/deactivate")))?).await
    }

    pub async fn send_invitation(&self, id: i64) -> Result<(), ConsoleError> {
        execute(self.gateway, action(self.url(&format!("/users/{id}/send-invitation")))?).await
    }

    pub async fn send_password_reset(&self, id: i64) -> Result<(), ConsoleError> {
        execute(self.gateway, action(self.url(&format!("/users/{id}/send-password-reset")))?).await
    }

    // --- signed-in admin ---

    pub async fn me(&self) -> Result<AdminUser, ConsoleError> {
        fetch(self.gateway, ApiRequest::get(self.url("/me/"))).await
    }

    pub async fn update_me(&self, input: &AdminUserInput) -> Result<AdminUser, ConsoleError> {
        fetch(self.gateway, ApiRequest::patch(self.url("/me/")).json(input)?).await
    }

    pub async fn change_password(&self, old_password: &str, new_password: &str) -> Result<(), ConsoleError> {
        if new_password.is_empty() {
            return Err(ConsoleError::InvalidInput("new password must not be empty".into()));
        }
        let body = PasswordChange { old_password, new_password };
        execute(self.gateway, ApiRequest::post(self.url("/change-password/")).json(&body)?).await
    }

    // --- groups ---

    pub async fn list_groups(&self, params: PageParams) -> Result<Page<AdminGroup>, ConsoleError> {
        fetch(self.gateway, params.apply(ApiRequest::get(self.url("/groups/")))).await
    }

    pub async fn get_group(&self, id: i64) -> Result<AdminGroup, ConsoleError> {
        fetch(self.gateway, ApiRequest::get(self.url(&format!("/groups/{id}/")))).await
    }

    pub async fn create_group(&self, input: &AdminGroupInput) -> Result<AdminGroup, ConsoleError> {
        fetch(self.gateway, ApiRequest::post(self.url("/groups/")).json(input)?).await
    }

    pub async fn update_group(&self, id: i64, input: &AdminGroupInput) -> Result<AdminGroup, ConsoleError> {
        fetch(self.gateway, ApiRequest::patch(self.url(&format!("/groups/{id}/"))).json(input)?).await
    }

    pub async fn delete_group(&self, id: i64) -> Result<(), ConsoleError> {
        execute(self.gateway, ApiRequest::delete(self.url(&format!("/groups/{id}/")))).await
    }

    pub async fn members(&self, group_id: i64) -> Result<Vec<AdminUser>, ConsoleError> {
        fetch(self.gateway, ApiRequest::get(self.url(&format!("/groups/{group_id}/members/")))).await
    }

    pub async fn add_member(&self, group_id: i64, user_id: i64) -> Result<(), ConsoleError> {
        let request = ApiRequest::post(self.url(&format!("/groups/{group_id}/members/"))).json(&Membership { user_id })?;
        execute(self.gateway, request).await
    }

    pub async fn remove_member(&self, group_id: i64, user_id: i64) -> Result<(), ConsoleError> {
        execute(self.gateway, ApiRequest::delete(self.url(&format!("/groups/{group_id}/members/{user_id}")))).await
    }
}
