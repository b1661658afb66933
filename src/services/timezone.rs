//! Reference timezones for NAS devices (`/shared/timezones/`).

#[cfg(test)]
#[path = "timezone_test.rs"]
mod tests;

use gateway::{ApiRequest, Gateway};
use serde::{Deserialize, Serialize};

use super::fetch;
use crate::error::ConsoleError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timezone {
    pub id: i64,
    pub name: String,
    /// Minutes east of UTC.
    #[serde(default)]
    pub offset: i32,
    /// `UTC+05:30` style label rendered by the server.
    #[serde(default)]
    pub offset_formatted: String,
}

pub struct TimezoneService<'a> {
    gateway: &'a Gateway,
}

impl<'a> TimezoneService<'a> {
    #[must_use]
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Every timezone, ordered by offset. The route is not paged.
    pub async fn list(&self) -> Result<Vec<Timezone>, ConsoleError> {
        fetch(self.gateway, ApiRequest::get(self.gateway.endpoint("/shared/timezones/"))).await
    }
}
