//! Entry point bundling the gateway with every resource client.

#[cfg(test)]
#[path = "console_test.rs"]
mod tests;

use std::sync::Arc;

use gateway::{Gateway, GatewayConfig, GatewayError, KeyValueStore};

use crate::services::admin::AdminService;
use crate::services::api_key::ApiKeyService;
use crate::services::attribute::RadiusAttributeService;
use crate::services::attribute_group::AttributeGroupService;
use crate::services::identifier_auth::IdentifierNasAuthService;
use crate::services::nas::NasService;
use crate::services::radsec::RadSecService;
use crate::services::secret::SecretService;
use crate::services::timezone::TimezoneService;
use crate::services::user::{UserGroupService, UserIdentifierTypeService, UserService};
use crate::services::vendor::VendorService;

#[derive(Clone)]
pub struct Console {
    gateway: Arc<Gateway>,
}

impl Console {
    #[must_use]
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Build the production gateway over `store` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the stored
    /// session cannot be read.
    pub fn connect(config: GatewayConfig, store: Arc<dyn KeyValueStore>) -> Result<Self, GatewayError> {
        Ok(Self::new(Arc::new(Gateway::connect(config, store)?)))
    }

    #[must_use]
    pub fn gateway(&self) -> &Arc<Gateway> {
        &self.gateway
    }

    #[must_use]
    pub fn nas(&self) -> NasService<'_> {
        NasService::new(&self.gateway)
    }

    #[must_use]
    pub fn vendors(&self) -> VendorService<'_> {
        VendorService::new(&self.gateway)
    }

    #[must_use]
    pub fn secrets(&self) -> SecretService<'_> {
        SecretService::new(&self.gateway)
    }

    #[must_use]
    pub fn radsec(&self) -> RadSecService<'_> {
        RadSecService::new(&self.gateway)
    }

    #[must_use]
    pub fn admins(&self) -> AdminService<'_> {
        AdminService::new(&self.gateway)
    }

    #[must_use]
    pub fn users(&self) -> UserService<'_> {
        UserService::new(&self.gateway)
    }

    #[must_use]
    pub fn user_groups(&self) -> UserGroupService<'_> {
        UserGroupService::new(&self.gateway)
    }

    #[must_use]
    pub fn attribute_groups(&self) -> AttributeGroupService<'_> {
        AttributeGroupService::new(&self.gateway)
    }

    #[must_use]
    pub fn attributes(&self) -> RadiusAttributeService<'_> {
        RadiusAttributeService::new(&self.gateway)
    }

    #[must_use]
    pub fn identifier_types(&self) -> UserIdentifierTypeService<'_> {
        UserIdentifierTypeService::new(&self.gateway)
    }

    #[must_use]
    pub fn identifier_nas_auth(&self) -> IdentifierNasAuthService<'_> {
        IdentifierNasAuthService::new(&self.gateway)
    }

    #[must_use]
    pub fn timezones(&self) -> TimezoneService<'_> {
        TimezoneService::new(&self.gateway)
    }

    #[must_use]
    pub fn api_keys(&self) -> ApiKeyService<'_> {
        ApiKeyService::new(&self.gateway)
    }
}
