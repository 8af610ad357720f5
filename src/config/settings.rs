use std::fmt;

use crate::config::env::{self, ConfigError, EnvKey};
use crate::infrastructure::storage::blob::BlobEndpoint;

pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";
pub const DEFAULT_RESOURCE_MANAGER_URL: &str = "https://management.azure.com";
pub const DEFAULT_MANAGEMENT_RESOURCE: &str = "https://management.core.windows.net/";
pub const DEFAULT_BLOB_SUFFIX: &str = "blob.core.windows.net";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_port: u16,
    pub credentials: ServicePrincipal,
    pub media: MediaAccount,
    pub storage: StorageAccount,
    pub endpoints: CloudEndpoints,
}

/// Client-credential identity used against the management API.
#[derive(Clone)]
pub struct ServicePrincipal {
    pub client_id: String,
    pub client_secret: String,
    pub subscription_id: String,
    pub tenant_id: String,
}

impl fmt::Debug for ServicePrincipal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServicePrincipal")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("subscription_id", &self.subscription_id)
            .field("tenant_id", &self.tenant_id)
            .finish()
    }
}

/// Resource group and media account every asset and transform lives under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaAccount {
    pub resource_group: String,
    pub account_name: String,
}

/// Shared-key credentials for the storage account(s) backing asset containers.
#[derive(Clone)]
pub struct StorageAccount {
    pub account_name: String,
    pub account_key: String,
}

impl fmt::Debug for StorageAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageAccount")
            .field("account_name", &self.account_name)
            .field("account_key", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct CloudEndpoints {
    pub authority_host: String,
    pub resource_manager: String,
    pub management_resource: String,
    pub blob: BlobEndpoint,
}

impl Default for CloudEndpoints {
    fn default() -> Self {
        Self {
            authority_host: DEFAULT_AUTHORITY_HOST.to_string(),
            resource_manager: DEFAULT_RESOURCE_MANAGER_URL.to_string(),
            management_resource: DEFAULT_MANAGEMENT_RESOURCE.to_string(),
            blob: BlobEndpoint::Public {
                suffix: DEFAULT_BLOB_SUFFIX.to_string(),
            },
        }
    }
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        let blob = match env::get_optional(EnvKey::BlobEndpoint) {
            Some(base) => BlobEndpoint::PathStyle {
                base: base.trim_end_matches('/').to_string(),
            },
            None => BlobEndpoint::Public {
                suffix: env::get_or(EnvKey::BlobSuffix, DEFAULT_BLOB_SUFFIX),
            },
        };

        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 7071)?,
            credentials: ServicePrincipal {
                client_id: env::get(EnvKey::ClientId)?,
                client_secret: env::get(EnvKey::ClientKey)?,
                subscription_id: env::get(EnvKey::SubscriptionId)?,
                tenant_id: env::get(EnvKey::TenantId)?,
            },
            media: MediaAccount {
                resource_group: env::get(EnvKey::ResourceGroup)?,
                account_name: env::get(EnvKey::AccountName)?,
            },
            storage: StorageAccount {
                account_name: env::get(EnvKey::StorageAccountName)?,
                account_key: env::get(EnvKey::StorageAccountKey)?,
            },
            endpoints: CloudEndpoints {
                authority_host: env::get_or(EnvKey::AuthorityHost, DEFAULT_AUTHORITY_HOST)
                    .trim_end_matches('/')
                    .to_string(),
                resource_manager: env::get_or(
                    EnvKey::ResourceManagerUrl,
                    DEFAULT_RESOURCE_MANAGER_URL,
                )
                .trim_end_matches('/')
                .to_string(),
                management_resource: env::get_or(
                    EnvKey::ManagementResource,
                    DEFAULT_MANAGEMENT_RESOURCE,
                ),
                blob,
            },
        })
    }
}
