use std::env;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("environment variable {0} is set but empty")]
    Empty(&'static str),
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy)]
pub enum EnvKey {
    ServerPort,
    ClientId,
    ClientKey,
    SubscriptionId,
    TenantId,
    ResourceGroup,
    AccountName,
    StorageAccountName,
    StorageAccountKey,
    AuthorityHost,
    ResourceManagerUrl,
    ManagementResource,
    BlobSuffix,
    BlobEndpoint,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::ClientId => "MEDIA_SERVICES_CLIENT_ID",
            EnvKey::ClientKey => "MEDIA_SERVICES_CLIENT_KEY",
            EnvKey::SubscriptionId => "MEDIA_SERVICES_SUBSCRIPTION_ID",
            EnvKey::TenantId => "MEDIA_SERVICES_TENANT_ID",
            EnvKey::ResourceGroup => "MEDIA_SERVICES_RESOURCE_GROUP",
            EnvKey::AccountName => "MEDIA_SERVICES_ACCOUNT_NAME",
            EnvKey::StorageAccountName => "STORAGE_ACCOUNT_NAME",
            EnvKey::StorageAccountKey => "STORAGE_ACCOUNT_KEY",
            EnvKey::AuthorityHost => "AZURE_AUTHORITY_HOST",
            EnvKey::ResourceManagerUrl => "AZURE_RESOURCE_MANAGER_URL",
            EnvKey::ManagementResource => "AZURE_MANAGEMENT_RESOURCE",
            EnvKey::BlobSuffix => "AZURE_STORAGE_BLOB_SUFFIX",
            EnvKey::BlobEndpoint => "AZURE_STORAGE_BLOB_ENDPOINT",
        }
    }
}

/// Reads a required variable. Blank values count as missing.
pub fn get(key: EnvKey) -> Result<String, ConfigError> {
    match env::var(key.as_str()) {
        Ok(val) if val.trim().is_empty() => Err(ConfigError::Empty(key.as_str())),
        Ok(val) => Ok(val),
        Err(_) => Err(ConfigError::Missing(key.as_str())),
    }
}

pub fn get_optional(key: EnvKey) -> Option<String> {
    env::var(key.as_str()).ok().filter(|val| !val.trim().is_empty())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    get_optional(key).unwrap_or_else(|| default.to_string())
}

pub fn get_parsed<T>(key: EnvKey, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get_optional(key) {
        Some(val) => val.parse::<T>().map_err(|e| ConfigError::Invalid {
            key: key.as_str(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
