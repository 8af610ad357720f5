use std::sync::Arc;

use async_trait::async_trait;
use azure_core::{HttpClient, RetryOptions, TransportOptions};
use azure_storage::shared_access_signature::SasProtocol;
use azure_storage::{CloudLocation, StorageCredentials};
use azure_storage::shared_access_signature::service_sas::BlobSasPermissions;
use azure_storage_blobs::prelude::{BlobClient, ClientBuilder};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use thiserror::Error;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};
use url::Url;

use crate::config::settings::{DEFAULT_BLOB_SUFFIX, StorageAccount};

/// Lifetime of the read SAS handed to the destination for the copy.
pub const SOURCE_SAS_TTL: Duration = Duration::hours(1);

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid account key for storage account {account}: {reason}")]
    InvalidAccountKey { account: String, reason: String },
    #[error("blob name {0:?} contains a `.` or `..` path segment")]
    InvalidBlobName(String),
    #[error("storage request failed: {0}")]
    Azure(#[from] azure_core::Error),
}

/// Checks that `key` is a base64 shared key without contacting the service.
pub fn validate_account_key(account: &str, key: &str) -> Result<(), StorageError> {
    BASE64_STANDARD
        .decode(key.trim())
        .map(|_| ())
        .map_err(|e| StorageError::InvalidAccountKey {
            account: account.to_string(),
            reason: e.to_string(),
        })
}

/// URL parsers drop `.` and `..` segments, so such a name could never be
/// addressed as written.
pub fn is_addressable_blob_name(name: &str) -> bool {
    !name.is_empty() && name.split('/').all(|segment| segment != "." && segment != "..")
}

/// Where blob URLs point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobEndpoint {
    /// `https://{account}.{suffix}`
    Public { suffix: String },
    /// `{base}/{account}`, as served by the local storage emulator.
    PathStyle { base: String },
}

impl BlobEndpoint {
    pub fn location(&self, account: &str) -> CloudLocation {
        match self {
            BlobEndpoint::Public { suffix } if suffix == DEFAULT_BLOB_SUFFIX => {
                CloudLocation::Public {
                    account: account.to_string(),
                }
            }
            BlobEndpoint::Public { suffix } => CloudLocation::Custom {
                account: account.to_string(),
                uri: format!("https://{}.{}", account, suffix),
            },
            BlobEndpoint::PathStyle { base } => CloudLocation::Custom {
                account: account.to_string(),
                uri: format!("{}/{}", base, account),
            },
        }
    }
}

/// A blob in a storage account the caller holds the key for.
#[derive(Clone)]
pub struct SourceBlob {
    pub account_name: String,
    pub account_key: String,
    pub container: String,
    pub blob_name: String,
}

impl std::fmt::Debug for SourceBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceBlob")
            .field("account_name", &self.account_name)
            .field("account_key", &"<redacted>")
            .field("container", &self.container)
            .field("blob_name", &self.blob_name)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobLocation {
    pub account_name: String,
    pub container: String,
    pub blob_name: String,
}

/// What the destination reported when it accepted the copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyReceipt {
    pub copy_id: String,
    pub status: String,
}

#[async_trait]
pub trait BlobCopier: Send + Sync {
    /// Starts a server-side copy of `source` into `destination`. Returns once the
    /// destination has accepted the copy; completion is not awaited.
    async fn start_copy(
        &self,
        source: &SourceBlob,
        destination: &BlobLocation,
    ) -> Result<CopyReceipt, StorageError>;
}

/// Copies into asset containers through the blob SDK.
///
/// The destination is authorised with the configured account key; the source
/// is exposed to the destination through a short-lived read SAS minted from the
/// caller's key.
#[derive(Clone)]
pub struct AzureBlobCopier {
    http: Arc<dyn HttpClient>,
    destination_key: String,
    endpoint: BlobEndpoint,
}

impl AzureBlobCopier {
    pub fn new(
        client: reqwest::Client,
        storage: &StorageAccount,
        endpoint: BlobEndpoint,
    ) -> Result<Self, StorageError> {
        // Fail at start-up instead of on the first copy.
        validate_account_key(&storage.account_name, &storage.account_key)?;

        info!("✅ Blob storage configured for account {}", storage.account_name);

        Ok(Self {
            http: Arc::new(client),
            destination_key: storage.account_key.clone(),
            endpoint,
        })
    }

    /// No retries: a failed copy request surfaces to the caller as-is.
    fn blob_client(&self, account: &str, key: &str, container: &str, blob: &str) -> BlobClient {
        let credentials = StorageCredentials::access_key(account.to_string(), key.to_string());
        ClientBuilder::with_location(self.endpoint.location(account), credentials)
            .transport(TransportOptions::new(self.http.clone()))
            .retry(RetryOptions::none())
            .blob_client(container, blob)
    }

    /// `https://{account}.blob.../{container}/{blob}?{sas}` readable for one hour.
    pub async fn signed_source_url(
        &self,
        source: &SourceBlob,
        now: OffsetDateTime,
    ) -> Result<Url, StorageError> {
        if !is_addressable_blob_name(&source.blob_name) {
            return Err(StorageError::InvalidBlobName(source.blob_name.clone()));
        }
        validate_account_key(&source.account_name, &source.account_key)?;

        let blob = self.blob_client(
            &source.account_name,
            &source.account_key,
            &source.container,
            &source.blob_name,
        );
        let permissions = BlobSasPermissions {
            read: true,
            ..Default::default()
        };
        let sas = blob
            .shared_access_signature(permissions, now + SOURCE_SAS_TTL)
            .await?
            .protocol(SasProtocol::Https);

        let url = blob.generate_signed_blob_url(&sas)?;
        debug!("Signed source blob {}", url.path());
        Ok(url)
    }
}

#[async_trait]
impl BlobCopier for AzureBlobCopier {
    async fn start_copy(
        &self,
        source: &SourceBlob,
        destination: &BlobLocation,
    ) -> Result<CopyReceipt, StorageError> {
        if !is_addressable_blob_name(&destination.blob_name) {
            return Err(StorageError::InvalidBlobName(destination.blob_name.clone()));
        }
        let source_url = self.signed_source_url(source, OffsetDateTime::now_utc()).await?;

        // The destination account comes from the asset; the key from config.
        let response = self
            .blob_client(
                &destination.account_name,
                &self.destination_key,
                &destination.container,
                &destination.blob_name,
            )
            .copy(source_url)
            .await?;

        let receipt = CopyReceipt {
            copy_id: response.copy_id.to_string(),
            status: format!("{:?}", response.copy_status).to_lowercase(),
        };

        info!(
            "Copy {} into {}/{} is {}",
            receipt.copy_id, destination.account_name, destination.container, receipt.status
        );
        Ok(receipt)
    }
}
