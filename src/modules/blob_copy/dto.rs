use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::params::RequestParams;
use crate::common::response::ApiError;
use crate::infrastructure::storage::blob::{is_addressable_blob_name, validate_account_key};

pub const BLOB_COPY_PARAMS_REQUIRED: &str = "Required parameters: asset_id, file_name, \
    source_storage_account_name, source_storage_account_key, source_container";

#[derive(Deserialize, ToSchema)]
pub struct StartBlobCopyRequest {
    /// Asset name, or the asset's platform GUID.
    pub asset_id: String,
    /// Blob name in the source container; reused as the destination blob name.
    pub file_name: String,
    pub source_storage_account_name: String,
    /// Base64 account key of the source storage account.
    pub source_storage_account_key: String,
    pub source_container: String,
}

impl std::fmt::Debug for StartBlobCopyRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StartBlobCopyRequest")
            .field("asset_id", &self.asset_id)
            .field("file_name", &self.file_name)
            .field("source_storage_account_name", &self.source_storage_account_name)
            .field("source_storage_account_key", &"<redacted>")
            .field("source_container", &self.source_container)
            .finish()
    }
}

impl StartBlobCopyRequest {
    pub fn from_params(params: &RequestParams) -> Result<Self, ApiError> {
        let [
            asset_id,
            file_name,
            source_storage_account_name,
            source_storage_account_key,
            source_container,
        ] = params.require(
            [
                "asset_id",
                "file_name",
                "source_storage_account_name",
                "source_storage_account_key",
                "source_container",
            ],
            BLOB_COPY_PARAMS_REQUIRED,
        )?;

        if !is_addressable_blob_name(&file_name) {
            return Err(ApiError::InvalidParameter("file_name"));
        }
        if validate_account_key(&source_storage_account_name, &source_storage_account_key)
            .is_err()
        {
            return Err(ApiError::InvalidParameter("source_storage_account_key"));
        }

        Ok(Self {
            asset_id,
            file_name,
            source_storage_account_name,
            source_storage_account_key,
            source_container,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct StartBlobCopyResponse {
    /// Container of the asset the blob is being copied into.
    pub destination_container: String,
    pub destination_storage_account: String,
    pub copy_id: String,
    /// Copy state when the request was accepted, usually `pending`.
    pub copy_status: String,
}
