use tracing::info;

use super::dto::{StartBlobCopyRequest, StartBlobCopyResponse};
use crate::common::response::ApiError;
use crate::config::settings::MediaAccount;
use crate::infrastructure::media::models::Asset;
use crate::infrastructure::media::{MediaServices, MediaServicesError};
use crate::infrastructure::storage::blob::{BlobLocation, SourceBlob};
use crate::state::AppState;

pub struct BlobCopyService;

impl BlobCopyService {
    /// Starts copying the source blob into the asset's container under the same
    /// blob name. Returns as soon as the destination accepts the copy.
    pub async fn start_copy(
        state: AppState,
        req: StartBlobCopyRequest,
    ) -> Result<StartBlobCopyResponse, ApiError> {
        let client = state.media.connect().await?;
        let asset = Self::resolve_asset(client.as_ref(), &state.config.media, &req.asset_id).await?;
        let destination = Self::destination(asset, &req.file_name)?;

        let source = SourceBlob {
            account_name: req.source_storage_account_name,
            account_key: req.source_storage_account_key,
            container: req.source_container,
            blob_name: req.file_name,
        };

        let receipt = state.blobs.start_copy(&source, &destination).await?;
        info!(
            "Started copy of {}/{}/{} into {}/{} ({})",
            source.account_name,
            source.container,
            source.blob_name,
            destination.account_name,
            destination.container,
            receipt.copy_id
        );

        Ok(StartBlobCopyResponse {
            destination_container: destination.container,
            destination_storage_account: destination.account_name,
            copy_id: receipt.copy_id,
            copy_status: receipt.status,
        })
    }

    /// Accepts either the asset name or the platform-assigned asset GUID.
    async fn resolve_asset(
        client: &dyn MediaServices,
        account: &MediaAccount,
        asset_id: &str,
    ) -> Result<Asset, ApiError> {
        if let Some(asset) = client.get_asset(account, asset_id).await? {
            return Ok(asset);
        }

        client
            .find_asset_by_id(account, asset_id)
            .await?
            .ok_or_else(|| {
                MediaServicesError::NotFound {
                    kind: "asset",
                    name: asset_id.to_string(),
                }
                .into()
            })
    }

    fn destination(asset: Asset, blob_name: &str) -> Result<BlobLocation, MediaServicesError> {
        let missing = |field| MediaServicesError::MissingField {
            operation: "get asset",
            field,
        };

        Ok(BlobLocation {
            account_name: asset
                .properties
                .storage_account_name
                .ok_or_else(|| missing("properties.storageAccountName"))?,
            container: asset.properties.container.ok_or_else(|| missing("properties.container"))?,
            blob_name: blob_name.to_string(),
        })
    }
}
