use time::{Duration, OffsetDateTime};
use tracing::info;
use url::Url;

use super::dto::{CreateAssetRequest, CreateAssetResponse};
use crate::common::response::ApiError;
use crate::infrastructure::media::MediaServicesError;
use crate::infrastructure::media::models::AssetContainerPermission;
use crate::state::AppState;

/// Lifetime of the upload SAS requested for a new asset's container.
pub const CONTAINER_SAS_TTL: Duration = Duration::hours(4);

pub struct AssetService;

impl AssetService {
    pub async fn create_empty(
        state: AppState,
        req: CreateAssetRequest,
    ) -> Result<CreateAssetResponse, ApiError> {
        let account = &state.config.media;
        let client = state.media.connect().await?;

        let asset = client.create_or_update_asset(account, &req.asset_name).await?;
        let asset_id = asset.properties.asset_id.ok_or(MediaServicesError::MissingField {
            operation: "create asset",
            field: "properties.assetId",
        })?;
        info!("Created or updated asset {} (asset_id={})", req.asset_name, asset_id);

        let sas_urls = client
            .list_container_sas(
                account,
                &req.asset_name,
                AssetContainerPermission::ReadWrite,
                OffsetDateTime::now_utc() + CONTAINER_SAS_TTL,
            )
            .await?;
        let sas_url = sas_urls.first().ok_or(MediaServicesError::MissingField {
            operation: "list container sas",
            field: "assetContainerSasUrls",
        })?;

        let container_name = container_name_from_sas_url(sas_url)?;
        info!("container_name={}", container_name);

        Ok(CreateAssetResponse {
            asset_id,
            container_name,
        })
    }
}

/// The container is the URL path minus its leading `/`.
pub fn container_name_from_sas_url(sas_url: &str) -> Result<String, MediaServicesError> {
    let url = Url::parse(sas_url)?;
    let path = url.path();
    Ok(path.strip_prefix('/').unwrap_or(path).to_string())
}
