use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::params::RequestParams;
use crate::common::response::ApiError;

pub const ASSET_NAME_REQUIRED: &str = "Required parameters:  assetName";

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAssetRequest {
    #[serde(rename = "assetName")]
    #[schema(example = "video1")]
    pub asset_name: String,
}

impl CreateAssetRequest {
    pub fn from_params(params: &RequestParams) -> Result<Self, ApiError> {
        let [asset_name] = params.require(["assetName"], ASSET_NAME_REQUIRED)?;
        Ok(Self { asset_name })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CreateAssetResponse {
    pub asset_id: String,
    pub container_name: String,
}
