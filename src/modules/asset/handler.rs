use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;

use super::dto::{CreateAssetRequest, CreateAssetResponse};
use super::service::AssetService;
use crate::common::params::RequestParams;
use crate::common::response::{ApiSuccess, ErrorBody};
use crate::state::AppState;

/// Create (or re-create) an empty asset and report its backing container
#[utoipa::path(
    post,
    path = "/api/media-services-create-empty-asset",
    params(
        (
            "assetName" = Option<String>,
            Query,
            description = "Asset name; may be sent in the JSON body instead"
        )
    ),
    request_body(
        content = CreateAssetRequest,
        description = "Optional when assetName is in the query string",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Asset created or updated", body = CreateAssetResponse),
        (
            status = 400,
            description = "Required parameters:  assetName",
            body = String,
            content_type = "text/plain"
        ),
        (status = 500, description = "Media services failure", body = ErrorBody)
    ),
    tag = "Media Services"
)]
pub async fn create_empty_asset(
    State(state): State<AppState>,
    params: RequestParams,
) -> impl IntoResponse {
    info!("Processed request: media-services-create-empty-asset");

    let req = match CreateAssetRequest::from_params(&params) {
        Ok(req) => req,
        Err(e) => return e.into_response(),
    };

    match AssetService::create_empty(state, req).await {
        Ok(asset) => ApiSuccess(asset, StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}
