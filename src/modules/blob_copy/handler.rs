use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;

use super::dto::{StartBlobCopyRequest, StartBlobCopyResponse};
use super::service::BlobCopyService;
use crate::common::params::RequestParams;
use crate::common::response::{ApiSuccess, ErrorBody};
use crate::state::AppState;

/// Start an asynchronous server-side copy of a blob into an asset's container
#[utoipa::path(
    post,
    path = "/api/media-services-start-blob-copy-to-asset",
    params(
        ("asset_id" = Option<String>, Query, description = "Asset name or asset GUID"),
        ("file_name" = Option<String>, Query, description = "Blob to copy"),
        ("source_storage_account_name" = Option<String>, Query, description = "Source account"),
        ("source_storage_account_key" = Option<String>, Query, description = "Source key"),
        ("source_container" = Option<String>, Query, description = "Source container")
    ),
    request_body(
        content = StartBlobCopyRequest,
        description = "Any field may be sent in the query string instead",
        content_type = "application/json"
    ),
    responses(
        (
            status = 200,
            description = "Copy accepted by the destination",
            body = StartBlobCopyResponse
        ),
        (
            status = 400,
            description = "A required parameter is missing or invalid",
            body = String,
            content_type = "text/plain"
        ),
        (status = 500, description = "Media services or storage failure", body = ErrorBody)
    ),
    tag = "Media Services"
)]
pub async fn start_blob_copy_to_asset(
    State(state): State<AppState>,
    params: RequestParams,
) -> impl IntoResponse {
    info!("Processed request: media-services-start-blob-copy-to-asset");

    let req = match StartBlobCopyRequest::from_params(&params) {
        Ok(req) => req,
        Err(e) => return e.into_response(),
    };

    match BlobCopyService::start_copy(state, req).await {
        Ok(copy) => ApiSuccess(copy, StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}
