use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;

use super::dto::{CreateTransformRequest, TransformResponse};
use super::service::TransformService;
use crate::common::params::RequestParams;
use crate::common::response::{ApiSuccess, ErrorBody};
use crate::state::AppState;

/// Get or create an adaptive-streaming encoding transform
#[utoipa::path(
    post,
    path = "/api/media-services-create-transform",
    params(
        (
            "transform_name" = Option<String>,
            Query,
            description = "Transform name; may be sent in the JSON body instead"
        )
    ),
    request_body(
        content = CreateTransformRequest,
        description = "Optional when transform_name is in the query string",
        content_type = "application/json"
    ),
    responses(
        (
            status = 200,
            description = "Existing or newly created transform",
            body = TransformResponse
        ),
        (
            status = 400,
            description = "Required parameters:  transform_name",
            body = String,
            content_type = "text/plain"
        ),
        (status = 500, description = "Media services failure", body = ErrorBody)
    ),
    tag = "Media Services"
)]
pub async fn create_transform(
    State(state): State<AppState>,
    params: RequestParams,
) -> impl IntoResponse {
    info!("Processed request: media-services-create-transform");

    let req = match CreateTransformRequest::from_params(&params) {
        Ok(req) => req,
        Err(e) => return e.into_response(),
    };

    match TransformService::get_or_create(state, req).await {
        Ok(transform) => ApiSuccess(transform, StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}
