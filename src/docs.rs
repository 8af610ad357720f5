use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::asset::handler::create_empty_asset,
        crate::modules::transform::handler::create_transform,
        crate::modules::blob_copy::handler::start_blob_copy_to_asset,
    ),
    components(
        schemas(
            crate::modules::asset::dto::CreateAssetRequest,
            crate::modules::asset::dto::CreateAssetResponse,
            crate::modules::transform::dto::CreateTransformRequest,
            crate::modules::transform::dto::TransformResponse,
            crate::modules::blob_copy::dto::StartBlobCopyRequest,
            crate::modules::blob_copy::dto::StartBlobCopyResponse,
            crate::common::response::ErrorBody,
        )
    ),
    tags(
        (name = "Media Services", description = "Asset, transform and ingest helpers")
    )
)]
pub struct ApiDoc;
