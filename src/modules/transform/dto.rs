use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::params::RequestParams;
use crate::common::response::ApiError;
use crate::infrastructure::media::models::Transform;

pub const TRANSFORM_NAME_REQUIRED: &str = "Required parameters:  transform_name";

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTransformRequest {
    #[schema(example = "AdaptiveStreamingTransform")]
    pub transform_name: String,
}

impl CreateTransformRequest {
    pub fn from_params(params: &RequestParams) -> Result<Self, ApiError> {
        let [transform_name] = params.require(["transform_name"], TRANSFORM_NAME_REQUIRED)?;
        Ok(Self { transform_name })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct TransformResponse {
    pub name: String,
    pub id: String,
}

impl From<Transform> for TransformResponse {
    fn from(t: Transform) -> Self {
        Self { name: t.name, id: t.id }
    }
}
