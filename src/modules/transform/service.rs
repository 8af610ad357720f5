use tracing::info;

use super::dto::{CreateTransformRequest, TransformResponse};
use crate::common::response::ApiError;
use crate::infrastructure::media::models::{EncoderNamedPreset, TransformOutput};
use crate::state::AppState;

pub struct TransformService;

impl TransformService {
    /// Outputs of every transform this service creates.
    pub fn default_outputs() -> Vec<TransformOutput> {
        vec![TransformOutput::builtin(EncoderNamedPreset::AdaptiveStreaming)]
    }

    /// Returns the named transform, creating it first if it does not exist.
    /// An existing transform is returned as-is even if its outputs differ.
    pub async fn get_or_create(
        state: AppState,
        req: CreateTransformRequest,
    ) -> Result<TransformResponse, ApiError> {
        let account = &state.config.media;
        let client = state.media.connect().await?;

        if let Some(existing) = client.get_transform(account, &req.transform_name).await? {
            info!("Transform {} already exists", existing.name);
            return Ok(existing.into());
        }

        let created = client
            .create_or_update_transform(account, &req.transform_name, Self::default_outputs())
            .await?;
        info!("Created transform {} ({})", created.name, created.id);

        Ok(created.into())
    }
}
