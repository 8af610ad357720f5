use std::sync::Arc;

use crate::config::settings::AppConfig;
use crate::infrastructure::media::MediaServicesConnector;
use crate::infrastructure::storage::blob::BlobCopier;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub media: Arc<dyn MediaServicesConnector>,
    pub blobs: Arc<dyn BlobCopier>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        media: Arc<dyn MediaServicesConnector>,
        blobs: Arc<dyn BlobCopier>,
    ) -> Self {
        Self {
            config,
            media,
            blobs,
        }
    }
}
