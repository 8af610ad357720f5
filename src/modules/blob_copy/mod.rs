use axum::Router;
use axum::routing::post;

use crate::state::AppState;

pub mod dto;
pub mod handler;
pub mod service;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/media-services-start-blob-copy-to-asset",
        post(handler::start_blob_copy_to_asset),
    )
}
