use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

use crate::infrastructure::media::MediaServicesError;
use crate::infrastructure::storage::blob::StorageError;

/// Body returned for platform failures.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

pub struct ApiSuccess<T>(pub T, pub StatusCode);

impl<T> IntoResponse for ApiSuccess<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        let (body, status) = (self.0, self.1);
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Rendered verbatim as a `text/plain` 400.
    #[error("{0}")]
    MissingParameters(&'static str),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(&'static str),
    /// Keeps the extractor's own status, e.g. 413 for an oversized body.
    #[error(transparent)]
    Body(#[from] BytesRejection),
    #[error(transparent)]
    MediaServices(#[from] MediaServicesError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Caller-facing message; upstream error text stays in the logs.
    fn public_message(&self) -> &'static str {
        match self {
            ApiError::MediaServices(e) if e.is_authentication() => {
                "Failed to authenticate with media services"
            }
            ApiError::MediaServices(MediaServicesError::NotFound { .. }) => {
                "Media services resource not found"
            }
            ApiError::MediaServices(_) => "Media services request failed",
            ApiError::Storage(StorageError::InvalidAccountKey { .. }) => {
                "Storage account key is invalid"
            }
            ApiError::Storage(StorageError::InvalidBlobName(_)) => "Blob name is invalid",
            ApiError::Storage(_) => "Storage request failed",
            ApiError::MissingParameters(message) => *message,
            ApiError::InvalidParameter(_) => "Invalid parameter",
            ApiError::Body(_) => "Request body could not be read",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingParameters(_) | ApiError::InvalidParameter(_) => {
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            ApiError::Body(rejection) => rejection.into_response(),
            ApiError::MediaServices(_) | ApiError::Storage(_) => {
                error!(error = %self, "platform call failed");
                let body = ErrorBody {
                    error: self.public_message().to_string(),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
