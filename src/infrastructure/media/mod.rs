pub mod auth;
pub mod client;
pub mod models;

use reqwest::StatusCode;
use thiserror::Error;

pub use auth::{AzureMediaConnector, MediaServicesConnector};
pub use client::{MediaServices, MediaServicesClient};

#[derive(Debug, Error)]
pub enum MediaServicesError {
    #[error("media services credential field {0} is empty")]
    MissingCredential(&'static str),
    #[error("token request failed: {0}")]
    Authentication(#[source] azure_core::Error),
    #[error("media services request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{operation} returned HTTP {status} ({code}): {message}")]
    Api {
        operation: &'static str,
        status: StatusCode,
        code: String,
        message: String,
    },
    #[error("{kind} {name} was not found")]
    NotFound { kind: &'static str, name: String },
    #[error("{operation} response is missing {field}")]
    MissingField {
        operation: &'static str,
        field: &'static str,
    },
    #[error("failed to format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
    #[error("invalid endpoint or URL: {0}")]
    InvalidUrl(String),
}

impl MediaServicesError {
    pub fn is_authentication(&self) -> bool {
        matches!(
            self,
            MediaServicesError::MissingCredential(_) | MediaServicesError::Authentication(_)
        )
    }
}

impl From<url::ParseError> for MediaServicesError {
    fn from(err: url::ParseError) -> Self {
        MediaServicesError::InvalidUrl(err.to_string())
    }
}
