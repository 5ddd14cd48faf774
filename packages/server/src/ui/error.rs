//! Error responses of the HTTP dispatch layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::usecase::ChatServiceError;

/// Errors returned by HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Chat(#[from] ChatServiceError),

    /// Body did not have the expected number of comma-separated fields
    #[error("expected {expected}")]
    MalformedBody { expected: &'static str },

    #[error("error reading body: {0}")]
    BodyRead(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Chat(_) | Self::MalformedBody { .. } => StatusCode::BAD_REQUEST,
            Self::BodyRead(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}
