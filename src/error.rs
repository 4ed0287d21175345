use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::types::ErrorResponse;

/// Errors the classification pipeline can surface to the HTTP layer.
///
/// Model-load failures are deliberately absent: the registry absorbs them
/// and degrades to mock predictions instead of failing the request.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("invalid base64 image data")]
    Base64(#[from] base64::DecodeError),

    #[error("unrecognized image format")]
    Image(#[from] image::ImageError),

    #[error("unsupported produce type: {0}")]
    UnsupportedProduceType(String),

    #[error(
        "model for {produce_type} produced {actual} outputs but its class table has {expected}"
    )]
    Configuration {
        produce_type: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("inference failed")]
    Inference(#[from] candle_core::Error),
}

impl ClassifyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ClassifyError::Base64(_)
            | ClassifyError::Image(_)
            | ClassifyError::UnsupportedProduceType(_) => StatusCode::BAD_REQUEST,
            ClassifyError::Configuration { .. } | ClassifyError::Inference(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn detail(&self) -> Option<String> {
        match self {
            ClassifyError::Base64(source) => Some(source.to_string()),
            ClassifyError::Image(source) => Some(source.to_string()),
            ClassifyError::Inference(source) => Some(source.to_string()),
            _ => None,
        }
    }
}

impl IntoResponse for ClassifyError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            detail: self.detail(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
