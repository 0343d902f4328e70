use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use crate::auth::AuthError;
use crate::error::StoreError;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("an internal server error occurred: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            Self::Auth(AuthError::MissingSecret) => "missing_secret",
            Self::Auth(AuthError::InvalidCredential) => "invalid_credential",
            Self::Store(StoreError::NoFilesProvided) => "no_files_provided",
            Self::Store(StoreError::UnsupportedType(_)) => "unsupported_type",
            Self::Store(StoreError::NotFound) => "not_found",
            Self::Store(StoreError::Io(_)) | Self::Anyhow(_) => "io_failure",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::Auth(AuthError::MissingSecret) => StatusCode::BAD_REQUEST,
            Self::Auth(AuthError::InvalidCredential) => StatusCode::UNAUTHORIZED,
            Self::Store(StoreError::NoFilesProvided) | Self::Store(StoreError::UnsupportedType(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
            Self::Store(StoreError::Io(_)) | Self::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(serde::Serialize)]
struct ErrorBody {
    success: bool,
    error: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // internal detail goes to the log, never to the client
        let message = match &self {
            Self::Store(StoreError::Io(e)) => {
                error!("storage error: {:?}", e);
                "an internal server error occurred".to_string()
            }
            Self::Anyhow(e) => {
                error!("generic error: {:?}", e);
                "an internal server error occurred".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorBody {
            success: false,
            error: self.kind(),
            message,
        };
        (self.status_code(), Json(body)).into_response()
    }
}
