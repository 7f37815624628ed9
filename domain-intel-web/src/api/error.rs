//! Mapping of core errors onto HTTP responses.

use std::fmt;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tracing::{error, warn};

use domain_intel_core::CoreError;

/// Wrapper tying [`CoreError`] to HTTP status codes and a JSON body.
///
/// The body reuses the error's serde shape: `{"code": ..., "details": ...}`.
#[derive(Debug)]
pub struct ApiError(CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            CoreError::ValidationError(_) | CoreError::DomainExists(_) => StatusCode::BAD_REQUEST,
            CoreError::ScanNotFound(_) | CoreError::DomainNotFound(_) => StatusCode::NOT_FOUND,
            CoreError::ScanFailed { .. } | CoreError::StorageError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.0.is_expected() {
            warn!("{}", self.0);
        } else {
            error!("{}", self.0);
        }
        HttpResponse::build(self.status_code()).json(&self.0)
    }
}
