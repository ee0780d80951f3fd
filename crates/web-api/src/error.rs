use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use index_fund_core::AllocationError;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The allocator rejected the request parameters or an asset.
    #[error(transparent)]
    Allocation(#[from] AllocationError),

    /// The request parsed but is not a usable allocation request.
    #[error("{0}")]
    InvalidRequest(String),

    /// The body could not be read as an allocation request.
    #[error(transparent)]
    Body(#[from] JsonRejection),
}

/// Error body, `{"detail": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Allocation(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Body(rejection) => rejection.status(),
        }
    }

    fn detail(&self) -> String {
        match self {
            Self::Body(rejection) => rejection.body_text(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();
        tracing::warn!(status = status.as_u16(), "Rejected request: {}", detail);

        (status, Json(ErrorResponse { detail })).into_response()
    }
}
