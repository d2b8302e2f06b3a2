//! HTTP error contract.
//!
//! Two outcomes only: a request whose shape is wrong gets 400 before any
//! ledger interaction, and any ledger-side failure gets 500 with the
//! underlying message passed through verbatim.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::ledger::LedgerError;

/// Body shape for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Failures a handler can surface to the client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request body failed shape validation; no ledger call was made.
    #[error("{0}")]
    Validation(String),

    /// A ledger operation failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Ledger(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

/// Result type for handler bodies.
pub type ApiResult<T> = Result<Json<T>, ApiError>;
