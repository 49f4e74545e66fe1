//! Mapping from domain errors to HTTP responses.

use africanut_core::ledger::LedgerError;
use africanut_core::reports::ReportError;
use africanut_shared::AppError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

/// Error returned by route handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Nothing to report for the requested criteria.
    NoContent,
    /// Request failed with a JSON `{ error, message }` body.
    Failure {
        /// Response status.
        status: StatusCode,
        /// Machine-readable code, lowercase.
        code: String,
        /// Caller-facing message.
        message: String,
    },
}

impl ApiError {
    fn from_app(code: &str, err: &AppError) -> Self {
        if err.is_server_error() {
            error!(error = %err, "Request failed");
            return Self::Failure {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "internal_error".to_string(),
                message: err.public_message(),
            };
        }

        Self::Failure {
            status: StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            code: code.to_ascii_lowercase(),
            message: err.public_message(),
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        let code = err.error_code();
        Self::from_app(code, &AppError::from(err))
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::NoDataFound => Self::NoContent,
            ReportError::Ledger(inner) => inner.into(),
            ReportError::Render(_) => {
                let code = err.error_code();
                Self::from_app(code, &AppError::from(err))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
            Self::Failure {
                status,
                code,
                message,
            } => (status, Json(json!({ "error": code, "message": message }))).into_response(),
        }
    }
}
