//! Report error types.

use africanut_shared::AppError;
use thiserror::Error;

use crate::ledger::LedgerError;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The filtered entry set is empty.
    #[error("No data found for the specified criteria")]
    NoDataFound,

    /// Selecting the entries failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Writing the output document failed.
    #[error("Failed to render report: {0}")]
    Render(String),
}

impl ReportError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NoDataFound => "NO_DATA",
            Self::Ledger(inner) => inner.error_code(),
            Self::Render(_) => "RENDER_FAILED",
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Ledger(inner) => inner.into(),
            ReportError::NoDataFound => Self::NotFound(err.to_string()),
            ReportError::Render(msg) => Self::Internal(msg),
        }
    }
}
