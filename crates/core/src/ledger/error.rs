//! Ledger error types.

use africanut_shared::AppError;
use africanut_shared::types::{DocumentId, EntryId};
use thiserror::Error;

use super::store::StoreError;

/// Errors that can occur during ledger queries and mutations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Company slug is blank or does not resolve.
    #[error("Entreprise invalide")]
    InvalidCompany(String),

    /// Entry type outside {PRODUCT, EXPENSE}.
    #[error("Type invalide (PRODUCT ou EXPENSE requis)")]
    InvalidType(String),

    /// Amount missing or negative.
    #[error("Montant invalide")]
    InvalidAmount,

    /// Linked document does not exist.
    #[error("Document introuvable: {0}")]
    DocumentNotFound(DocumentId),

    /// Entry does not exist.
    #[error("Élément non trouvé: {0}")]
    EntryNotFound(EntryId),

    /// Account-class width other than 1 or 2.
    #[error("class_digits must be 1 or 2, got {0}")]
    InvalidClassDigits(u8),

    /// Underlying store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCompany(_) => "INVALID_COMPANY",
            Self::InvalidType(_) => "INVALID_TYPE",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::DocumentNotFound(_) => "DOCUMENT_NOT_FOUND",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::InvalidClassDigits(_) => "INVALID_CLASS_DIGITS",
            Self::Store(_) => "STORE_FAILURE",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidCompany(_)
            | Self::InvalidType(_)
            | Self::InvalidAmount
            | Self::DocumentNotFound(_) => 400,
            Self::EntryNotFound(_) => 404,
            Self::InvalidClassDigits(_) | Self::Store(_) => 500,
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::EntryNotFound(_) => Self::NotFound(err.to_string()),
            LedgerError::Store(inner) => Self::Database(inner.to_string()),
            LedgerError::InvalidClassDigits(_) => Self::Internal(err.to_string()),
            LedgerError::InvalidCompany(_)
            | LedgerError::InvalidType(_)
            | LedgerError::InvalidAmount
            | LedgerError::DocumentNotFound(_) => Self::Validation(err.to_string()),
        }
    }
}
