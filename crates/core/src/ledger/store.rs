//! Persistence port for accounting entries.

use africanut_shared::types::{DocumentId, EntryId};
use async_trait::async_trait;
use thiserror::Error;

use super::criteria::EntryFilter;
use super::entry::{AccountingEntry, Company, EntryChanges, NewEntry};

/// Opaque failure reported by a store backend.
///
/// The message is for logs only and is never shown to callers.
#[derive(Debug, Error)]
#[error("store failure: {0}")]
pub struct StoreError(pub String);

impl StoreError {
    /// Wraps any displayable backend error.
    pub fn new(message: impl std::fmt::Display) -> Self {
        Self(message.to_string())
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage backend for entries and the reference data they point at.
///
/// Entries returned by a store carry their company, creator and document
/// associations.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Looks up a company by its unique slug.
    async fn find_company_by_slug(&self, slug: &str) -> StoreResult<Option<Company>>;

    /// Whether a document with this ID exists.
    async fn document_exists(&self, id: DocumentId) -> StoreResult<bool>;

    /// Entries matching `filter`, ordered by date ascending.
    async fn find_entries(&self, filter: &EntryFilter) -> StoreResult<Vec<AccountingEntry>>;

    /// A single entry by ID.
    async fn find_entry(&self, id: EntryId) -> StoreResult<Option<AccountingEntry>>;

    /// Persists a new entry and links its document, if any.
    async fn insert_entry(&self, entry: NewEntry) -> StoreResult<AccountingEntry>;

    /// Replaces an entry's editable fields. Returns `None` if it does not exist.
    async fn replace_entry(
        &self,
        id: EntryId,
        changes: EntryChanges,
    ) -> StoreResult<Option<AccountingEntry>>;

    /// Deletes an entry. Returns whether a row was removed.
    async fn delete_entry(&self, id: EntryId) -> StoreResult<bool>;
}
