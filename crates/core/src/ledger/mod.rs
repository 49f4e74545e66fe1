//! Accounting ledger.
//!
//! - Entry model and company reference data
//! - Account-class derivation
//! - Selection criteria and filters
//! - The `EntryStore` port and an in-memory implementation
//! - Query and mutation services

pub mod account_class;
pub mod criteria;
pub mod entry;
pub mod error;
pub mod memory;
pub mod mutation;
pub mod query;
pub mod store;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use account_class::ClassDigits;
pub use criteria::{EntryCriteria, EntryFilter};
pub use entry::{
    AccountingEntry, Company, CompanySummary, DEFAULT_JOURNAL_CODE, DocumentRef, EntryChanges,
    EntryType, LEDGER_CURRENCY, NewEntry, UserSummary,
};
pub use error::LedgerError;
pub use memory::InMemoryEntryStore;
pub use mutation::EntryMutationService;
pub use query::EntryQueryService;
pub use store::{EntryStore, StoreError, StoreResult};
pub use validation::{
    AMOUNT_LIMIT, AMOUNT_MAX_SCALE, EntryPayload, ValidatedPayload, validate_payload,
};
