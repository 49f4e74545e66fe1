//! Write side: create, update and delete entries.

use std::sync::Arc;

use africanut_shared::types::{CompanyId, EntryId, UserId};
use chrono::Utc;
use tracing::info;

use super::entry::{AccountingEntry, EntryChanges, NewEntry};
use super::error::LedgerError;
use super::store::EntryStore;
use super::validation::{EntryPayload, ValidatedPayload, validate_payload};

/// Validates and persists entry changes.
///
/// Every check runs before the single store write, so a rejected request
/// leaves the store untouched.
#[derive(Clone)]
pub struct EntryMutationService {
    store: Arc<dyn EntryStore>,
}

impl EntryMutationService {
    /// Creates a new mutation service.
    #[must_use]
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self { store }
    }

    /// Records a new entry on behalf of `actor`.
    ///
    /// The date defaults to today (UTC) when absent.
    pub async fn create(
        &self,
        actor: UserId,
        payload: EntryPayload,
    ) -> Result<AccountingEntry, LedgerError> {
        let input = validate_payload(payload)?;
        let company_id = self.resolve_references(&input).await?;

        let entry = self
            .store
            .insert_entry(NewEntry {
                entry_type: input.entry_type,
                amount: input.amount,
                label: input.label,
                debit_account: input.debit_account,
                credit_account: input.credit_account,
                company_id,
                date: input.date.unwrap_or_else(|| Utc::now().date_naive()),
                journal_code: input.journal_code,
                reference: input.reference,
                document_type: input.document_type,
                document_number: input.document_number,
                document_date: input.document_date,
                document_id: input.document_id,
                created_by_id: actor,
            })
            .await?;

        info!(entry_id = %entry.id, company_id = %company_id, created_by = %actor, "Accounting entry created");
        Ok(entry)
    }

    /// Replaces every editable field of an entry.
    ///
    /// Absent optional fields are cleared. An absent date keeps the stored
    /// one. An absent document ID removes all document links.
    pub async fn update(
        &self,
        id: EntryId,
        payload: EntryPayload,
    ) -> Result<AccountingEntry, LedgerError> {
        let input = validate_payload(payload)?;
        if self.store.find_entry(id).await?.is_none() {
            return Err(LedgerError::EntryNotFound(id));
        }
        let company_id = self.resolve_references(&input).await?;

        let entry = self
            .store
            .replace_entry(
                id,
                EntryChanges {
                    entry_type: input.entry_type,
                    amount: input.amount,
                    label: input.label,
                    debit_account: input.debit_account,
                    credit_account: input.credit_account,
                    company_id,
                    date: input.date,
                    journal_code: input.journal_code,
                    reference: input.reference,
                    document_type: input.document_type,
                    document_number: input.document_number,
                    document_date: input.document_date,
                    document_id: input.document_id,
                },
            )
            .await?
            .ok_or(LedgerError::EntryNotFound(id))?;

        info!(entry_id = %id, "Accounting entry updated");
        Ok(entry)
    }

    /// Deletes an entry.
    pub async fn remove(&self, id: EntryId) -> Result<(), LedgerError> {
        if !self.store.delete_entry(id).await? {
            return Err(LedgerError::EntryNotFound(id));
        }
        info!(entry_id = %id, "Accounting entry deleted");
        Ok(())
    }

    /// Resolves the company and checks the linked document exists.
    async fn resolve_references(&self, input: &ValidatedPayload) -> Result<CompanyId, LedgerError> {
        let company = self
            .store
            .find_company_by_slug(&input.company_slug)
            .await?
            .ok_or_else(|| LedgerError::InvalidCompany(input.company_slug.clone()))?;

        if let Some(document_id) = input.document_id
            && !self.store.document_exists(document_id).await?
        {
            return Err(LedgerError::DocumentNotFound(document_id));
        }
        Ok(company.id)
    }
}
