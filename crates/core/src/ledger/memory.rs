//! In-memory `EntryStore` for tests and local runs without a database.

use std::collections::{BTreeMap, HashMap};

use africanut_shared::types::{CompanyId, DocumentId, EntryId, UserId};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::criteria::EntryFilter;
use super::entry::{
    AccountingEntry, Company, DocumentRef, EntryChanges, NewEntry, UserSummary,
};
use super::store::{EntryStore, StoreResult};

#[derive(Debug)]
struct StoredDocument {
    document: DocumentRef,
    entry_id: Option<EntryId>,
}

#[derive(Debug, Default)]
struct Tables {
    companies: HashMap<CompanyId, Company>,
    users: HashMap<UserId, UserSummary>,
    documents: BTreeMap<DocumentId, StoredDocument>,
    entries: HashMap<EntryId, AccountingEntry>,
}

impl Tables {
    /// Attaches company, creator and documents to a bare entry.
    fn hydrate(&self, entry: &AccountingEntry) -> AccountingEntry {
        let mut entry = entry.clone();
        entry.company = self.companies.get(&entry.company_id).map(Company::summary);
        entry.created_by = self.users.get(&entry.created_by_id).cloned();
        entry.documents = self
            .documents
            .values()
            .filter(|stored| stored.entry_id == Some(entry.id))
            .map(|stored| stored.document.clone())
            .collect();
        entry
    }

    fn link_document(&mut self, entry_id: EntryId, document_id: Option<DocumentId>) {
        for stored in self.documents.values_mut() {
            if stored.entry_id == Some(entry_id) {
                stored.entry_id = None;
            }
        }
        if let Some(stored) = document_id.and_then(|id| self.documents.get_mut(&id)) {
            stored.entry_id = Some(entry_id);
        }
    }
}

/// Entry store backed by process memory.
#[derive(Debug, Default)]
pub struct InMemoryEntryStore {
    tables: RwLock<Tables>,
}

impl InMemoryEntryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a company and returns it.
    pub async fn add_company(&self, slug: &str, name: &str) -> Company {
        let company = Company {
            id: CompanyId::new(),
            slug: slug.to_string(),
            name: name.to_string(),
            sector: None,
            tagline: None,
        };
        self.tables
            .write()
            .await
            .companies
            .insert(company.id, company.clone());
        company
    }

    /// Registers a user and returns their ID.
    pub async fn add_user(&self, name: &str, email: &str) -> UserId {
        let user = UserSummary {
            id: UserId::new(),
            name: Some(name.to_string()),
            email: email.to_string(),
        };
        let id = user.id;
        self.tables.write().await.users.insert(id, user);
        id
    }

    /// Registers an unlinked document and returns its ID.
    pub async fn add_document(&self, label: &str) -> DocumentId {
        let document = DocumentRef {
            id: DocumentId::new(),
            label: Some(label.to_string()),
            path: None,
            mime_type: None,
        };
        let id = document.id;
        self.tables.write().await.documents.insert(
            id,
            StoredDocument {
                document,
                entry_id: None,
            },
        );
        id
    }

    /// Number of stored entries.
    pub async fn entry_count(&self) -> usize {
        self.tables.read().await.entries.len()
    }
}

#[async_trait]
impl EntryStore for InMemoryEntryStore {
    async fn find_company_by_slug(&self, slug: &str) -> StoreResult<Option<Company>> {
        let tables = self.tables.read().await;
        Ok(tables.companies.values().find(|c| c.slug == slug).cloned())
    }

    async fn document_exists(&self, id: DocumentId) -> StoreResult<bool> {
        Ok(self.tables.read().await.documents.contains_key(&id))
    }

    async fn find_entries(&self, filter: &EntryFilter) -> StoreResult<Vec<AccountingEntry>> {
        let tables = self.tables.read().await;
        let selected = filter.apply(tables.entries.values().cloned());
        Ok(selected.iter().map(|e| tables.hydrate(e)).collect())
    }

    async fn find_entry(&self, id: EntryId) -> StoreResult<Option<AccountingEntry>> {
        let tables = self.tables.read().await;
        Ok(tables.entries.get(&id).map(|e| tables.hydrate(e)))
    }

    async fn insert_entry(&self, new: NewEntry) -> StoreResult<AccountingEntry> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let entry = AccountingEntry {
            id: EntryId::new(),
            entry_type: new.entry_type,
            amount: new.amount,
            label: new.label,
            debit_account: new.debit_account,
            credit_account: new.credit_account,
            company_id: new.company_id,
            company: None,
            date: new.date,
            journal_code: new.journal_code,
            reference: new.reference,
            document_type: new.document_type,
            document_number: new.document_number,
            document_date: new.document_date,
            documents: Vec::new(),
            created_by_id: new.created_by_id,
            created_by: None,
            created_at: now,
            updated_at: now,
        };
        tables.entries.insert(entry.id, entry.clone());
        if new.document_id.is_some() {
            tables.link_document(entry.id, new.document_id);
        }
        Ok(tables.hydrate(&entry))
    }

    async fn replace_entry(
        &self,
        id: EntryId,
        changes: EntryChanges,
    ) -> StoreResult<Option<AccountingEntry>> {
        let mut tables = self.tables.write().await;
        let Some(entry) = tables.entries.get_mut(&id) else {
            return Ok(None);
        };

        entry.entry_type = changes.entry_type;
        entry.amount = changes.amount;
        entry.label = changes.label;
        entry.debit_account = changes.debit_account;
        entry.credit_account = changes.credit_account;
        entry.company_id = changes.company_id;
        if let Some(date) = changes.date {
            entry.date = date;
        }
        entry.journal_code = changes.journal_code;
        entry.reference = changes.reference;
        entry.document_type = changes.document_type;
        entry.document_number = changes.document_number;
        entry.document_date = changes.document_date;
        entry.updated_at = Utc::now();
        let updated = entry.clone();

        tables.link_document(id, changes.document_id);
        Ok(Some(tables.hydrate(&updated)))
    }

    async fn delete_entry(&self, id: EntryId) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let removed = tables.entries.remove(&id).is_some();
        if removed {
            tables.link_document(id, None);
        }
        Ok(removed)
    }
}
