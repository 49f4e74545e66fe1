//! SeaORM-backed `EntryStore`.
//!
//! Entries are read with their company, creator and documents batch-loaded
//! in three extra queries. Writes that touch document links run in one
//! transaction.

use std::collections::HashMap;

use africanut_core::ledger::{
    AccountingEntry, Company, CompanySummary, DocumentRef, EntryChanges, EntryFilter, EntryStore,
    NewEntry, StoreError, StoreResult, UserSummary,
};
use africanut_shared::types::{DocumentId, EntryId};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, error};
use uuid::Uuid;

use crate::entities::{accounting_entries, companies, documents, users};

/// Escapes LIKE wildcards so `prefix` matches literally.
fn escape_like(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len());
    for c in prefix.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// LIKE pattern matching values that start with `prefix`.
fn literal_prefix(prefix: &str) -> LikeExpr {
    LikeExpr::new(format!("{}%", escape_like(prefix))).escape('\\')
}

fn store_error(err: DbErr) -> StoreError {
    error!(error = %err, "Accounting store query failed");
    StoreError::new(err)
}

/// Accounting entry repository.
#[derive(Debug, Clone)]
pub struct EntryRepository {
    db: DatabaseConnection,
}

impl EntryRepository {
    /// Creates a new entry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the WHERE clause for a filter.
    fn condition(filter: &EntryFilter) -> Condition {
        let mut cond = Condition::all();
        if let Some(company_id) = filter.company_id {
            cond = cond.add(accounting_entries::Column::CompanyId.eq(company_id.into_inner()));
        }
        if let Some(start) = filter.start_date {
            cond = cond.add(accounting_entries::Column::Date.gte(start));
        }
        if let Some(end) = filter.end_date {
            cond = cond.add(accounting_entries::Column::Date.lte(end));
        }
        if let Some(prefix) = filter.account_class.as_deref() {
            cond = cond.add(
                Condition::any()
                    .add(accounting_entries::Column::DebitAccount.like(literal_prefix(prefix)))
                    .add(accounting_entries::Column::CreditAccount.like(literal_prefix(prefix))),
            );
        }
        cond
    }

    /// Attaches company, creator and documents to entry rows.
    async fn hydrate(
        &self,
        rows: Vec<accounting_entries::Model>,
    ) -> Result<Vec<AccountingEntry>, DbErr> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let company_ids: Vec<Uuid> = rows.iter().map(|r| r.company_id).collect();
        let user_ids: Vec<Uuid> = rows.iter().map(|r| r.created_by_id).collect();
        let entry_ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

        let company_by_id: HashMap<Uuid, companies::Model> = companies::Entity::find()
            .filter(companies::Column::Id.is_in(company_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let user_by_id: HashMap<Uuid, users::Model> = users::Entity::find()
            .filter(users::Column::Id.is_in(user_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let mut docs_by_entry: HashMap<Uuid, Vec<DocumentRef>> = HashMap::new();
        for doc in documents::Entity::find()
            .filter(documents::Column::AccountingEntryId.is_in(entry_ids))
            .order_by_asc(documents::Column::CreatedAt)
            .all(&self.db)
            .await?
        {
            if let Some(entry_id) = doc.accounting_entry_id {
                docs_by_entry.entry(entry_id).or_default().push(DocumentRef {
                    id: doc.id.into(),
                    label: doc.label,
                    path: doc.path,
                    mime_type: doc.mime_type,
                });
            }
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let company = company_by_id.get(&row.company_id).map(|c| CompanySummary {
                    id: c.id.into(),
                    name: c.name.clone(),
                    slug: c.slug.clone(),
                });
                let created_by = user_by_id.get(&row.created_by_id).map(|u| UserSummary {
                    id: u.id.into(),
                    name: u.name.clone(),
                    email: u.email.clone(),
                });
                let docs = docs_by_entry.remove(&row.id).unwrap_or_default();
                to_domain(row, company, created_by, docs)
            })
            .collect())
    }

    async fn find_hydrated(&self, id: Uuid) -> Result<Option<AccountingEntry>, DbErr> {
        let Some(row) = accounting_entries::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(self.hydrate(vec![row]).await?.pop())
    }

    async fn insert(&self, new: NewEntry) -> Result<Uuid, DbErr> {
        let txn = self.db.begin().await?;
        let now = Utc::now().into();
        let id = Uuid::now_v7();

        accounting_entries::ActiveModel {
            id: Set(id),
            entry_type: Set(new.entry_type.into()),
            amount: Set(new.amount),
            label: Set(new.label),
            debit_account: Set(new.debit_account),
            credit_account: Set(new.credit_account),
            company_id: Set(new.company_id.into_inner()),
            date: Set(new.date),
            journal_code: Set(new.journal_code),
            reference: Set(new.reference),
            document_type: Set(new.document_type),
            document_number: Set(new.document_number),
            document_date: Set(new.document_date),
            created_by_id: Set(new.created_by_id.into_inner()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        if let Some(document_id) = new.document_id {
            link_document(&txn, id, document_id).await?;
        }

        txn.commit().await?;
        Ok(id)
    }

    async fn replace(&self, id: Uuid, changes: EntryChanges) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        let Some(existing) = accounting_entries::Entity::find_by_id(id).one(&txn).await? else {
            return Ok(false);
        };

        let mut model = existing.into_active_model();
        model.entry_type = Set(changes.entry_type.into());
        model.amount = Set(changes.amount);
        model.label = Set(changes.label);
        model.debit_account = Set(changes.debit_account);
        model.credit_account = Set(changes.credit_account);
        model.company_id = Set(changes.company_id.into_inner());
        if let Some(date) = changes.date {
            model.date = Set(date);
        }
        model.journal_code = Set(changes.journal_code);
        model.reference = Set(changes.reference);
        model.document_type = Set(changes.document_type);
        model.document_number = Set(changes.document_number);
        model.document_date = Set(changes.document_date);
        model.updated_at = Set(Utc::now().into());
        model.update(&txn).await?;

        documents::Entity::update_many()
            .col_expr(
                documents::Column::AccountingEntryId,
                Expr::value(Option::<Uuid>::None),
            )
            .filter(documents::Column::AccountingEntryId.eq(id))
            .exec(&txn)
            .await?;
        if let Some(document_id) = changes.document_id {
            link_document(&txn, id, document_id).await?;
        }

        txn.commit().await?;
        Ok(true)
    }
}

async fn link_document<C: ConnectionTrait>(
    conn: &C,
    entry_id: Uuid,
    document_id: DocumentId,
) -> Result<(), DbErr> {
    documents::Entity::update_many()
        .col_expr(documents::Column::AccountingEntryId, Expr::value(entry_id))
        .filter(documents::Column::Id.eq(document_id.into_inner()))
        .exec(conn)
        .await?;
    Ok(())
}

fn to_domain(
    row: accounting_entries::Model,
    company: Option<CompanySummary>,
    created_by: Option<UserSummary>,
    linked: Vec<DocumentRef>,
) -> AccountingEntry {
    AccountingEntry {
        id: row.id.into(),
        entry_type: row.entry_type.into(),
        amount: row.amount,
        label: row.label,
        debit_account: row.debit_account,
        credit_account: row.credit_account,
        company_id: row.company_id.into(),
        company,
        date: row.date,
        journal_code: row.journal_code,
        reference: row.reference,
        document_type: row.document_type,
        document_number: row.document_number,
        document_date: row.document_date,
        documents: linked,
        created_by_id: row.created_by_id.into(),
        created_by,
        created_at: row.created_at.with_timezone(&Utc),
        updated_at: row.updated_at.with_timezone(&Utc),
    }
}

#[async_trait]
impl EntryStore for EntryRepository {
    async fn find_company_by_slug(&self, slug: &str) -> StoreResult<Option<Company>> {
        companies::Entity::find()
            .filter(companies::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map(|found| found.map(Company::from))
            .map_err(store_error)
    }

    async fn document_exists(&self, id: DocumentId) -> StoreResult<bool> {
        let count = documents::Entity::find_by_id(id.into_inner())
            .count(&self.db)
            .await
            .map_err(store_error)?;
        Ok(count > 0)
    }

    async fn find_entries(&self, filter: &EntryFilter) -> StoreResult<Vec<AccountingEntry>> {
        let rows = accounting_entries::Entity::find()
            .filter(Self::condition(filter))
            .order_by_asc(accounting_entries::Column::Date)
            .order_by_asc(accounting_entries::Column::CreatedAt)
            .order_by_asc(accounting_entries::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_error)?;
        debug!(rows = rows.len(), "Loaded accounting entries");
        self.hydrate(rows).await.map_err(store_error)
    }

    async fn find_entry(&self, id: EntryId) -> StoreResult<Option<AccountingEntry>> {
        self.find_hydrated(id.into_inner()).await.map_err(store_error)
    }

    async fn insert_entry(&self, entry: NewEntry) -> StoreResult<AccountingEntry> {
        let id = self.insert(entry).await.map_err(store_error)?;
        self.find_hydrated(id)
            .await
            .map_err(store_error)?
            .ok_or_else(|| StoreError::new(format!("entry {id} missing after insert")))
    }

    async fn replace_entry(
        &self,
        id: EntryId,
        changes: EntryChanges,
    ) -> StoreResult<Option<AccountingEntry>> {
        if !self.replace(id.into_inner(), changes).await.map_err(store_error)? {
            return Ok(None);
        }
        self.find_entry(id).await
    }

    async fn delete_entry(&self, id: EntryId) -> StoreResult<bool> {
        let result = accounting_entries::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(store_error)?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("6"), "6");
        assert_eq!(escape_like("%"), "\\%");
        assert_eq!(escape_like("4_1"), "4\\_1");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_account_class_condition_declares_escape() {
        let filter = EntryFilter {
            account_class: Some("%".to_string()),
            ..Default::default()
        };
        let sql = accounting_entries::Entity::find()
            .filter(EntryRepository::condition(&filter))
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains("ESCAPE"), "{sql}");
        assert!(!sql.contains("LIKE '%%'"), "{sql}");
    }
}
