//! Read side: resolving criteria and listing entries.

use std::sync::Arc;

use tracing::debug;

use super::criteria::{EntryCriteria, EntryFilter};
use super::entry::AccountingEntry;
use super::error::LedgerError;
use super::store::EntryStore;

/// Lists entries matching caller criteria.
#[derive(Clone)]
pub struct EntryQueryService {
    store: Arc<dyn EntryStore>,
}

impl EntryQueryService {
    /// Creates a new query service.
    #[must_use]
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self { store }
    }

    /// Turns criteria into a store filter.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCompany` when a non-blank slug does not resolve.
    pub async fn resolve(&self, criteria: &EntryCriteria) -> Result<EntryFilter, LedgerError> {
        let company_id = match criteria.company_slug() {
            None => None,
            Some(slug) => {
                let company = self
                    .store
                    .find_company_by_slug(slug)
                    .await?
                    .ok_or_else(|| LedgerError::InvalidCompany(slug.to_string()))?;
                Some(company.id)
            }
        };
        Ok(EntryFilter::from_criteria(criteria, company_id))
    }

    /// Entries matching `criteria`, oldest first.
    pub async fn find(&self, criteria: &EntryCriteria) -> Result<Vec<AccountingEntry>, LedgerError> {
        let filter = self.resolve(criteria).await?;
        let entries = self.store.find_entries(&filter).await?;
        debug!(
            company_slug = ?criteria.company_slug(),
            start_date = ?filter.start_date,
            end_date = ?filter.end_date,
            account_class = ?filter.account_class,
            count = entries.len(),
            "Listed accounting entries"
        );
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::memory::InMemoryEntryStore;
    use crate::ledger::test_support::seed_scenario;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_unknown_company_is_an_error() {
        let store = Arc::new(InMemoryEntryStore::new());
        let service = EntryQueryService::new(store);

        let criteria = EntryCriteria {
            company_slug: Some("does-not-exist".into()),
            ..Default::default()
        };
        let result = service.find(&criteria).await;

        assert!(matches!(result, Err(LedgerError::InvalidCompany(slug)) if slug == "does-not-exist"));
    }

    #[tokio::test]
    async fn test_date_window_selects_first_entry_only() {
        let store = Arc::new(InMemoryEntryStore::new());
        let seeded = seed_scenario(&store).await;
        let service = EntryQueryService::new(store);

        let criteria = EntryCriteria {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 12),
            ..Default::default()
        };
        let entries = service.find(&criteria).await.unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, seeded.sale.id);
    }

    #[tokio::test]
    async fn test_company_and_class_filters() {
        let store = Arc::new(InMemoryEntryStore::new());
        let seeded = seed_scenario(&store).await;
        store.add_company("africanut-media", "AFRICANUT MEDIA").await;
        let service = EntryQueryService::new(store);

        let all = service
            .find(&EntryCriteria {
                company_slug: Some(seeded.company.slug.clone()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].date <= all[1].date);

        let other = service
            .find(&EntryCriteria {
                company_slug: Some("africanut-media".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(other.is_empty());

        let expenses = service
            .find(&EntryCriteria {
                account_class: Some("6".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].id, seeded.purchase.id);
    }
}
