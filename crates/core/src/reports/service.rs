//! Report generation service.

use std::sync::Arc;

use tracing::debug;

use super::balance_sheet::{
    BalanceSheetOptions, BalanceSheetReport, build_balance_sheet_report, compute_balance_sheet,
};
use super::error::ReportError;
use super::export::{JournalExport, ReportPeriod, build_journal};
use super::pnl::{PnlReport, build_pnl};
use crate::ledger::{EntryCriteria, EntryQueryService, EntryStore};

/// Builds journal, P&L and balance sheet reports from filtered entries.
///
/// Strictly read-only over the store.
#[derive(Clone)]
pub struct ReportService {
    query: EntryQueryService,
    balance_options: BalanceSheetOptions,
}

impl ReportService {
    /// Creates a new report service.
    #[must_use]
    pub fn new(store: Arc<dyn EntryStore>, balance_options: BalanceSheetOptions) -> Self {
        Self {
            query: EntryQueryService::new(store),
            balance_options,
        }
    }

    /// Journal rows for the criteria.
    ///
    /// # Errors
    ///
    /// `NoDataFound` when nothing matches.
    pub async fn journal(&self, criteria: &EntryCriteria) -> Result<JournalExport, ReportError> {
        let entries = self.query.find(criteria).await?;
        build_journal(&entries, period_of(criteria))
    }

    /// Profit and loss for the criteria. No entries gives zero totals.
    pub async fn profit_and_loss(&self, criteria: &EntryCriteria) -> Result<PnlReport, ReportError> {
        let entries = self.query.find(criteria).await?;
        let report = build_pnl(&entries, period_of(criteria).label());
        debug!(
            entries = entries.len(),
            net_result = %report.totals.net_result,
            "Computed profit and loss"
        );
        Ok(report)
    }

    /// Balance sheet for the criteria. The account-class criterion is ignored.
    ///
    /// # Errors
    ///
    /// `NoDataFound` when nothing matches.
    pub async fn balance_sheet(
        &self,
        criteria: &EntryCriteria,
    ) -> Result<BalanceSheetReport, ReportError> {
        let criteria = criteria.without_account_class();
        let entries = self.query.find(&criteria).await?;
        let sheet = compute_balance_sheet(&entries, self.balance_options)?;
        debug!(
            entries = entries.len(),
            is_balanced = sheet.is_balanced,
            total_assets = %sheet.total_assets,
            "Computed balance sheet"
        );
        Ok(build_balance_sheet_report(sheet, period_of(&criteria).label()))
    }
}

fn period_of(criteria: &EntryCriteria) -> ReportPeriod {
    ReportPeriod {
        start: criteria.start_date,
        end: criteria.end_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::test_support::seed_scenario;
    use crate::ledger::{InMemoryEntryStore, LedgerError};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    async fn service_with_scenario() -> ReportService {
        let store = Arc::new(InMemoryEntryStore::new());
        seed_scenario(&store).await;
        ReportService::new(store, BalanceSheetOptions::default())
    }

    #[tokio::test]
    async fn test_journal_for_scenario() {
        let service = service_with_scenario().await;

        let journal = service.journal(&EntryCriteria::default()).await.unwrap();

        assert_eq!(journal.rows.len(), 2);
        assert_eq!(journal.rows[0].date, "10/01/2024");
        assert_eq!(journal.rows[0].company, "AFRICANUT FISH MARKET");
        assert_eq!(journal.grand_total, dec!(1400));
    }

    #[tokio::test]
    async fn test_journal_without_matches_is_no_data() {
        let service = service_with_scenario().await;
        let criteria = EntryCriteria {
            account_class: Some("2".into()),
            ..Default::default()
        };

        assert!(matches!(
            service.journal(&criteria).await,
            Err(ReportError::NoDataFound)
        ));
    }

    #[tokio::test]
    async fn test_pnl_for_scenario() {
        let service = service_with_scenario().await;

        let report = service.profit_and_loss(&EntryCriteria::default()).await.unwrap();

        assert_eq!(report.totals.total_revenue, dec!(1000));
        assert_eq!(report.totals.total_expense, dec!(400));
        assert_eq!(report.totals.net_result, dec!(600));
        assert_eq!(report.totals.margin_pct, dec!(60));
    }

    #[tokio::test]
    async fn test_pnl_on_empty_store_is_zero() {
        let service = ReportService::new(
            Arc::new(InMemoryEntryStore::new()),
            BalanceSheetOptions::default(),
        );

        let report = service.profit_and_loss(&EntryCriteria::default()).await.unwrap();

        assert_eq!(report.totals.net_result, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_balance_sheet_ignores_account_class() {
        let service = service_with_scenario().await;
        let criteria = EntryCriteria {
            account_class: Some("6".into()),
            ..Default::default()
        };

        let report = service.balance_sheet(&criteria).await.unwrap();

        assert_eq!(report.sheet.per_class_balance.len(), 3);
        assert_eq!(report.sheet.total_assets, dec!(600));
        assert!(report.sheet.is_balanced);
    }

    #[tokio::test]
    async fn test_reports_reject_unknown_company() {
        let service = service_with_scenario().await;
        let criteria = EntryCriteria {
            company_slug: Some("does-not-exist".into()),
            ..Default::default()
        };

        assert!(matches!(
            service.balance_sheet(&criteria).await,
            Err(ReportError::Ledger(LedgerError::InvalidCompany(_)))
        ));
    }
}
