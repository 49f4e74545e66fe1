//! Builders shared by ledger and report tests.

use africanut_shared::types::{CompanyId, EntryId, UserId};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::entry::{AccountingEntry, Company, EntryType, NewEntry};
use super::memory::InMemoryEntryStore;
use super::store::EntryStore;

/// Bare entry with no accounts or associations.
pub(crate) fn entry(
    company_id: CompanyId,
    entry_type: EntryType,
    amount: Decimal,
    date: NaiveDate,
) -> AccountingEntry {
    let now = Utc::now();
    AccountingEntry {
        id: EntryId::new(),
        entry_type,
        amount,
        label: None,
        debit_account: None,
        credit_account: None,
        company_id,
        company: None,
        date,
        journal_code: None,
        reference: None,
        document_type: None,
        document_number: None,
        document_date: None,
        documents: Vec::new(),
        created_by_id: UserId::new(),
        created_by: None,
        created_at: now,
        updated_at: now,
    }
}

/// Entry posting `amount` from `debit` to `credit`.
pub(crate) fn posting(
    entry_type: EntryType,
    amount: Decimal,
    debit: Option<&str>,
    credit: Option<&str>,
) -> AccountingEntry {
    let mut e = entry(
        CompanyId::new(),
        entry_type,
        amount,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
    );
    e.debit_account = debit.map(str::to_string);
    e.credit_account = credit.map(str::to_string);
    e
}

pub(crate) struct Scenario {
    pub company: Company,
    pub sale: AccountingEntry,
    pub purchase: AccountingEntry,
}

/// One company with a 1000 sale on 2024-01-10 and a 400 purchase on 2024-01-15.
pub(crate) async fn seed_scenario(store: &InMemoryEntryStore) -> Scenario {
    let company = store
        .add_company("africanut-fish-market", "AFRICANUT FISH MARKET")
        .await;
    let user = store.add_user("Awa", "awa@africanut.test").await;

    let new = |entry_type, amount, debit: &str, credit: &str, day| NewEntry {
        entry_type,
        amount,
        label: None,
        debit_account: Some(debit.to_string()),
        credit_account: Some(credit.to_string()),
        company_id: company.id,
        date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap_or_default(),
        journal_code: None,
        reference: None,
        document_type: None,
        document_number: None,
        document_date: None,
        document_id: None,
        created_by_id: user,
    };

    let sale = store
        .insert_entry(new(EntryType::Product, dec!(1000), "512000", "701000", 10))
        .await
        .unwrap();
    let purchase = store
        .insert_entry(new(EntryType::Expense, dec!(400), "601000", "512000", 15))
        .await
        .unwrap();

    Scenario {
        company,
        sale,
        purchase,
    }
}
