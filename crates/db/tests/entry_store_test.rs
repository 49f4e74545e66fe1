//! Integration tests for the Postgres entry store.
//!
//! Run against `DATABASE_URL`. Skipped when it is not set.

use africanut_core::ledger::{
    EntryChanges, EntryCriteria, EntryFilter, EntryQueryService, EntryStore, EntryType, NewEntry,
};
use africanut_db::entities::documents;
use africanut_db::migration::{Migrator, MigratorTrait};
use africanut_db::{CompanyRepository, CreateCompanyInput, EntryRepository, UserRepository};
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use std::sync::Arc;
use tokio::sync::OnceCell;
use uuid::Uuid;

static MIGRATED: OnceCell<()> = OnceCell::const_new();

async fn connect() -> Option<DatabaseConnection> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let db = Database::connect(&url)
        .await
        .expect("Failed to connect to database");
    MIGRATED
        .get_or_init(|| async {
            Migrator::up(&db, None).await.expect("Failed to run migrations");
        })
        .await;
    Some(db)
}

struct Fixture {
    repo: EntryRepository,
    company_id: Uuid,
    company_slug: String,
    user_id: Uuid,
}

async fn fixture(db: &DatabaseConnection) -> Fixture {
    let slug = format!("test-company-{}", Uuid::new_v4());
    let company = CompanyRepository::new(db.clone())
        .create(CreateCompanyInput {
            slug: slug.clone(),
            name: "Test Company".to_string(),
            sector: None,
            tagline: None,
        })
        .await
        .expect("Failed to create company");
    let user = UserRepository::new(db.clone())
        .create(&format!("test-{}@example.com", Uuid::new_v4()), "Test User", "user")
        .await
        .expect("Failed to create user");

    Fixture {
        repo: EntryRepository::new(db.clone()),
        company_id: company.id,
        company_slug: slug,
        user_id: user.id,
    }
}

async fn create_document(db: &DatabaseConnection, company_id: Uuid) -> Uuid {
    let id = Uuid::now_v7();
    documents::ActiveModel {
        id: Set(id),
        company_id: Set(company_id),
        label: Set(Some("Facture".to_string())),
        path: Set(None),
        mime_type: Set(Some("application/pdf".to_string())),
        accounting_entry_id: Set(None),
        created_at: Set(chrono::Utc::now().into()),
    }
    .insert(db)
    .await
    .expect("Failed to create document");
    id
}

fn new_entry(f: &Fixture, entry_type: EntryType, amount: rust_decimal::Decimal, debit: &str, credit: &str, day: u32) -> NewEntry {
    NewEntry {
        entry_type,
        amount,
        label: None,
        debit_account: Some(debit.to_string()),
        credit_account: Some(credit.to_string()),
        company_id: f.company_id.into(),
        date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        journal_code: None,
        reference: None,
        document_type: None,
        document_number: None,
        document_date: None,
        document_id: None,
        created_by_id: f.user_id.into(),
    }
}

#[tokio::test]
async fn test_filter_by_company_date_and_class() {
    let Some(db) = connect().await else { return };
    let f = fixture(&db).await;

    let sale = f
        .repo
        .insert_entry(new_entry(&f, EntryType::Product, dec!(1000), "512000", "701000", 10))
        .await
        .unwrap();
    let purchase = f
        .repo
        .insert_entry(new_entry(&f, EntryType::Expense, dec!(400), "601000", "512000", 15))
        .await
        .unwrap();

    assert_eq!(sale.company.as_ref().map(|c| c.slug.as_str()), Some(f.company_slug.as_str()));
    assert!(sale.created_by.is_some());

    let query = EntryQueryService::new(Arc::new(f.repo.clone()));
    let window = query
        .find(&EntryCriteria {
            company_slug: Some(f.company_slug.clone()),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 12),
            account_class: None,
        })
        .await
        .unwrap();
    assert_eq!(window.len(), 1);
    assert_eq!(window[0].id, sale.id);

    let expenses = f
        .repo
        .find_entries(&EntryFilter {
            company_id: Some(f.company_id.into()),
            account_class: Some("6".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].id, purchase.id);

    let all = f
        .repo
        .find_entries(&EntryFilter {
            company_id: Some(f.company_id.into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(all.iter().map(|e| e.id).collect::<Vec<_>>(), vec![sale.id, purchase.id]);
}

#[tokio::test]
async fn test_replace_clears_document_link() {
    let Some(db) = connect().await else { return };
    let f = fixture(&db).await;
    let document_id = create_document(&db, f.company_id).await;

    let mut input = new_entry(&f, EntryType::Product, dec!(250), "571000", "701000", 5);
    input.document_id = Some(document_id.into());
    input.reference = Some("REF-1".to_string());
    let created = f.repo.insert_entry(input).await.unwrap();
    assert_eq!(created.first_document_id(), Some(document_id.into()));

    let changes = EntryChanges {
        entry_type: EntryType::Expense,
        amount: dec!(90),
        label: None,
        debit_account: Some("605000".to_string()),
        credit_account: Some("571000".to_string()),
        company_id: f.company_id.into(),
        date: None,
        journal_code: None,
        reference: None,
        document_type: None,
        document_number: None,
        document_date: None,
        document_id: None,
    };
    let updated = f.repo.replace_entry(created.id, changes).await.unwrap().unwrap();

    assert_eq!(updated.amount, dec!(90));
    assert_eq!(updated.reference, None);
    assert_eq!(updated.date, created.date);
    assert!(updated.documents.is_empty());
    assert!(f.repo.document_exists(document_id.into()).await.unwrap());
}

#[tokio::test]
async fn test_delete_entry() {
    let Some(db) = connect().await else { return };
    let f = fixture(&db).await;
    let created = f
        .repo
        .insert_entry(new_entry(&f, EntryType::Product, dec!(10), "512000", "701000", 2))
        .await
        .unwrap();

    assert!(f.repo.delete_entry(created.id).await.unwrap());
    assert!(!f.repo.delete_entry(created.id).await.unwrap());
    assert!(f.repo.find_entry(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_unknown_slug_resolves_to_none() {
    let Some(db) = connect().await else { return };
    let repo = EntryRepository::new(db);

    let found = repo
        .find_company_by_slug(&format!("missing-{}", Uuid::new_v4()))
        .await
        .unwrap();

    assert!(found.is_none());
}

#[tokio::test]
async fn test_account_class_wildcards_match_literally() {
    let Some(db) = connect().await else { return };
    let f = fixture(&db).await;
    let sale = f
        .repo
        .insert_entry(new_entry(&f, EntryType::Product, dec!(75), "512000", "701000", 8))
        .await
        .unwrap();

    let by_class = |class: &str| EntryFilter {
        company_id: Some(f.company_id.into()),
        account_class: Some(class.to_string()),
        ..Default::default()
    };

    for wildcard in ["%", "_", "5_", "\\"] {
        let found = f.repo.find_entries(&by_class(wildcard)).await.unwrap();
        assert!(found.is_empty(), "{wildcard} matched {} entries", found.len());
    }
    let found = f.repo.find_entries(&by_class("51")).await.unwrap();
    assert_eq!(found.iter().map(|e| e.id).collect::<Vec<_>>(), vec![sale.id]);
}

#[tokio::test]
async fn test_list_includes_created_company() {
    let Some(db) = connect().await else { return };
    let f = fixture(&db).await;

    let listed = CompanyRepository::new(db).list().await.unwrap();

    assert!(listed.iter().any(|c| c.slug == f.company_slug));
}
