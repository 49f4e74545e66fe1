//! Development data seeder.
//!
//! Inserts the four group companies, a development user, and two sample
//! entries. Every step is skipped when its data is already present, so the
//! seeder can be re-run safely.
//!
//! Usage: cargo run --bin seeder [-- --print-token]

use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use africanut_core::ledger::{
    Company, EntryCriteria, EntryQueryService, EntryStore, EntryType, NewEntry,
};
use africanut_db::{CompanyRepository, CreateCompanyInput, EntryRepository, UserRepository};
use africanut_shared::types::{CompanyId, UserId};
use africanut_shared::{AppConfig, JwtConfig, JwtService};

const DEV_USER_EMAIL: &str = "dev@africanut.local";

/// (slug, name, sector, tagline)
const GROUP_COMPANIES: [(&str, &str, &str, &str); 4] = [
    (
        "africanut-fish-market",
        "AFRICANUT FISH MARKET",
        "Aquaculture",
        "Production piscicole & services",
    ),
    (
        "magaton-provender",
        "MAGATON PROVENDER",
        "Agro-industrie",
        "Aliments & intrants",
    ),
    (
        "nouvelle-academie-numerique-africaine",
        "NOUVELLE ACADEMIE NUMERIQUE AFRICAINE",
        "Education & Numérique",
        "Formation & digital",
    ),
    (
        "africanut-media",
        "AFRICANUT MEDIA",
        "Média & Communication",
        "Contenus du groupe",
    ),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let print_token = std::env::args().any(|arg| arg == "--print-token");

    let config = AppConfig::load().context("Failed to load configuration")?;

    println!("Connecting to database...");
    let db = africanut_db::connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    println!("Seeding group companies...");
    let companies = CompanyRepository::new(db.clone());
    seed_companies(&companies).await?;

    println!("Seeding development user...");
    let user_id = seed_dev_user(&UserRepository::new(db.clone())).await?;

    println!("Seeding sample entries...");
    let fish_market = companies
        .find_by_slug(GROUP_COMPANIES[0].0)
        .await?
        .map(Company::from)
        .context("Fish market company is missing")?;
    seed_sample_entries(Arc::new(EntryRepository::new(db)), fish_market.id, user_id).await?;

    if print_token {
        let jwt_service = JwtService::new(JwtConfig {
            secret: config.jwt.secret,
            access_token_expires_minutes: config.jwt.access_token_expires_minutes,
        });
        let token = jwt_service.generate_access_token(user_id.into_inner(), "admin")?;
        println!("Development token for {DEV_USER_EMAIL}:\n{token}");
    }

    println!("Seeding complete!");
    Ok(())
}

/// Inserts the group companies when the table is empty.
async fn seed_companies(repo: &CompanyRepository) -> anyhow::Result<()> {
    if repo.count().await? > 0 {
        println!("  Companies already present, skipping...");
        return Ok(());
    }

    for (slug, name, sector, tagline) in GROUP_COMPANIES {
        repo.create(CreateCompanyInput {
            slug: slug.to_string(),
            name: name.to_string(),
            sector: Some(sector.to_string()),
            tagline: Some(tagline.to_string()),
        })
        .await?;
        println!("  Created company: {name}");
    }

    for company in repo.list().await? {
        println!("  {} ({})", company.name, company.slug);
    }
    Ok(())
}

async fn seed_dev_user(repo: &UserRepository) -> anyhow::Result<UserId> {
    if let Some(user) = repo.find_by_email(DEV_USER_EMAIL).await? {
        println!("  Development user already exists, skipping...");
        return Ok(UserId::from_uuid(user.id));
    }

    let user = repo.create(DEV_USER_EMAIL, "Développeur", "admin").await?;
    println!("  Created user: {DEV_USER_EMAIL}");
    Ok(UserId::from_uuid(user.id))
}

/// One sale cashed at the bank and one feed purchase paid from it.
async fn seed_sample_entries(
    store: Arc<EntryRepository>,
    company_id: CompanyId,
    created_by_id: UserId,
) -> anyhow::Result<()> {
    let existing = EntryQueryService::new(store.clone())
        .find(&EntryCriteria {
            company_slug: Some(GROUP_COMPANIES[0].0.to_string()),
            ..EntryCriteria::default()
        })
        .await?;
    if !existing.is_empty() {
        println!("  Entries already present, skipping...");
        return Ok(());
    }

    let samples = [
        (
            EntryType::Product,
            1000,
            "Vente de poisson frais",
            "512000",
            "701000",
            NaiveDate::from_ymd_opt(2024, 1, 10),
        ),
        (
            EntryType::Expense,
            400,
            "Achat d'aliments",
            "601000",
            "512000",
            NaiveDate::from_ymd_opt(2024, 1, 15),
        ),
    ];

    for (entry_type, amount, label, debit, credit, date) in samples {
        let date = date.context("Invalid sample date")?;
        store
            .insert_entry(NewEntry {
                entry_type,
                amount: Decimal::from(amount),
                label: Some(label.to_string()),
                debit_account: Some(debit.to_string()),
                credit_account: Some(credit.to_string()),
                company_id,
                date,
                journal_code: None,
                reference: None,
                document_type: None,
                document_number: None,
                document_date: None,
                document_id: None,
                created_by_id,
            })
            .await?;
        println!("  Created entry: {label} ({amount} XAF)");
    }
    Ok(())
}
