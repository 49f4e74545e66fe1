//! Schema migration runner.
//!
//! Usage:
//!   migrator up      - Apply pending migrations
//!   migrator down    - Roll back the last migration
//!   migrator status  - Show applied and pending migrations
//!   migrator fresh   - Drop the ledger schema and re-apply everything
//!
//! Reads `DATABASE_URL` from the environment or a `.env` file.

use africanut_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    cli::run_cli(Migrator).await;
}
