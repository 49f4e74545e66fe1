//! Africanut API Server
//!
//! Main entry point for the group accounting backend.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use africanut_api::{AppState, create_router};
use africanut_core::reports::BalanceSheetOptions;
use africanut_db::{EntryRepository, connect_with_pool};
use africanut_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "africanut=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let balance_options = BalanceSheetOptions::try_from(&config.ledger)?;
    info!(
        class_digits = config.ledger.class_digits,
        legacy_balance_signs = config.ledger.legacy_balance_signs,
        "Ledger options loaded"
    );

    let db = connect_with_pool(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await?;
    info!("Connected to database");

    let jwt_service = JwtService::new(JwtConfig {
        secret: config.jwt.secret.clone(),
        access_token_expires_minutes: config.jwt.access_token_expires_minutes,
    });

    let state = AppState {
        store: Arc::new(EntryRepository::new(db)),
        jwt_service: Arc::new(jwt_service),
        balance_options,
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
