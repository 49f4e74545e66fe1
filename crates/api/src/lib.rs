//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for the accounting ledger
//! - Authentication middleware
//! - Error-to-response mapping

pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use africanut_core::ledger::{EntryMutationService, EntryQueryService, EntryStore};
use africanut_core::reports::{BalanceSheetOptions, ReportService};
use africanut_shared::JwtService;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Entry store (Postgres in production, in-memory in tests).
    pub store: Arc<dyn EntryStore>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Balance sheet computation options.
    pub balance_options: BalanceSheetOptions,
}

impl AppState {
    /// Read-side service over the shared store.
    #[must_use]
    pub fn queries(&self) -> EntryQueryService {
        EntryQueryService::new(Arc::clone(&self.store))
    }

    /// Write-side service over the shared store.
    #[must_use]
    pub fn mutations(&self) -> EntryMutationService {
        EntryMutationService::new(Arc::clone(&self.store))
    }

    /// Report service over the shared store.
    #[must_use]
    pub fn reports(&self) -> ReportService {
        ReportService::new(Arc::clone(&self.store), self.balance_options)
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
