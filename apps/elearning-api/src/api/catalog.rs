//! Catalog API routes
//!
//! This module wires up the catalog domain to HTTP routes.

use axum::Router;
use domain_catalog::{CatalogService, MongoCatalogRepository, handlers};

use crate::state::AppState;

/// Create the catalog router
pub fn router(state: &AppState) -> Router {
    // Create the MongoDB repository; without a usable store every data
    // operation reports a database error while the process keeps serving
    let repository = match state.db.clone() {
        Some(db) => MongoCatalogRepository::new(db),
        None => MongoCatalogRepository::unavailable(),
    };

    // Create the service
    let service = CatalogService::new(repository);

    // Return the domain's router
    handlers::router(service)
}
