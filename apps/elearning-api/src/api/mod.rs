//! API routes module
//!
//! This module wires the catalog domain and the diagnostics endpoints to
//! HTTP routes.

pub mod catalog;
pub mod diagnostics;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
/// Note: These are nested under /api by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    catalog::router(state)
}
