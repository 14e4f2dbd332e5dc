//! Application state management.
//!
//! This module defines the shared application state passed to all request handlers.
//! The state contains:
//! - Configuration
//! - MongoDB client and database (absent in degraded mode)

use mongodb::{Client, Database};

/// Shared application state.
///
/// This struct is cloned for each handler (inexpensive Arc clones). The
/// MongoDB handle is constructed once at startup and shared; it is `None`
/// when the store is unconfigured or was unreachable, in which case data
/// operations fail with a server error while the process keeps serving.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares underlying connection pool)
    pub mongo_client: Option<Client>,
    /// MongoDB database instance
    pub db: Option<Database>,
}
