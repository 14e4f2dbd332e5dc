//! E-learning Catalog Domain
//!
//! This module provides a complete domain implementation for an e-learning
//! catalog (courses, lessons, enrollments) using MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, referential checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, document mappers
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{CatalogService, MongoCatalogRepository, handlers};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a MongoDB client
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("elearning");
//!
//! // Create a repository and service
//! let repository = MongoCatalogRepository::new(db);
//! let service = CatalogService::new(repository);
//!
//! // Create Axum router
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use handlers::ApiDoc;
pub use models::{
    Course, CourseFilter, CourseId, CreateCourse, CreateEnrollment, CreateLesson, Enrollment,
    Lesson, ResourceCreated, SeedReport,
};
pub use crate::mongodb::MongoCatalogRepository;
pub use repository::CatalogRepository;
pub use service::CatalogService;
