//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "E-learning Catalog API",
        version = "0.1.0",
        description = "REST API for courses, lessons, and enrollments backed by MongoDB",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    nest(
        (path = "/api", api = domain_catalog::ApiDoc)
    ),
    tags(
        (name = "Catalog", description = "Course catalog, lessons, and enrollments (MongoDB)")
    )
)]
pub struct ApiDoc;
