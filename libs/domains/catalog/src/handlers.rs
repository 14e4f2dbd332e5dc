use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestIdentifierResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::models::{
    Course, CourseFilter, CreateCourse, CreateEnrollment, CreateLesson, Lesson, ResourceCreated,
    SeedReport,
};
use crate::repository::CatalogRepository;
use crate::service::CatalogService;

/// OpenAPI documentation for the catalog API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_courses,
        create_course,
        create_lesson,
        list_lessons,
        enroll,
        seed,
    ),
    components(
        schemas(
            Course,
            Lesson,
            CreateCourse,
            CreateLesson,
            CreateEnrollment,
            CourseFilter,
            ResourceCreated,
            SeedReport
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdentifierResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Catalog", description = "Course catalog, lessons, and enrollments (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the catalog router with all HTTP endpoints
pub fn router<R: CatalogRepository + 'static>(service: CatalogService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/courses", get(list_courses).post(create_course))
        .route("/courses/{course_id}/lessons", get(list_lessons))
        .route("/lessons", post(create_lesson))
        .route("/enroll", post(enroll))
        .route("/seed", post(seed))
        .with_state(shared_service)
}

/// List courses with optional filters
#[utoipa::path(
    get,
    path = "/courses",
    tag = "Catalog",
    params(CourseFilter),
    responses(
        (status = 200, description = "List of courses", body = Vec<Course>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_courses<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Query(filter): Query<CourseFilter>,
) -> CatalogResult<Json<Vec<Course>>> {
    let courses = service.list_courses(filter).await?;
    Ok(Json(courses))
}

/// Create a new course
#[utoipa::path(
    post,
    path = "/courses",
    tag = "Catalog",
    request_body = CreateCourse,
    responses(
        (status = 201, description = "Course created successfully", body = ResourceCreated),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_course<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateCourse>,
) -> CatalogResult<impl IntoResponse> {
    let id = service.create_course(input).await?;
    Ok((StatusCode::CREATED, Json(ResourceCreated { id })))
}

/// Create a new lesson within an existing course
#[utoipa::path(
    post,
    path = "/lessons",
    tag = "Catalog",
    request_body = CreateLesson,
    responses(
        (status = 201, description = "Lesson created successfully", body = ResourceCreated),
        (status = 400, response = BadRequestIdentifierResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_lesson<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateLesson>,
) -> CatalogResult<impl IntoResponse> {
    let id = service.create_lesson(input).await?;
    Ok((StatusCode::CREATED, Json(ResourceCreated { id })))
}

/// List the lessons of a course
///
/// The course itself is not required to exist; an unknown course yields an
/// empty list rather than a 404.
#[utoipa::path(
    get,
    path = "/courses/{course_id}/lessons",
    tag = "Catalog",
    params(
        ("course_id" = String, Path, description = "Course identifier")
    ),
    responses(
        (status = 200, description = "Lessons of the course", body = Vec<Lesson>),
        (status = 400, response = BadRequestIdentifierResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_lessons<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(course_id): Path<String>,
) -> CatalogResult<Json<Vec<Lesson>>> {
    let lessons = service.list_lessons(&course_id).await?;
    Ok(Json(lessons))
}

/// Enroll a learner in a course
#[utoipa::path(
    post,
    path = "/enroll",
    tag = "Catalog",
    request_body = CreateEnrollment,
    responses(
        (status = 201, description = "Enrollment created successfully", body = ResourceCreated),
        (status = 400, response = BadRequestIdentifierResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn enroll<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateEnrollment>,
) -> CatalogResult<impl IntoResponse> {
    let id = service.enroll(input).await?;
    Ok((StatusCode::CREATED, Json(ResourceCreated { id })))
}

/// Insert the sample courses
#[utoipa::path(
    post,
    path = "/seed",
    tag = "Catalog",
    responses(
        (status = 201, description = "Sample courses inserted", body = SeedReport),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn seed<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
) -> CatalogResult<impl IntoResponse> {
    let inserted = service.seed().await?;
    Ok((StatusCode::CREATED, Json(SeedReport { inserted })))
}
