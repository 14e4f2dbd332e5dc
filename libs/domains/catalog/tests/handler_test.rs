//! Handler tests for the catalog domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes
//! - Error responses
//!
//! They run against an in-memory repository: the store enforces no schema
//! and no foreign keys, so a Vec-backed implementation of the repository
//! trait satisfies the same contract as MongoDB.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_catalog::*;
use http_body_util::BodyExt;
use ::mongodb::bson::{oid::ObjectId, to_document};
use serde_json::json;
use std::sync::Mutex;
use tower::ServiceExt; // For oneshot()

/// Vec-backed repository with the same filter semantics as the MongoDB
/// implementation: exact category match, case-insensitive substring search
/// over title and description, insertion order preserved.
#[derive(Default)]
struct InMemoryCatalogRepository {
    courses: Mutex<Vec<(String, CreateCourse)>>,
    lessons: Mutex<Vec<(String, CreateLesson)>>,
    enrollments: Mutex<Vec<(String, CreateEnrollment)>>,
}

fn course_to_response(id: &str, input: &CreateCourse) -> Course {
    let mut doc = to_document(input).unwrap();
    doc.insert("_id", ObjectId::parse_str(id).unwrap());
    Course::from_document(&doc)
}

fn lesson_to_response(id: &str, input: &CreateLesson) -> Lesson {
    let mut doc = to_document(input).unwrap();
    doc.insert("_id", ObjectId::parse_str(id).unwrap());
    Lesson::from_document(&doc)
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn insert_course(&self, input: CreateCourse) -> CatalogResult<String> {
        let id = ObjectId::new().to_hex();
        self.courses.lock().unwrap().push((id.clone(), input));
        Ok(id)
    }

    async fn list_courses(&self, filter: CourseFilter) -> CatalogResult<Vec<Course>> {
        let courses = self.courses.lock().unwrap();
        Ok(courses
            .iter()
            .map(|(id, input)| course_to_response(id, input))
            .filter(|course| {
                let category_ok = filter
                    .category
                    .as_ref()
                    .is_none_or(|category| &course.category == category);
                let search_ok = filter.search.as_ref().is_none_or(|search| {
                    let needle = search.to_lowercase();
                    course.title.to_lowercase().contains(&needle)
                        || course.description.to_lowercase().contains(&needle)
                });
                category_ok && search_ok
            })
            .collect())
    }

    async fn course_exists(&self, id: &CourseId) -> CatalogResult<bool> {
        let hex = id.to_string();
        Ok(self
            .courses
            .lock()
            .unwrap()
            .iter()
            .any(|(course_id, _)| course_id == &hex))
    }

    async fn insert_lesson(&self, input: CreateLesson) -> CatalogResult<String> {
        let id = ObjectId::new().to_hex();
        self.lessons.lock().unwrap().push((id.clone(), input));
        Ok(id)
    }

    async fn list_lessons(&self, course_id: &CourseId) -> CatalogResult<Vec<Lesson>> {
        let hex = course_id.to_string();
        let lessons = self.lessons.lock().unwrap();
        Ok(lessons
            .iter()
            .filter(|(_, input)| input.course_id == hex)
            .map(|(id, input)| lesson_to_response(id, input))
            .collect())
    }

    async fn insert_enrollment(&self, input: CreateEnrollment) -> CatalogResult<String> {
        let id = ObjectId::new().to_hex();
        self.enrollments.lock().unwrap().push((id.clone(), input));
        Ok(id)
    }
}

fn test_app() -> axum::Router {
    let service = CatalogService::new(InMemoryCatalogRepository::default());
    handlers::router(service)
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, payload: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&payload).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn course_payload() -> serde_json::Value {
    json!({
        "title": "Go Basics",
        "description": "Learn Go in ten lessons with runnable examples.",
        "category": "Programming",
        "author": "A. Dev"
    })
}

#[tokio::test]
async fn test_create_course_returns_id_and_listing_includes_it() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_json("/courses", course_payload()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: ResourceCreated = json_body(response.into_body()).await;
    assert_eq!(created.id.len(), 24);

    let response = app.oneshot(get("/courses")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let courses: Vec<Course> = json_body(response.into_body()).await;
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].id, created.id);
    assert_eq!(courses[0].title, "Go Basics");
    // Defaults applied for omitted optional fields
    assert_eq!(courses[0].level, "Beginner");
    assert!(courses[0].tags.is_empty());
    assert!(!courses[0].is_premium);
    assert!(courses[0].is_free_access);
    assert_eq!(courses[0].thumbnail_url, None);
}

#[tokio::test]
async fn test_create_course_validates_input() {
    let app = test_app();

    let mut payload = course_payload();
    payload["title"] = json!("Go"); // below the 3-char minimum

    let response = app
        .clone()
        .oneshot(post_json("/courses", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Validation short-circuits before any store interaction
    let response = app.oneshot(get("/courses")).await.unwrap();
    let courses: Vec<Course> = json_body(response.into_body()).await;
    assert!(courses.is_empty());
}

#[tokio::test]
async fn test_create_course_rejects_missing_required_field() {
    let app = test_app();

    let response = app
        .oneshot(post_json(
            "/courses",
            json!({ "title": "Go Basics", "category": "Programming", "author": "A. Dev" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_lesson_with_invalid_course_id_is_rejected() {
    let app = test_app();

    let response = app
        .oneshot(post_json(
            "/lessons",
            json!({ "course_id": "not-an-object-id", "title": "Intro" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_lesson_for_unknown_course_is_not_found_and_not_persisted() {
    let app = test_app();
    let unknown = ObjectId::new().to_hex();

    let response = app
        .clone()
        .oneshot(post_json(
            "/lessons",
            json!({ "course_id": unknown, "title": "Intro" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Nothing was written
    let response = app
        .oneshot(get(&format!("/courses/{}/lessons", unknown)))
        .await
        .unwrap();
    let lessons: Vec<Lesson> = json_body(response.into_body()).await;
    assert!(lessons.is_empty());
}

#[tokio::test]
async fn test_create_lesson_then_list_it() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_json("/courses", course_payload()))
        .await
        .unwrap();
    let course: ResourceCreated = json_body(response.into_body()).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/lessons",
            json!({ "course_id": course.id, "title": "Introduction" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(get(&format!("/courses/{}/lessons", course.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let lessons: Vec<Lesson> = json_body(response.into_body()).await;
    assert_eq!(lessons.len(), 1);
    assert_eq!(lessons[0].course_id, course.id);
    assert_eq!(lessons[0].title, "Introduction");
    assert_eq!(lessons[0].order, 1); // default applied
}

#[tokio::test]
async fn test_list_lessons_for_unknown_course_is_empty_not_an_error() {
    let app = test_app();

    let response = app
        .oneshot(get(&format!("/courses/{}/lessons", ObjectId::new().to_hex())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let lessons: Vec<Lesson> = json_body(response.into_body()).await;
    assert!(lessons.is_empty());
}

#[tokio::test]
async fn test_list_lessons_with_invalid_course_id_is_rejected() {
    let app = test_app();

    let response = app
        .oneshot(get("/courses/not-an-object-id/lessons"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_lessons_may_share_an_order_value() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_json("/courses", course_payload()))
        .await
        .unwrap();
    let course: ResourceCreated = json_body(response.into_body()).await;

    for title in ["First", "Second"] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/lessons",
                json!({ "course_id": course.id, "title": title, "order": 1 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(get(&format!("/courses/{}/lessons", course.id)))
        .await
        .unwrap();
    let lessons: Vec<Lesson> = json_body(response.into_body()).await;
    assert_eq!(lessons.len(), 2);
    assert!(lessons.iter().all(|lesson| lesson.order == 1));
}

#[tokio::test]
async fn test_enroll_with_invalid_course_id_is_rejected() {
    let app = test_app();

    let response = app
        .oneshot(post_json("/enroll", json!({ "course_id": "12345" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_enroll_in_unknown_course_is_not_found() {
    let app = test_app();

    let response = app
        .oneshot(post_json(
            "/enroll",
            json!({ "course_id": ObjectId::new().to_hex(), "learner_name": "Ada" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_enrollments_are_permitted() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_json("/courses", course_payload()))
        .await
        .unwrap();
    let course: ResourceCreated = json_body(response.into_body()).await;

    let payload = json!({
        "course_id": course.id,
        "learner_name": "Ada",
        "email": "ada@example.com"
    });

    let first = app
        .clone()
        .oneshot(post_json("/enroll", payload.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);
    let first: ResourceCreated = json_body(first.into_body()).await;

    let second = app.oneshot(post_json("/enroll", payload)).await.unwrap();
    assert_eq!(second.status(), StatusCode::CREATED);
    let second: ResourceCreated = json_body(second.into_body()).await;

    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn test_search_matches_title_or_description_case_insensitively() {
    let app = test_app();

    let payloads = [
        json!({
            "title": "Python for Beginners",
            "description": "Start coding from scratch. Hands-on exercises included.",
            "category": "Programming",
            "author": "Jane Doe"
        }),
        json!({
            "title": "Task Automation",
            "description": "Automate everyday chores with small PYTHON scripts.",
            "category": "Programming",
            "author": "Jane Doe"
        }),
        json!({
            "title": "UI Design Fundamentals",
            "description": "Learn color, typography, and layout to design beautiful interfaces.",
            "category": "Design",
            "author": "John Smith"
        }),
    ];
    for payload in payloads {
        let response = app
            .clone()
            .oneshot(post_json("/courses", payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Substring of either title or description, any letter-casing
    let response = app
        .clone()
        .oneshot(get("/courses?search=python"))
        .await
        .unwrap();
    let courses: Vec<Course> = json_body(response.into_body()).await;
    assert_eq!(courses.len(), 2);

    // Both filters combine with logical AND
    let response = app
        .clone()
        .oneshot(get("/courses?category=Programming&search=python"))
        .await
        .unwrap();
    let courses: Vec<Course> = json_body(response.into_body()).await;
    assert_eq!(courses.len(), 2);

    let response = app
        .clone()
        .oneshot(get("/courses?category=Design&search=python"))
        .await
        .unwrap();
    let courses: Vec<Course> = json_body(response.into_body()).await;
    assert!(courses.is_empty());

    // No match is an empty sequence, not an error
    let response = app.oneshot(get("/courses?search=cobol")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let courses: Vec<Course> = json_body(response.into_body()).await;
    assert!(courses.is_empty());
}

#[tokio::test]
async fn test_seed_twice_creates_duplicate_pairs_with_distinct_ids() {
    let app = test_app();

    let first = app
        .clone()
        .oneshot(post_json("/seed", json!({})))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);
    let first: SeedReport = json_body(first.into_body()).await;
    assert_eq!(first.inserted.len(), 2);

    let second = app
        .clone()
        .oneshot(post_json("/seed", json!({})))
        .await
        .unwrap();
    let second: SeedReport = json_body(second.into_body()).await;
    assert_eq!(second.inserted.len(), 2);

    for id in &second.inserted {
        assert!(!first.inserted.contains(id));
    }

    let response = app.oneshot(get("/courses")).await.unwrap();
    let courses: Vec<Course> = json_body(response.into_body()).await;
    assert_eq!(courses.len(), 4);

    // Duplicate pairs carry identical content
    let python: Vec<_> = courses
        .iter()
        .filter(|course| course.title == "Python for Beginners")
        .collect();
    assert_eq!(python.len(), 2);
    assert_ne!(python[0].id, python[1].id);
    assert_eq!(python[0].tags, python[1].tags);
}
