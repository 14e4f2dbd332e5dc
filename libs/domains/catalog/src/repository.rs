use async_trait::async_trait;

use crate::error::CatalogResult;
use crate::models::{
    Course, CourseFilter, CourseId, CreateCourse, CreateEnrollment, CreateLesson, Lesson,
};

/// Repository trait for catalog persistence
///
/// This trait defines the data access interface for courses, lessons, and
/// enrollments. The store enforces no schema and no foreign keys; referential
/// integrity is checked imperatively through [`course_exists`] by the service
/// layer. Implementations can use different storage backends (MongoDB,
/// in-memory for tests, etc.).
///
/// [`course_exists`]: CatalogRepository::course_exists
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Insert a course and return its store-assigned identifier
    async fn insert_course(&self, input: CreateCourse) -> CatalogResult<String>;

    /// List courses matching a filter, in store-native order
    async fn list_courses(&self, filter: CourseFilter) -> CatalogResult<Vec<Course>>;

    /// Whether a course with the given identifier exists
    async fn course_exists(&self, id: &CourseId) -> CatalogResult<bool>;

    /// Insert a lesson and return its store-assigned identifier
    async fn insert_lesson(&self, input: CreateLesson) -> CatalogResult<String>;

    /// List the lessons of a course, in store-native order
    async fn list_lessons(&self, course_id: &CourseId) -> CatalogResult<Vec<Lesson>>;

    /// Insert an enrollment and return its store-assigned identifier
    async fn insert_enrollment(&self, input: CreateEnrollment) -> CatalogResult<String>;
}
