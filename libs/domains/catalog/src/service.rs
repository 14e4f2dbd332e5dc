//! Catalog Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Course, CourseFilter, CourseId, CreateCourse, CreateEnrollment, CreateLesson, Lesson,
};
use crate::repository::CatalogRepository;

/// Catalog service providing business logic operations
///
/// The service layer handles validation, the imperative referential checks
/// (the store has no foreign keys), and orchestrates repository operations.
/// Lifecycle is create-only: no entity is ever updated or deleted.
pub struct CatalogService<R: CatalogRepository> {
    repository: Arc<R>,
}

impl<R: CatalogRepository> CatalogService<R> {
    /// Create a new CatalogService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new course
    ///
    /// Courses hold no references, so no existence checks apply.
    #[instrument(skip(self, input), fields(course_title = %input.title))]
    pub async fn create_course(&self, input: CreateCourse) -> CatalogResult<String> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        self.repository.insert_course(input).await
    }

    /// List courses with optional category/search filters
    #[instrument(skip(self))]
    pub async fn list_courses(&self, filter: CourseFilter) -> CatalogResult<Vec<Course>> {
        self.repository.list_courses(filter).await
    }

    /// Create a new lesson
    ///
    /// Preconditions, checked in order: `course_id` must parse as a store
    /// identifier (before any lookup), and the referenced course must exist.
    #[instrument(skip(self, input), fields(course_id = %input.course_id))]
    pub async fn create_lesson(&self, input: CreateLesson) -> CatalogResult<String> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let course_id = CourseId::parse(&input.course_id)?;
        if !self.repository.course_exists(&course_id).await? {
            return Err(CatalogError::NotFound(input.course_id.clone()));
        }

        self.repository.insert_lesson(input).await
    }

    /// List the lessons of a course
    ///
    /// The identifier must parse, but the course is not required to exist:
    /// listing lessons of an unknown course yields an empty sequence.
    #[instrument(skip(self))]
    pub async fn list_lessons(&self, course_id: &str) -> CatalogResult<Vec<Lesson>> {
        let course_id = CourseId::parse(course_id)?;
        self.repository.list_lessons(&course_id).await
    }

    /// Enroll a learner in a course
    ///
    /// Same two-step precondition as lesson creation. Duplicate enrollments
    /// for the same learner/course pair are permitted.
    #[instrument(skip(self, input), fields(course_id = %input.course_id))]
    pub async fn enroll(&self, input: CreateEnrollment) -> CatalogResult<String> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let course_id = CourseId::parse(&input.course_id)?;
        if !self.repository.course_exists(&course_id).await? {
            return Err(CatalogError::NotFound(input.course_id.clone()));
        }

        self.repository.insert_enrollment(input).await
    }

    /// Insert the fixed sample courses and return their identifiers
    ///
    /// Not idempotent: each call inserts a fresh pair of documents.
    #[instrument(skip(self))]
    pub async fn seed(&self) -> CatalogResult<Vec<String>> {
        let mut inserted = Vec::new();
        for sample in sample_courses() {
            inserted.push(self.repository.insert_course(sample).await?);
        }

        tracing::info!(count = inserted.len(), "Sample courses inserted");
        Ok(inserted)
    }
}

impl<R: CatalogRepository> Clone for CatalogService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

/// The sample courses inserted by the seed operation
fn sample_courses() -> Vec<CreateCourse> {
    vec![
        CreateCourse {
            title: "Python for Beginners".to_string(),
            description: "Start coding with Python from scratch. Hands-on exercises included."
                .to_string(),
            category: "Programming".to_string(),
            level: "Beginner".to_string(),
            author: "Jane Doe".to_string(),
            thumbnail_url: Some(
                "https://images.unsplash.com/photo-1515879218367-8466d910aaa4".to_string(),
            ),
            tags: vec!["python".to_string(), "basics".to_string()],
            is_premium: true,
            is_free_access: true,
        },
        CreateCourse {
            title: "UI Design Fundamentals".to_string(),
            description: "Learn color, typography, and layout to design beautiful interfaces."
                .to_string(),
            category: "Design".to_string(),
            level: "Beginner".to_string(),
            author: "John Smith".to_string(),
            thumbnail_url: Some(
                "https://images.unsplash.com/photo-1523246191871-2c65d1d9d43a".to_string(),
            ),
            tags: vec!["ui".to_string(), "design".to_string()],
            is_premium: true,
            is_free_access: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockCatalogRepository;
    use ::mongodb::bson::oid::ObjectId;

    fn lesson_input(course_id: &str) -> CreateLesson {
        CreateLesson {
            course_id: course_id.to_string(),
            title: "Introduction".to_string(),
            content: None,
            video_url: None,
            order: 1,
        }
    }

    fn enrollment_input(course_id: &str) -> CreateEnrollment {
        CreateEnrollment {
            course_id: course_id.to_string(),
            learner_name: Some("Ada".to_string()),
            email: None,
        }
    }

    #[tokio::test]
    async fn test_create_lesson_rejects_invalid_reference_before_lookup() {
        let mut mock_repo = MockCatalogRepository::new();

        // Neither the existence check nor the insert may run
        mock_repo.expect_course_exists().never();
        mock_repo.expect_insert_lesson().never();

        let service = CatalogService::new(mock_repo);
        let result = service.create_lesson(lesson_input("not-an-object-id")).await;

        assert!(matches!(result, Err(CatalogError::InvalidReference(_))));
    }

    #[tokio::test]
    async fn test_create_lesson_fails_for_missing_course() {
        let mut mock_repo = MockCatalogRepository::new();

        mock_repo
            .expect_course_exists()
            .times(1)
            .returning(|_| Ok(false));
        mock_repo.expect_insert_lesson().never();

        let service = CatalogService::new(mock_repo);
        let result = service
            .create_lesson(lesson_input(&ObjectId::new().to_hex()))
            .await;

        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_lesson_inserts_after_existence_check() {
        let mut mock_repo = MockCatalogRepository::new();

        mock_repo
            .expect_course_exists()
            .times(1)
            .returning(|_| Ok(true));
        mock_repo
            .expect_insert_lesson()
            .times(1)
            .returning(|_| Ok(ObjectId::new().to_hex()));

        let service = CatalogService::new(mock_repo);
        let result = service
            .create_lesson(lesson_input(&ObjectId::new().to_hex()))
            .await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().len(), 24);
    }

    #[tokio::test]
    async fn test_enroll_rejects_invalid_reference_before_lookup() {
        let mut mock_repo = MockCatalogRepository::new();

        mock_repo.expect_course_exists().never();
        mock_repo.expect_insert_enrollment().never();

        let service = CatalogService::new(mock_repo);
        let result = service.enroll(enrollment_input("12345")).await;

        assert!(matches!(result, Err(CatalogError::InvalidReference(_))));
    }

    #[tokio::test]
    async fn test_enroll_fails_for_missing_course() {
        let mut mock_repo = MockCatalogRepository::new();

        mock_repo
            .expect_course_exists()
            .times(1)
            .returning(|_| Ok(false));
        mock_repo.expect_insert_enrollment().never();

        let service = CatalogService::new(mock_repo);
        let result = service
            .enroll(enrollment_input(&ObjectId::new().to_hex()))
            .await;

        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_enroll_permits_duplicates() {
        let mut mock_repo = MockCatalogRepository::new();

        // No duplicate prevention: two identical enrollments both insert
        mock_repo
            .expect_course_exists()
            .times(2)
            .returning(|_| Ok(true));
        mock_repo
            .expect_insert_enrollment()
            .times(2)
            .returning(|_| Ok(ObjectId::new().to_hex()));

        let service = CatalogService::new(mock_repo);
        let course_id = ObjectId::new().to_hex();

        let first = service.enroll(enrollment_input(&course_id)).await.unwrap();
        let second = service.enroll(enrollment_input(&course_id)).await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_list_lessons_does_not_require_course_existence() {
        let mut mock_repo = MockCatalogRepository::new();

        mock_repo.expect_course_exists().never();
        mock_repo
            .expect_list_lessons()
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = CatalogService::new(mock_repo);
        let lessons = service
            .list_lessons(&ObjectId::new().to_hex())
            .await
            .unwrap();

        assert!(lessons.is_empty());
    }

    #[tokio::test]
    async fn test_list_lessons_rejects_invalid_identifier() {
        let mut mock_repo = MockCatalogRepository::new();
        mock_repo.expect_list_lessons().never();

        let service = CatalogService::new(mock_repo);
        let result = service.list_lessons("zzz").await;

        assert!(matches!(result, Err(CatalogError::InvalidReference(_))));
    }

    #[tokio::test]
    async fn test_create_course_validates_before_any_store_interaction() {
        let mut mock_repo = MockCatalogRepository::new();
        mock_repo.expect_insert_course().never();

        let service = CatalogService::new(mock_repo);
        let result = service
            .create_course(CreateCourse {
                title: "ab".to_string(), // below the 3-char minimum
                description: "A long enough description.".to_string(),
                category: "Programming".to_string(),
                level: "Beginner".to_string(),
                author: "A. Dev".to_string(),
                thumbnail_url: None,
                tags: vec![],
                is_premium: false,
                is_free_access: true,
            })
            .await;

        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[tokio::test]
    async fn test_seed_inserts_two_sample_courses() {
        let mut mock_repo = MockCatalogRepository::new();

        mock_repo
            .expect_insert_course()
            .times(2)
            .returning(|_| Ok(ObjectId::new().to_hex()));

        let service = CatalogService::new(mock_repo);
        let inserted = service.seed().await.unwrap();

        assert_eq!(inserted.len(), 2);
        assert_ne!(inserted[0], inserted[1]);
    }

    #[test]
    fn test_sample_courses_are_valid_inputs() {
        for sample in sample_courses() {
            assert!(sample.validate().is_ok());
        }
    }
}
