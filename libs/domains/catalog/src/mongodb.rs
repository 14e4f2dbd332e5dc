//! MongoDB implementation of CatalogRepository

use ::mongodb::{
    Collection, Database,
    bson::{Bson, Document, doc, to_document},
};
use async_trait::async_trait;
use futures_util::TryStreamExt;
use tracing::instrument;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Course, CourseFilter, CourseId, CreateCourse, CreateEnrollment, CreateLesson, Lesson,
};
use crate::repository::CatalogRepository;

/// Collection names, one per entity kind
pub const COURSE_COLLECTION: &str = "course";
pub const LESSON_COLLECTION: &str = "lesson";
pub const ENROLLMENT_COLLECTION: &str = "enrollment";

/// MongoDB implementation of the CatalogRepository
///
/// Holds the database handle behind an `Option`: when store configuration is
/// absent or the store was unreachable at startup the repository is
/// constructed with [`MongoCatalogRepository::unavailable`] and every
/// operation fails with a database error, while the process keeps serving
/// requests (degraded mode).
#[derive(Clone)]
pub struct MongoCatalogRepository {
    db: Option<Database>,
}

impl MongoCatalogRepository {
    /// Create a repository backed by a connected database
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let db = client.database("elearning");
    /// let repo = MongoCatalogRepository::new(db);
    /// ```
    pub fn new(db: Database) -> Self {
        Self { db: Some(db) }
    }

    /// Create a repository for a process without a usable store
    pub fn unavailable() -> Self {
        Self { db: None }
    }

    fn db(&self) -> CatalogResult<&Database> {
        self.db
            .as_ref()
            .ok_or_else(|| CatalogError::Database("MongoDB is not configured".to_string()))
    }

    fn collection(&self, name: &str) -> CatalogResult<Collection<Document>> {
        Ok(self.db()?.collection::<Document>(name))
    }

    /// Build a MongoDB filter document from CourseFilter
    ///
    /// `category` matches exactly; `search` matches as a case-insensitive
    /// substring of title or description. Both combine with logical AND.
    fn build_filter(filter: &CourseFilter) -> Document {
        let mut doc = doc! {};

        if let Some(ref category) = filter.category {
            doc.insert("category", category.as_str());
        }

        if let Some(ref search) = filter.search {
            // Escape so the query matches the literal search text
            let pattern = regex::escape(search);
            doc.insert(
                "$or",
                vec![
                    doc! { "title": { "$regex": pattern.as_str(), "$options": "i" } },
                    doc! { "description": { "$regex": pattern.as_str(), "$options": "i" } },
                ],
            );
        }

        doc
    }

    fn inserted_id_string(inserted_id: &Bson) -> String {
        crate::models::id_string(Some(inserted_id))
    }
}

#[async_trait]
impl CatalogRepository for MongoCatalogRepository {
    #[instrument(skip(self, input), fields(course_title = %input.title))]
    async fn insert_course(&self, input: CreateCourse) -> CatalogResult<String> {
        let collection = self.collection(COURSE_COLLECTION)?;
        let document = to_document(&input)?;

        let result = collection.insert_one(document).await?;
        let id = Self::inserted_id_string(&result.inserted_id);

        tracing::info!(course_id = %id, "Course created");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn list_courses(&self, filter: CourseFilter) -> CatalogResult<Vec<Course>> {
        let collection = self.collection(COURSE_COLLECTION)?;
        let mongo_filter = Self::build_filter(&filter);

        // Store-native order; no sort is part of the contract
        let cursor = collection.find(mongo_filter).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        Ok(documents.iter().map(Course::from_document).collect())
    }

    #[instrument(skip(self))]
    async fn course_exists(&self, id: &CourseId) -> CatalogResult<bool> {
        let collection = self.collection(COURSE_COLLECTION)?;
        let found = collection
            .find_one(doc! { "_id": id.as_object_id() })
            .await?;
        Ok(found.is_some())
    }

    #[instrument(skip(self, input), fields(course_id = %input.course_id))]
    async fn insert_lesson(&self, input: CreateLesson) -> CatalogResult<String> {
        let collection = self.collection(LESSON_COLLECTION)?;
        let document = to_document(&input)?;

        let result = collection.insert_one(document).await?;
        let id = Self::inserted_id_string(&result.inserted_id);

        tracing::info!(lesson_id = %id, "Lesson created");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn list_lessons(&self, course_id: &CourseId) -> CatalogResult<Vec<Lesson>> {
        let collection = self.collection(LESSON_COLLECTION)?;

        // Lessons reference their course by the identifier's string form
        let cursor = collection
            .find(doc! { "course_id": course_id.to_string() })
            .await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        Ok(documents.iter().map(Lesson::from_document).collect())
    }

    #[instrument(skip(self, input), fields(course_id = %input.course_id))]
    async fn insert_enrollment(&self, input: CreateEnrollment) -> CatalogResult<String> {
        let collection = self.collection(ENROLLMENT_COLLECTION)?;
        let document = to_document(&input)?;

        let result = collection.insert_one(document).await?;
        let id = Self::inserted_id_string(&result.inserted_id);

        tracing::info!(enrollment_id = %id, "Enrollment created");
        Ok(id)
    }
}
