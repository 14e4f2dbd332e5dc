use ::mongodb::bson::{Bson, Document, oid::ObjectId};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::CatalogError;

/// Default course level. Free text, not an enum: the store accepts any
/// string here and listings echo whatever was written.
const DEFAULT_LEVEL: &str = "Beginner";

fn default_level() -> String {
    DEFAULT_LEVEL.to_string()
}

fn default_true() -> bool {
    true
}

fn default_order() -> i64 {
    1
}

/// A syntactically valid course identifier.
///
/// Wraps a BSON `ObjectId`; parsing fails for anything that is not a valid
/// identifier, before any store lookup happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseId(ObjectId);

impl CourseId {
    /// Parse an identifier from its string form.
    pub fn parse(raw: &str) -> Result<Self, CatalogError> {
        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|_| CatalogError::InvalidReference(raw.to_string()))
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

/// Render a stored identifier as its string form, whatever its native
/// BSON representation.
pub(crate) fn id_string(value: Option<&Bson>) -> String {
    match value {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Course response shape
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Course {
    /// Store-assigned identifier, rendered as a string
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Level: Beginner, Intermediate, Advanced (free text)
    pub level: String,
    pub author: String,
    /// Thumbnail image URL
    pub thumbnail_url: Option<String>,
    /// Searchable tags, order and duplicates preserved as given
    pub tags: Vec<String>,
    /// Originally premium/paid course
    pub is_premium: bool,
    /// Provided free of cost on this platform
    pub is_free_access: bool,
}

impl Course {
    /// Map a raw stored document into the public response shape.
    ///
    /// Total over arbitrary documents: fields absent from the document take
    /// the creation-time defaults, so records inserted out-of-band still
    /// render.
    pub fn from_document(doc: &Document) -> Self {
        Self {
            id: id_string(doc.get("_id")),
            title: doc.get_str("title").unwrap_or_default().to_string(),
            description: doc.get_str("description").unwrap_or_default().to_string(),
            category: doc.get_str("category").unwrap_or_default().to_string(),
            level: doc.get_str("level").unwrap_or(DEFAULT_LEVEL).to_string(),
            author: doc.get_str("author").unwrap_or_default().to_string(),
            thumbnail_url: doc.get_str("thumbnail_url").ok().map(str::to_string),
            tags: doc
                .get_array("tags")
                .map(|tags| {
                    tags.iter()
                        .filter_map(|tag| tag.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default(),
            is_premium: doc.get_bool("is_premium").unwrap_or(false),
            is_free_access: doc.get_bool("is_free_access").unwrap_or(true),
        }
    }
}

/// Lesson response shape
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Lesson {
    /// Store-assigned identifier, rendered as a string
    pub id: String,
    /// Identifier of the course this lesson belongs to
    pub course_id: String,
    pub title: String,
    /// Lesson content (markdown or text)
    pub content: Option<String>,
    /// Public video URL if available
    pub video_url: Option<String>,
    /// Ordering within the course; not unique, listings do not sort by it
    pub order: i64,
}

impl Lesson {
    /// Map a raw stored document into the public response shape.
    pub fn from_document(doc: &Document) -> Self {
        let order = match doc.get("order") {
            Some(Bson::Int32(n)) => i64::from(*n),
            Some(Bson::Int64(n)) => *n,
            _ => 1,
        };

        Self {
            id: id_string(doc.get("_id")),
            course_id: id_string(doc.get("course_id")),
            title: doc.get_str("title").unwrap_or_default().to_string(),
            content: doc.get_str("content").ok().map(str::to_string),
            video_url: doc.get_str("video_url").ok().map(str::to_string),
            order,
        }
    }
}

/// Enrollment response shape
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Enrollment {
    /// Store-assigned identifier, rendered as a string
    pub id: String,
    pub course_id: String,
    pub learner_name: Option<String>,
    pub email: Option<String>,
}

impl Enrollment {
    /// Map a raw stored document into the public response shape.
    pub fn from_document(doc: &Document) -> Self {
        Self {
            id: id_string(doc.get("_id")),
            course_id: id_string(doc.get("course_id")),
            learner_name: doc.get_str("learner_name").ok().map(str::to_string),
            email: doc.get_str("email").ok().map(str::to_string),
        }
    }
}

/// DTO for creating a new course
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCourse {
    #[validate(length(min = 3, max = 120))]
    pub title: String,
    #[validate(length(min = 10, max = 2000))]
    pub description: String,
    /// Course category e.g. Programming, Design
    #[validate(length(min = 2, max = 60))]
    pub category: String,
    /// Level: Beginner, Intermediate, Advanced (free text)
    #[serde(default = "default_level")]
    pub level: String,
    /// Instructor name
    #[validate(length(min = 2, max = 80))]
    pub author: String,
    /// Thumbnail image URL
    #[validate(url)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Searchable tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Originally premium/paid course
    #[serde(default)]
    pub is_premium: bool,
    /// Provided free of cost on this platform
    #[serde(default = "default_true")]
    pub is_free_access: bool,
}

/// DTO for creating a new lesson
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateLesson {
    /// Related course _id as string
    pub course_id: String,
    #[validate(length(min = 3, max = 160))]
    pub title: String,
    /// Lesson content (markdown or text)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Public video URL if available
    #[validate(url)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Ordering within course
    #[validate(range(min = 1))]
    #[serde(default = "default_order")]
    pub order: i64,
}

/// DTO for creating a new enrollment
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEnrollment {
    /// Course _id as string
    pub course_id: String,
    /// Learner display name
    #[validate(length(max = 80))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learner_name: Option<String>,
    /// Learner email; stored as given, format is not validated
    #[validate(length(max = 120))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Query filters for listing courses
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct CourseFilter {
    /// Filter by exact category match
    pub category: Option<String>,
    /// Case-insensitive substring match against title or description
    pub search: Option<String>,
}

/// Identifier assigned by the store to a newly created document
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResourceCreated {
    pub id: String,
}

/// Identifiers of the sample courses inserted by the seed operation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SeedReport {
    pub inserted: Vec<String>,
}
