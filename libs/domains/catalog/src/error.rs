use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// A provided identifier is not a syntactically valid store identifier
    #[error("Invalid course_id: {0}")]
    InvalidReference(String),

    /// A referenced course does not exist
    #[error("Course not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Convert CatalogError to AppError for standardized error responses.
///
/// Client errors (invalid reference, not found, validation) keep their
/// classification; everything else surfaces as a server error with the
/// stringified underlying failure as the message.
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidReference(id) => {
                AppError::InvalidIdentifier(format!("Invalid course_id: {}", id))
            }
            CatalogError::NotFound(id) => AppError::NotFound(format!("Course {} not found", id)),
            CatalogError::Validation(msg) => AppError::BadRequest(msg),
            CatalogError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        // Convert to AppError for the standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<::mongodb::error::Error> for CatalogError {
    fn from(err: ::mongodb::error::Error) -> Self {
        CatalogError::Database(err.to_string())
    }
}

impl From<::mongodb::bson::ser::Error> for CatalogError {
    fn from(err: ::mongodb::bson::ser::Error) -> Self {
        CatalogError::Database(format!("BSON serialization error: {}", err))
    }
}
