//! Domain-level error types.

use thiserror::Error;

use crate::ports::StorageError;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: String },

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError),

    #[error("Image rejected: {0}")]
    Image(#[from] ImageError),
}

impl DomainError {
    pub fn post_not_found(id: impl ToString) -> Self {
        DomainError::NotFound {
            entity_type: "post",
            id: id.to_string(),
        }
    }
}

/// Failures while turning an uploaded file into an embedded image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("No image data received")]
    Empty,

    #[error("Please select an image file (got {0})")]
    NotAnImage(String),

    #[error("File contents are not a recognised image format")]
    UnrecognisedFormat,

    #[error("Malformed image data URI: {0}")]
    MalformedDataUri(String),

    #[error("Image decoding was interrupted: {0}")]
    Interrupted(String),
}
