//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: String },

    #[error("Persistence failed: {0}")]
    Persistence(String),
}

impl DomainError {
    pub fn post_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Post",
            id: id.into(),
        }
    }
}

/// Document store errors. Reads report *why* nothing usable came back.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store document does not exist")]
    Missing,

    #[error("Store document is corrupted: {0}")]
    Corrupted(String),

    #[error("Store I/O failed: {0}")]
    Io(String),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        DomainError::Persistence(err.to_string())
    }
}
