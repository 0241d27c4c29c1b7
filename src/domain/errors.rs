// src/domain/errors.rs
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    /// A slug unique constraint rejected the write; carries the slug or collection.
    #[error("slug already taken: {0}")]
    DuplicateSlug(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// A slug configuration names a field the entity or collection does not have.
    #[error("improperly configured: {0}")]
    Configuration(String),
    #[error("persistence error: {0}")]
    Persistence(String),
}
