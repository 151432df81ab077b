use thiserror::Error;

/// Errors from repository operations (used by trait definitions in punchcard-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors raised while assembling content-type definitions.
#[derive(Debug, Error)]
pub enum ContentTypeError {
    #[error("content type '{0}' is registered more than once")]
    DuplicateId(String),

    #[error("content type id cannot be empty")]
    EmptyId,

    #[error("invalid content type definition in '{path}': {message}")]
    InvalidDefinition { path: String, message: String },
}
