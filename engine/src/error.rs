use crate::DocId;
use std::time::Duration;

/// Errors raised by engine operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Empty keyword, or an operation that needs a seeded query got an empty one.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// No document was ever stored under this id.
    #[error("document {0} not found")]
    NotFound(DocId),
    /// Result materialization ran past the caller's deadline.
    #[error("result materialization exceeded {limit:?} after {produced} matches")]
    Timeout { limit: Duration, produced: usize },
}

pub type Result<T> = std::result::Result<T, EngineError>;
