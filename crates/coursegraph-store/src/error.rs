//! Store error types.

use coursegraph_core::{ContentKind, CoreError};
use thiserror::Error;

/// Errors raised by the content store and course operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Front-matter, config or serialization error from the core crate.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The course a mutation targets is not indexed.
    #[error("`{0}` not found")]
    CourseNotFound(String),

    /// The unit a mutation targets is not part of the course.
    #[error("unit `{unit_id}` not found in course `{course_id}`")]
    UnitNotFound { unit_id: String, course_id: String },

    /// The id is already indexed as a different kind of content.
    #[error("id `{id}` already belongs to a {existing}, cannot save it as a {requested}")]
    IdCollision {
        id: String,
        existing: ContentKind,
        requested: ContentKind,
    },

    /// A unit or page was written without the course it belongs to.
    #[error("{kind} `{id}` needs a parent course id")]
    MissingParent { kind: ContentKind, id: String },

    /// A required argument was absent.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// The external index provider failed.
    #[error("index provider failed: {0}")]
    Provider(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Core(CoreError::Json(err))
    }
}
