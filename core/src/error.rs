//! Error types for the search engine.

use thiserror::Error;

/// Recoverable conditions reported to callers. None of them leave the engine unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The query text was blank or whitespace only.
    #[error("query is empty")]
    EmptyQuery,

    /// `search` was called before `build_index` on the current corpus.
    #[error("index has not been built for the current corpus")]
    NotIndexed,

    /// The similarity method name is not one of `cosine` or `euclidean`.
    #[error("unknown similarity method: {0}")]
    UnknownMethod(String),

    /// A document could not be added to the corpus.
    #[error("invalid document: {0}")]
    InvalidDocument(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
