// Error types shared across the engine

use crate::models::DocumentId;

/// Errors surfaced by document ingestion, query parsing and match inspection.
///
/// Validation errors are raised by the operation that detects them; the
/// engine's state is unchanged when an operation aborts with one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// A stop word, document word or query word contains an ASCII control
    /// byte (0–31).
    #[error("word `{0}` contains a control character")]
    InvalidCharacter(String),

    /// A query token is a bare `-` or starts with `--`.
    #[error("query word `{0}` has a malformed minus prefix")]
    MalformedMinus(String),

    /// `add_document` was called with an id that is already registered.
    #[error("document id {0} is already registered")]
    DuplicateId(DocumentId),

    /// `add_document` was called with a negative id.
    #[error("document id {0} is negative")]
    NegativeId(DocumentId),

    /// `match_document` was called with an unregistered id.
    #[error("document id {0} is not registered")]
    UnknownDocumentId(DocumentId),
}

pub type Result<T> = std::result::Result<T, SearchError>;
