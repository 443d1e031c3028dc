//! # Quarry
//!
//! Quarry is an in-memory text search engine with TF-IDF ranking and a
//! small plus/minus query dialect.
//!
//! This crate provides both a command-line interface and a library that can
//! be used programmatically in other Rust applications.
//!
//! ## Features
//!
//! - Whitespace tokenisation over an inverted index
//! - Required (`word`) and excluded (`-word`) query terms with stop-word
//!   filtering
//! - TF-IDF relevance ranking with a rating tie-breaker
//! - Sequential and parallel scoring with identical results
//! - Duplicate detection, request logging and result pagination
//!
//! ## Examples
//!
//! ### Indexing and searching
//!
//! ```
//! use quarry_search::{DocumentStatus, SearchEngine};
//!
//! let mut engine = SearchEngine::with_stop_words_text("and in the")?;
//! engine.add_document(0, "white cat and fancy collar", DocumentStatus::Actual, &[8, 3])?;
//! engine.add_document(1, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7])?;
//! engine.add_document(2, "groomed starling eugene", DocumentStatus::Banned, &[9])?;
//!
//! for document in engine.find_top_documents("fluffy groomed cat")? {
//!     println!("{document}");
//! }
//! # Ok::<(), quarry_search::SearchError>(())
//! ```
//!
//! ### Parallel batch evaluation
//!
//! ```
//! use quarry_search::search::process_queries;
//! use quarry_search::{DocumentStatus, SearchEngine};
//!
//! let mut engine = SearchEngine::default();
//! engine.add_document(1, "curly dog", DocumentStatus::Actual, &[4])?;
//!
//! let queries = vec!["curly".to_string(), "absent".to_string()];
//! let blocks = process_queries(&engine, &queries)?;
//! assert_eq!(blocks[0].len(), 1);
//! assert!(blocks[1].is_empty());
//! # Ok::<(), quarry_search::SearchError>(())
//! ```

// Allow internal modules to reference the crate by its library name
extern crate self as quarry_search;

pub mod cli;
pub mod errors;
pub mod models;
pub mod ranking;
pub mod search;

// Re-export commonly used types for convenience
pub use errors::{Result, SearchError};
pub use models::{Document, DocumentId, DocumentStatus, ExecutionPolicy};
pub use search::{
    paginate, process_queries, process_queries_joined, remove_duplicates, RequestQueue,
    SearchEngine,
};

// Tests are defined in their respective modules with #[cfg(test)]
