// Re-export all search module components
pub mod batch;
pub mod dedup;
pub mod engine;
pub mod limits;
pub mod paginate;
pub mod query;
pub mod request_log;
pub mod sharded;
pub mod tokenize;

// Public exports
pub use batch::{process_queries, process_queries_joined};
pub use dedup::remove_duplicates;
pub use engine::{DocumentIds, SearchEngine, WordFrequencies};
pub use paginate::{paginate, Page, Paginator};
pub use query::Query;
pub use request_log::RequestQueue;
pub use sharded::ShardedMap;
