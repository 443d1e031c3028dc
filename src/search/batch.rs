//! Batched query evaluation on the worker pool.

use rayon::prelude::*;

use crate::errors::Result;
use crate::models::Document;
use crate::search::engine::SearchEngine;

/// Evaluates independent queries in parallel against one engine.
///
/// The output is positionally aligned: the i-th result block answers the
/// i-th query. The first query error aborts the batch.
pub fn process_queries(
    engine: &SearchEngine,
    queries: &[String],
) -> Result<Vec<Vec<Document>>> {
    queries
        .par_iter()
        .map(|query| engine.find_top_documents(query))
        .collect()
}

/// Like [`process_queries`], but flattens the blocks into one list, still
/// in query order.
pub fn process_queries_joined(
    engine: &SearchEngine,
    queries: &[String],
) -> Result<Vec<Document>> {
    Ok(process_queries(engine, queries)?
        .into_iter()
        .flatten()
        .collect())
}
