//! Bounded-window request log.
//!
//! Wraps an engine and records one entry per find request on a logical
//! clock that advances by one tick per call. Entries older than
//! [`REQUEST_WINDOW`] ticks fall off the front, and the count of requests
//! that returned no documents is maintained across insertion and eviction.

use std::collections::VecDeque;

use crate::errors::Result;
use crate::models::{Document, DocumentId, DocumentStatus};
use crate::search::engine::SearchEngine;
use crate::search::limits::REQUEST_WINDOW;

#[derive(Debug, Clone, Copy)]
struct QueryResult {
    timestamp: u64,
    result_count: usize,
}

/// Sliding-window log over the requests issued through it.
///
/// Holds a shared borrow of the engine for its whole lifetime; requests
/// evaluate sequentially on the calling thread. Not thread-safe.
#[derive(Debug)]
pub struct RequestQueue<'a> {
    engine: &'a SearchEngine,
    requests: VecDeque<QueryResult>,
    no_result_count: usize,
    current_time: u64,
}

impl<'a> RequestQueue<'a> {
    pub fn new(engine: &'a SearchEngine) -> Self {
        RequestQueue {
            engine,
            requests: VecDeque::new(),
            no_result_count: 0,
            current_time: 0,
        }
    }

    /// Runs `raw_query` with the default `Actual` filter and logs the
    /// result-set size. A query that fails to parse is not logged.
    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        let result = self.engine.find_top_documents(raw_query)?;
        self.record(result.len());
        Ok(result)
    }

    /// Runs `raw_query` filtered by status and logs the result-set size.
    pub fn add_find_request_with_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        let result = self
            .engine
            .find_top_documents_with_status(raw_query, status)?;
        self.record(result.len());
        Ok(result)
    }

    /// Runs `raw_query` with an arbitrary filter and logs the result-set
    /// size.
    pub fn add_find_request_filtered<F>(
        &mut self,
        raw_query: &str,
        filter: F,
    ) -> Result<Vec<Document>>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let result = self.engine.find_top_documents_filtered(raw_query, filter)?;
        self.record(result.len());
        Ok(result)
    }

    /// Number of logged requests inside the window whose result set was
    /// empty.
    pub fn no_result_requests(&self) -> usize {
        self.no_result_count
    }

    fn record(&mut self, result_count: usize) {
        self.current_time += 1;
        while let Some(oldest) = self.requests.front() {
            if self.current_time - oldest.timestamp < REQUEST_WINDOW {
                break;
            }
            if oldest.result_count == 0 {
                self.no_result_count -= 1;
            }
            self.requests.pop_front();
        }
        if result_count == 0 {
            self.no_result_count += 1;
        }
        self.requests.push_back(QueryResult {
            timestamp: self.current_time,
            result_count,
        });
    }
}
