//! Engine-wide constants.

/// Maximum number of documents returned by a single `find_top_documents`.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Two relevance values closer than this are treated as equal by the
/// ranking comparator; floating-point summation order in the parallel
/// scorer can move results by a few ULPs.
pub const EPSILON: f64 = 1e-6;

/// Sliding-window size of the request log, in logical ticks. One tick per
/// request; 1440 models minutes per day.
pub const REQUEST_WINDOW: u64 = 1440;

/// Number of lock-protected buckets in the sharded relevance accumulator.
pub const DEFAULT_SHARD_COUNT: usize = 8;

/// Number of contiguous plus-term partitions handed to the worker pool by
/// the parallel scorer.
pub const QUERY_WORKER_COUNT: usize = 8;
