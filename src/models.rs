use std::fmt;

use serde::{Deserialize, Serialize};

/// Caller-supplied document identifier. Signed so that a negative id can be
/// rejected at the API boundary instead of silently wrapping.
pub type DocumentId = i64;

/// Lifecycle tag attached to every document at insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

/// A ranked search hit: the document, its accumulated TF-IDF relevance and
/// the average rating recorded at insertion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Document {
    pub id: DocumentId,
    pub relevance: f64,
    pub rating: i32,
}

impl Document {
    pub fn new(id: DocumentId, relevance: f64, rating: i32) -> Self {
        Document {
            id,
            relevance,
            rating,
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

/// Selects how a query is evaluated: on the calling thread, or fanned out
/// across the worker pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionPolicy {
    #[default]
    Sequential,
    Parallel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_display_matches_report_format() {
        let doc = Document::new(3, 0.5, 4);
        assert_eq!(
            doc.to_string(),
            "{ document_id = 3, relevance = 0.5, rating = 4 }"
        );
    }

    #[test]
    fn status_serializes_upper_case() {
        let json = serde_json::to_string(&DocumentStatus::Actual).unwrap();
        assert_eq!(json, "\"ACTUAL\"");
        let back: DocumentStatus = serde_json::from_str("\"BANNED\"").unwrap();
        assert_eq!(back, DocumentStatus::Banned);
    }
}
