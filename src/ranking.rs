//! Relevance ranking.
//!
//! Documents are ordered by descending TF-IDF relevance; two documents
//! whose relevances differ by less than [`EPSILON`] are ordered by
//! descending rating instead. The result list is truncated to
//! [`MAX_RESULT_DOCUMENT_COUNT`].

use std::cmp::Ordering;

use crate::models::Document;
use crate::search::limits::{EPSILON, MAX_RESULT_DOCUMENT_COUNT};

/// Inverse document frequency of a term: ln(N / df).
///
/// Callers only ask about terms present in the index, so `df` is at least 1
/// whenever this is reached.
pub fn inverse_document_frequency(document_count: usize, containing_documents: usize) -> f64 {
    (document_count as f64 / containing_documents as f64).ln()
}

/// The ranking relation: descending relevance, rating breaking near-ties.
pub fn compare_documents(lhs: &Document, rhs: &Document) -> Ordering {
    if (lhs.relevance - rhs.relevance).abs() < EPSILON {
        rhs.rating.cmp(&lhs.rating)
    } else {
        // Relevances are finite sums of finite terms; NaN never appears,
        // but Equal keeps the sort total if it ever did.
        rhs.relevance
            .partial_cmp(&lhs.relevance)
            .unwrap_or(Ordering::Equal)
    }
}

/// Sorts `documents` with [`compare_documents`] and keeps the top entries.
/// The stable sort makes equal-relevance, equal-rating runs deterministic.
pub fn sort_and_truncate(documents: &mut Vec<Document>) {
    documents.sort_by(compare_documents);
    documents.truncate(MAX_RESULT_DOCUMENT_COUNT);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idf_of_a_universal_term_is_zero() {
        assert_eq!(inverse_document_frequency(4, 4), 0.0);
    }

    #[test]
    fn idf_grows_as_terms_get_rarer() {
        let common = inverse_document_frequency(10, 5);
        let rare = inverse_document_frequency(10, 1);
        assert!(rare > common);
        assert!((rare - 10f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn orders_by_relevance_first() {
        let mut docs = vec![
            Document::new(1, 0.1, 9),
            Document::new(2, 0.3, 1),
            Document::new(3, 0.2, 5),
        ];
        sort_and_truncate(&mut docs);
        let ids: Vec<_> = docs.iter().map(|d| d.id).collect();
        assert_eq!(ids, [2, 3, 1]);
    }

    #[test]
    fn near_ties_fall_back_to_descending_rating() {
        let mut docs = vec![
            Document::new(1, 0.5, 2),
            Document::new(2, 0.5 + 1e-9, 7),
            Document::new(3, 0.5 - 1e-9, 4),
        ];
        sort_and_truncate(&mut docs);
        let ids: Vec<_> = docs.iter().map(|d| d.id).collect();
        assert_eq!(ids, [2, 3, 1]);
    }

    #[test]
    fn truncates_to_the_result_cap() {
        let mut docs = (0..10)
            .map(|i| Document::new(i, i as f64, 0))
            .collect::<Vec<_>>();
        sort_and_truncate(&mut docs);
        assert_eq!(docs.len(), MAX_RESULT_DOCUMENT_COUNT);
        assert_eq!(docs[0].id, 9);
    }
}
