//! Duplicate-document detection.
//!
//! Two documents are duplicates when their distinct term sets are equal;
//! term frequencies play no part, so "funny funny pet" duplicates
//! "funny pet". Within a duplicate class the numerically smallest id
//! survives.

use ahash::AHashMap;
use tracing::info;

use crate::models::DocumentId;
use crate::search::engine::SearchEngine;

type HashMap<K, V> = AHashMap<K, V>;

/// Removes every document whose term set was already seen under a smaller
/// id. Returns the removed ids in ascending order; each removal is also
/// reported through the log.
pub fn remove_duplicates(engine: &mut SearchEngine) -> Vec<DocumentId> {
    let duplicates = find_duplicates(engine);
    for &id in &duplicates {
        engine.remove_document(id);
        info!(document_id = id, "removed duplicate document");
    }
    duplicates
}

/// Ids iterate ascending, so the first id seen with a given term set is
/// the smallest one and therefore the survivor of its class.
fn find_duplicates(engine: &SearchEngine) -> Vec<DocumentId> {
    let mut seen: HashMap<Vec<&str>, DocumentId> = HashMap::new();
    let mut duplicates = Vec::new();
    for id in engine {
        let mut terms: Vec<&str> = engine
            .word_frequencies(id)
            .keys()
            .map(String::as_str)
            .collect();
        terms.sort_unstable();
        if seen.contains_key(&terms) {
            duplicates.push(id);
        } else {
            seen.insert(terms, id);
        }
    }
    duplicates
}
