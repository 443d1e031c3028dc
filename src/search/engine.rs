//! The engine core: document registry, inverted index, scorers and match
//! inspection.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use ahash::{AHashMap, AHashSet};
use rayon::prelude::*;
use tracing::debug;

use crate::errors::{Result, SearchError};
use crate::models::{Document, DocumentId, DocumentStatus, ExecutionPolicy};
use crate::ranking;
use crate::search::limits::{DEFAULT_SHARD_COUNT, QUERY_WORKER_COUNT};
use crate::search::query::Query;
use crate::search::sharded::ShardedMap;
use crate::search::tokenize::{split_into_words, validate_word};

// Replace standard collections with ahash versions for better performance
type HashMap<K, V> = AHashMap<K, V>;
type HashSet<T> = AHashSet<T>;

/// Term frequencies of a single document: term → occurrences / length.
pub type WordFrequencies = AHashMap<String, f64>;

/// Everything recorded about one document at insertion time.
#[derive(Debug)]
struct DocumentEntry {
    status: DocumentStatus,
    rating: i32,
    word_frequencies: WordFrequencies,
}

/// In-memory text search engine.
///
/// Documents are whitespace-tokenised, stop-word filtered and indexed into
/// a term → (document id → term frequency) inverted index. Queries in the
/// plus/minus dialect are answered with TF-IDF ranked results.
///
/// The engine is read-only during query evaluation; concurrent mutation is
/// not supported and must be serialised by the caller.
///
/// # Examples
///
/// ```
/// use quarry_search::{DocumentStatus, SearchEngine};
///
/// let mut engine = SearchEngine::with_stop_words_text("and with")?;
/// engine.add_document(1, "funny pet and nasty rat", DocumentStatus::Actual, &[7, 2, 7])?;
/// engine.add_document(2, "funny pet with curly hair", DocumentStatus::Actual, &[5])?;
///
/// let top = engine.find_top_documents("curly -nasty")?;
/// assert_eq!(top.len(), 1);
/// assert_eq!(top[0].id, 2);
/// # Ok::<(), quarry_search::SearchError>(())
/// ```
#[derive(Debug, Default)]
pub struct SearchEngine {
    stop_words: HashSet<String>,
    /// term → postings; mirrored exactly by each entry's `word_frequencies`.
    index: HashMap<String, HashMap<DocumentId, f64>>,
    documents: BTreeMap<DocumentId, DocumentEntry>,
}

/// Ascending iterator over the registered document ids.
pub struct DocumentIds<'a> {
    inner: std::collections::btree_map::Keys<'a, DocumentId, DocumentEntry>,
}

impl Iterator for DocumentIds<'_> {
    type Item = DocumentId;

    fn next(&mut self) -> Option<DocumentId> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for DocumentIds<'_> {}

impl<'a> IntoIterator for &'a SearchEngine {
    type Item = DocumentId;
    type IntoIter = DocumentIds<'a>;

    fn into_iter(self) -> DocumentIds<'a> {
        self.document_ids()
    }
}

impl SearchEngine {
    /// Creates an engine from individual stop words. Every word is
    /// validated for control bytes up front.
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut validated = HashSet::new();
        for word in stop_words {
            let word = word.as_ref();
            validate_word(word)?;
            if !word.is_empty() {
                validated.insert(word.to_string());
            }
        }
        Ok(SearchEngine {
            stop_words: validated,
            ..SearchEngine::default()
        })
    }

    /// Creates an engine from a single space-separated stop-word string.
    pub fn with_stop_words_text(stop_words: &str) -> Result<Self> {
        SearchEngine::new(split_into_words(stop_words))
    }

    /// Registers a document under `id`.
    ///
    /// Ingestion is all-or-nothing: every word is validated before any
    /// state changes, so a failed call leaves the engine untouched.
    ///
    /// # Errors
    ///
    /// [`SearchError::NegativeId`] for `id < 0`,
    /// [`SearchError::DuplicateId`] if `id` is already registered, and
    /// [`SearchError::InvalidCharacter`] if any word carries a control byte.
    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if id < 0 {
            return Err(SearchError::NegativeId(id));
        }
        if self.documents.contains_key(&id) {
            return Err(SearchError::DuplicateId(id));
        }

        let mut words = Vec::new();
        for word in split_into_words(text) {
            validate_word(word)?;
            if !self.stop_words.contains(word) {
                words.push(word);
            }
        }

        // Each of the n retained occurrences contributes 1/n, so a word
        // appearing k times ends up with tf = k/n.
        let mut word_frequencies = WordFrequencies::new();
        if !words.is_empty() {
            let step = 1.0 / words.len() as f64;
            for word in &words {
                *word_frequencies.entry((*word).to_string()).or_insert(0.0) += step;
            }
        }
        for (word, &tf) in &word_frequencies {
            self.index.entry(word.clone()).or_default().insert(id, tf);
        }

        self.documents.insert(
            id,
            DocumentEntry {
                status,
                rating: average_rating(ratings),
                word_frequencies,
            },
        );
        debug!(document_id = id, words = words.len(), "added document");
        Ok(())
    }

    /// Unregisters `id` and drops its postings. Unknown ids are a no-op,
    /// which also makes removal idempotent.
    pub fn remove_document(&mut self, id: DocumentId) {
        let Some(entry) = self.documents.remove(&id) else {
            return;
        };
        for word in entry.word_frequencies.keys() {
            if let Some(postings) = self.index.get_mut(word) {
                postings.remove(&id);
                if postings.is_empty() {
                    self.index.remove(word);
                }
            }
        }
        debug!(document_id = id, "removed document");
    }

    /// Number of registered documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// The registered document ids in ascending order.
    pub fn document_ids(&self) -> DocumentIds<'_> {
        DocumentIds {
            inner: self.documents.keys(),
        }
    }

    /// Borrowed view of the term frequencies recorded for `id`; a shared
    /// empty map for unknown ids. Never fails.
    pub fn word_frequencies(&self, id: DocumentId) -> &WordFrequencies {
        static EMPTY: OnceLock<WordFrequencies> = OnceLock::new();
        match self.documents.get(&id) {
            Some(entry) => &entry.word_frequencies,
            None => EMPTY.get_or_init(WordFrequencies::new),
        }
    }

    /// Top documents for `raw_query` among those with `Actual` status,
    /// evaluated sequentially.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with_status(raw_query, DocumentStatus::Actual)
    }

    /// Top documents among those with the given status.
    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_filtered(raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    /// Top documents among those accepted by `filter`, evaluated
    /// sequentially. The filter sees (id, status, rating).
    pub fn find_top_documents_filtered<F>(&self, raw_query: &str, filter: F) -> Result<Vec<Document>>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let query = Query::parse(raw_query, &self.stop_words)?;
        let mut results = self.score_sequential(&query, &filter);
        ranking::sort_and_truncate(&mut results);
        Ok(results)
    }

    /// Policy-selected counterpart of [`find_top_documents`].
    ///
    /// [`find_top_documents`]: SearchEngine::find_top_documents
    pub fn find_top_documents_by(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_by_status(policy, raw_query, DocumentStatus::Actual)
    }

    /// Policy-selected counterpart of [`find_top_documents_with_status`].
    ///
    /// [`find_top_documents_with_status`]: SearchEngine::find_top_documents_with_status
    pub fn find_top_documents_by_status(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_by_filtered(policy, raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    /// Policy-selected counterpart of [`find_top_documents_filtered`]. The
    /// parallel path fans out across the worker pool, so the filter must be
    /// `Sync`.
    ///
    /// [`find_top_documents_filtered`]: SearchEngine::find_top_documents_filtered
    pub fn find_top_documents_by_filtered<F>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        filter: F,
    ) -> Result<Vec<Document>>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = Query::parse(raw_query, &self.stop_words)?;
        let mut results = match policy {
            ExecutionPolicy::Sequential => self.score_sequential(&query, &filter),
            ExecutionPolicy::Parallel => self.score_parallel(&query, &filter),
        };
        ranking::sort_and_truncate(&mut results);
        Ok(results)
    }

    /// Reports which plus terms of `raw_query` occur in document `id`,
    /// together with the document's status.
    ///
    /// Any minus-term hit empties the result. Matched terms come back
    /// sorted and deduplicated, borrowed from the engine's own term
    /// storage, so they stay valid until the document is removed.
    ///
    /// # Errors
    ///
    /// [`SearchError::UnknownDocumentId`] for an unregistered `id`, plus
    /// any query parse error.
    pub fn match_document(
        &self,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<(Vec<&str>, DocumentStatus)> {
        self.match_document_by(ExecutionPolicy::Sequential, raw_query, id)
    }

    /// Policy-selected counterpart of [`match_document`]; both policies
    /// return the same term set.
    ///
    /// [`match_document`]: SearchEngine::match_document
    pub fn match_document_by(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<(Vec<&str>, DocumentStatus)> {
        let entry = self
            .documents
            .get(&id)
            .ok_or(SearchError::UnknownDocumentId(id))?;
        let query = Query::parse(raw_query, &self.stop_words)?;

        let contains = |term: &String| entry.word_frequencies.contains_key(term);
        let stored_term = |term: &String| {
            entry
                .word_frequencies
                .get_key_value(term)
                .map(|(word, _)| word.as_str())
        };

        let matched = match policy {
            ExecutionPolicy::Sequential => {
                if query.minus_terms.iter().any(contains) {
                    Vec::new()
                } else {
                    query.plus_terms.iter().filter_map(stored_term).collect()
                }
            }
            ExecutionPolicy::Parallel => {
                if query.minus_terms.par_iter().any(contains) {
                    Vec::new()
                } else {
                    // Parallel collect keeps the source order.
                    query.plus_terms.par_iter().filter_map(stored_term).collect()
                }
            }
        };
        Ok((matched, entry.status))
    }

    fn score_sequential<F>(&self, query: &Query, filter: &F) -> Vec<Document>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let mut relevance: HashMap<DocumentId, f64> = HashMap::new();
        for term in &query.plus_terms {
            let Some(postings) = self.index.get(term) else {
                continue;
            };
            let idf = ranking::inverse_document_frequency(self.documents.len(), postings.len());
            for (&id, &tf) in postings {
                let entry = &self.documents[&id];
                if filter(id, entry.status, entry.rating) {
                    *relevance.entry(id).or_insert(0.0) += idf * tf;
                }
            }
        }
        for term in &query.minus_terms {
            let Some(postings) = self.index.get(term) else {
                continue;
            };
            for &id in postings.keys() {
                relevance.remove(&id);
            }
        }
        self.collect_results(relevance)
    }

    /// Same contract as `score_sequential`; the plus-term loop is split
    /// into contiguous partitions fanned out on the worker pool, with
    /// per-document accumulation serialised through a [`ShardedMap`].
    fn score_parallel<F>(&self, query: &Query, filter: &F) -> Vec<Document>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let accumulator: ShardedMap<f64> = ShardedMap::new(DEFAULT_SHARD_COUNT);
        let partition_len = query
            .plus_terms
            .len()
            .div_ceil(QUERY_WORKER_COUNT)
            .max(1);
        query.plus_terms.par_chunks(partition_len).for_each(|terms| {
            for term in terms {
                let Some(postings) = self.index.get(term) else {
                    continue;
                };
                let idf =
                    ranking::inverse_document_frequency(self.documents.len(), postings.len());
                for (&id, &tf) in postings {
                    let entry = &self.documents[&id];
                    if filter(id, entry.status, entry.rating) {
                        accumulator.update(id, |relevance| *relevance += idf * tf);
                    }
                }
            }
        });
        for term in &query.minus_terms {
            let Some(postings) = self.index.get(term) else {
                continue;
            };
            for &id in postings.keys() {
                accumulator.remove(id);
            }
        }
        self.collect_results(accumulator.into_map())
    }

    fn collect_results(
        &self,
        relevance: impl IntoIterator<Item = (DocumentId, f64)>,
    ) -> Vec<Document> {
        relevance
            .into_iter()
            .map(|(id, accumulated)| Document::new(id, accumulated, self.documents[&id].rating))
            .collect()
    }
}

/// Integer mean truncating toward zero; 0 for an empty ratings list.
fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&rating| i64::from(rating)).sum();
    (sum / ratings.len() as i64) as i32
}
