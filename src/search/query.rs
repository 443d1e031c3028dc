//! The plus/minus query dialect.
//!
//! A query is a space-separated list of words. A leading `-` marks a word
//! the document must not contain; every other word is one the document
//! should contain. Stop words are dropped after the `-` is stripped, so
//! `-the` with `the` as a stop word is silently ignored rather than an
//! error.

use ahash::AHashSet;

use crate::errors::{Result, SearchError};
use crate::search::tokenize::{split_into_words, validate_word};

type HashSet<T> = AHashSet<T>;

/// A parsed query: the words a matching document must contain and the words
/// that disqualify it. Both lists are sorted and deduplicated, which the
/// scorers rely on so no term contributes relevance twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_terms: Vec<String>,
    pub minus_terms: Vec<String>,
}

/// One classified query word, before stop-word filtering is applied.
struct QueryWord<'a> {
    term: &'a str,
    is_minus: bool,
}

impl Query {
    /// Parses `raw` against the given stop-word set.
    ///
    /// An empty or all-stop-word query parses to an empty `Query`; the
    /// scorers turn that into an empty result rather than an error.
    pub fn parse(raw: &str, stop_words: &HashSet<String>) -> Result<Self> {
        let mut query = Query::default();
        for word in split_into_words(raw) {
            let parsed = parse_query_word(word)?;
            if stop_words.contains(parsed.term) {
                continue;
            }
            if parsed.is_minus {
                query.minus_terms.push(parsed.term.to_string());
            } else {
                query.plus_terms.push(parsed.term.to_string());
            }
        }
        query.plus_terms.sort_unstable();
        query.plus_terms.dedup();
        query.minus_terms.sort_unstable();
        query.minus_terms.dedup();
        Ok(query)
    }

    pub fn is_empty(&self) -> bool {
        self.plus_terms.is_empty() && self.minus_terms.is_empty()
    }
}

/// Classifies a single word. The malformed-minus check runs before the
/// control-byte check, matching the order documents observe errors in.
fn parse_query_word(word: &str) -> Result<QueryWord<'_>> {
    if let Some(rest) = word.strip_prefix('-') {
        if rest.is_empty() || rest.starts_with('-') {
            return Err(SearchError::MalformedMinus(word.to_string()));
        }
        validate_word(word)?;
        return Ok(QueryWord {
            term: rest,
            is_minus: true,
        });
    }
    validate_word(word)?;
    Ok(QueryWord {
        term: word,
        is_minus: false,
    })
}
