//! Whitespace tokenisation.
//!
//! Documents and queries are split on ASCII spaces only; anything else,
//! including tabs and newlines, is part of a word and gets caught by the
//! control-byte validation at the points of use.

use crate::errors::{Result, SearchError};

/// Splits `text` on ASCII spaces (0x20) into maximal non-empty words.
///
/// The returned views borrow from `text` and stay valid as long as it does.
/// No validation happens here; callers run [`validate_word`] on each word
/// they intend to keep.
pub fn split_into_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|word| !word.is_empty())
}

/// Rejects words containing ASCII control bytes (0–31).
pub fn validate_word(word: &str) -> Result<()> {
    if word.bytes().any(|byte| byte < 32) {
        return Err(SearchError::InvalidCharacter(word.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_single_spaces() {
        let words: Vec<&str> = split_into_words("funny pet and nasty rat").collect();
        assert_eq!(words, ["funny", "pet", "and", "nasty", "rat"]);
    }

    #[test]
    fn discards_empty_runs() {
        let words: Vec<&str> = split_into_words("  leading   and trailing  ").collect();
        assert_eq!(words, ["leading", "and", "trailing"]);
    }

    #[test]
    fn empty_text_yields_no_words() {
        assert_eq!(split_into_words("").count(), 0);
        assert_eq!(split_into_words("   ").count(), 0);
    }

    #[test]
    fn only_space_is_a_separator() {
        // Tabs and newlines are not separators; they are invalid bytes.
        let words: Vec<&str> = split_into_words("a\tb c").collect();
        assert_eq!(words, ["a\tb", "c"]);
        assert_eq!(
            validate_word("a\tb"),
            Err(SearchError::InvalidCharacter("a\tb".to_string()))
        );
    }

    #[test]
    fn validate_accepts_printable_words() {
        assert_eq!(validate_word("skip-word"), Ok(()));
        assert_eq!(validate_word("café"), Ok(()));
    }

    #[test]
    fn validate_rejects_control_bytes() {
        assert!(validate_word("bad\u{1}word").is_err());
        assert!(validate_word("\u{1f}").is_err());
    }
}
