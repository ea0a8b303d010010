// Unique word set built from a corpus.

use hashbrown::HashSet;
use tracing::debug;
use typefast_core::policy::DelimiterPolicy;

use crate::TokenizeError;
use crate::tokenizer::words;

/// Set of unique words, read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct WordSet {
    words: HashSet<String>,
}

impl WordSet {
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over the words in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

/// Tokenize `text` and insert every word into a [`WordSet`].
///
/// Any malformed UTF-8 fails the whole build; no word is silently skipped.
pub fn build_dictionary(text: &[u8], policy: &DelimiterPolicy) -> Result<WordSet, TokenizeError> {
    let mut set = HashSet::new();
    let mut total = 0usize;
    for word in words(text, policy) {
        set.insert(word?);
        total += 1;
    }
    debug!(total, unique = set.len(), "built dictionary");
    Ok(WordSet { words: set })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deduplicates_words() {
        let set = build_dictionary(b"the cat and the hat", &DelimiterPolicy::default()).unwrap();
        assert_eq!(set.len(), 4);
        assert!(set.contains("the"));
        assert!(set.contains("hat"));
        assert!(!set.contains("dog"));
    }

    #[test]
    fn lowercase_merges_case_variants() {
        let set = build_dictionary("Öl öl ÖL".as_bytes(), &DelimiterPolicy::default()).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.contains("öl"));
    }

    #[test]
    fn case_variants_kept_without_lowercase() {
        let set = build_dictionary(b"Word word", &DelimiterPolicy::LETTERS_ONLY).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn empty_text_gives_empty_set() {
        let set = build_dictionary(b"  ...  ", &DelimiterPolicy::default()).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 0);
    }

    #[test]
    fn malformed_text_fails() {
        let text = [b'o', b'k', b' ', 0xC3];
        assert!(build_dictionary(&text, &DelimiterPolicy::default()).is_err());
    }

    #[test]
    fn overlong_letter_fails_instead_of_folding() {
        let text = [b'x', 0xC1, 0x81, b'y'];
        assert!(matches!(
            build_dictionary(&text, &DelimiterPolicy::default()),
            Err(TokenizeError::Malformed { offset: 1, .. })
        ));
    }
}
