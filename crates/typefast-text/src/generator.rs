// Random word generator
//
// Keeps every word of the corpus in order, duplicates included, and draws
// uniformly over that list. Common words therefore come up as often as they
// do in the source text; sampling is frequency-weighted, not uniform over
// unique words.

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;
use typefast_core::policy::DelimiterPolicy;

use crate::CorpusError;
use crate::tokenizer::words;

/// Samples random words, with replacement, from a corpus word list.
#[derive(Debug, Clone)]
pub struct WordGenerator<R = StdRng> {
    words: Vec<String>,
    index: Uniform<usize>,
    rng: R,
}

impl WordGenerator<StdRng> {
    /// Load from corpus text with an entropy-seeded RNG.
    pub fn load(text: &[u8], policy: &DelimiterPolicy) -> Result<Self, CorpusError> {
        Self::load_with_rng(text, policy, StdRng::from_entropy())
    }
}

impl<R: Rng> WordGenerator<R> {
    /// Load from corpus text, drawing indices from `rng`.
    pub fn load_with_rng(
        text: &[u8],
        policy: &DelimiterPolicy,
        rng: R,
    ) -> Result<Self, CorpusError> {
        // Rough guess of one word per four bytes.
        let mut list = Vec::with_capacity(text.len() / 4);
        for word in words(text, policy) {
            list.push(word?);
        }
        debug!(words = list.len(), "loaded word generator");
        Self::from_words(list, rng)
    }

    /// Build from an explicit word list.
    pub fn from_words(words: Vec<String>, rng: R) -> Result<Self, CorpusError> {
        if words.is_empty() {
            return Err(CorpusError::Empty);
        }
        let index = Uniform::new(0, words.len());
        Ok(Self { words, index, rng })
    }

    /// Draw one word.
    pub fn next_word(&mut self) -> String {
        self.words[self.index.sample(&mut self.rng)].clone()
    }

    /// Number of stored words, duplicates included.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// The stored word list in corpus order.
    pub fn words(&self) -> &[String] {
        &self.words
    }
}

/// Endless stream of sampled words.
impl<R: Rng> Iterator for WordGenerator<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        Some(self.next_word())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(text: &str) -> WordGenerator<StdRng> {
        WordGenerator::load_with_rng(
            text.as_bytes(),
            &DelimiterPolicy::default(),
            StdRng::seed_from_u64(7),
        )
        .unwrap()
    }

    #[test]
    fn keeps_duplicates_in_order() {
        let wg = seeded("The cat saw the dog");
        assert_eq!(wg.word_count(), 5);
        assert_eq!(wg.words(), ["the", "cat", "saw", "the", "dog"]);
    }

    #[test]
    fn samples_only_corpus_words() {
        let mut wg = seeded("alpha beta gamma");
        for _ in 0..100 {
            let w = wg.next_word();
            assert!(["alpha", "beta", "gamma"].contains(&w.as_str()));
        }
    }

    #[test]
    fn single_word_corpus() {
        let mut wg = seeded("solo");
        assert_eq!(wg.next_word(), "solo");
        assert_eq!(wg.next(), Some("solo".to_string()));
    }

    #[test]
    fn sampling_is_frequency_weighted() {
        // "a" appears 9 times out of 10.
        let mut wg = seeded("a a a a a a a a a b");
        let n = 10_000;
        let a_count = (0..n).filter(|_| wg.next_word() == "a").count();
        let ratio = a_count as f64 / n as f64;
        assert!((0.85..0.95).contains(&ratio), "ratio {ratio}");
    }

    #[test]
    fn same_seed_same_sequence() {
        let a: Vec<_> = seeded("one two three four five").take(20).collect();
        let b: Vec<_> = seeded("one two three four five").take(20).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_corpus_is_an_error() {
        let result = WordGenerator::load_with_rng(
            b"123 ... !!!",
            &DelimiterPolicy::default(),
            StdRng::seed_from_u64(1),
        );
        assert!(matches!(result, Err(CorpusError::Empty)));
    }

    #[test]
    fn malformed_corpus_is_an_error() {
        let result = WordGenerator::load_with_rng(
            &[b'a', b'b', 0xF0, 0x9F],
            &DelimiterPolicy::default(),
            StdRng::seed_from_u64(1),
        );
        assert!(matches!(result, Err(CorpusError::Tokenize(_))));
    }

    #[test]
    fn overlong_capital_is_an_error() {
        let result = WordGenerator::load_with_rng(
            &[b'x', 0xE0, 0x83, 0x85, b'y'],
            &DelimiterPolicy::default(),
            StdRng::seed_from_u64(1),
        );
        assert!(matches!(result, Err(CorpusError::Tokenize(_))));
    }
}
