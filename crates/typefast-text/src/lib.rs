//! Word extraction for typefast.
//!
//! A raw corpus (plain UTF-8 text read fully into memory) is split into words
//! by a delimiter-driven scanner. The words feed two consumers: a unique
//! [`dictionary::WordSet`] and a frequency-preserving
//! [`generator::WordGenerator`] that samples random words for the game.
//!
//! # Architecture
//!
//! - [`tokenizer`] -- `find_word` state machine and the `Words` iterator
//! - [`dictionary`] -- Unique word set built from a corpus
//! - [`generator`] -- Uniform sampler over the corpus word list
//! - [`corpus`] -- Loading corpus bytes from disk

pub mod corpus;
pub mod dictionary;
pub mod generator;
pub mod tokenizer;

use std::path::PathBuf;

use typefast_core::utf8::DecodeError;

/// Error raised while scanning a corpus for words.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenizeError {
    /// A byte sequence is not well-formed UTF-8 (including overlong forms
    /// and surrogates).
    #[error("malformed UTF-8 in corpus at byte {offset}")]
    Malformed {
        offset: usize,
        #[source]
        source: DecodeError,
    },
}

/// Error raised while turning a corpus into a dictionary or generator.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    /// The corpus file could not be read.
    #[error("failed to read corpus {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The corpus is not valid UTF-8.
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
    /// No word could be extracted under the delimiter policy.
    #[error("corpus contains no words")]
    Empty,
}
