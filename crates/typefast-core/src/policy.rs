// Delimiter policy: which characters may appear inside a word.

use serde::{Deserialize, Serialize};

/// Configuration of which byte classes are part of a word.
///
/// Shared read-only by the tokenizer, the dictionary builder and the word
/// generator. The default is the game's own setting: lowercase everything
/// and accept letters only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DelimiterPolicy {
    /// Convert extracted words to lowercase (ASCII and Å Ä Ö).
    pub only_lowercase: bool,
    /// Keep `'` inside words ("it's").
    pub allow_apostrophe: bool,
    /// Keep `-` inside words ("one-word").
    pub allow_hyphen: bool,
    /// Keep all ASCII punctuation inside words.
    pub allow_punctuation: bool,
    /// Keep ASCII digits inside words.
    pub allow_digits: bool,
}

impl DelimiterPolicy {
    /// Letters only, case preserved.
    pub const LETTERS_ONLY: Self = Self {
        only_lowercase: false,
        allow_apostrophe: false,
        allow_hyphen: false,
        allow_punctuation: false,
        allow_digits: false,
    };
}

impl Default for DelimiterPolicy {
    fn default() -> Self {
        Self {
            only_lowercase: true,
            ..Self::LETTERS_ONLY
        }
    }
}
