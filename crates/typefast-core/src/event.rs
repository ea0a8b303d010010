// Game event envelope and bounded word text
//
// Events are created by the input buffer and the scrolling-word pool,
// consumed exactly once by the session's event pass, then dropped.

use std::fmt;
use std::ops::Deref;

use crate::MAX_WORD_BYTES;

/// Error returned when text would exceed its fixed byte capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("text of {len} bytes exceeds capacity of {max} bytes")]
pub struct CapacityError {
    pub len: usize,
    pub max: usize,
}

// ---------------------------------------------------------------------------
// BoundedText
// ---------------------------------------------------------------------------

/// Owned UTF-8 text of at most [`MAX_WORD_BYTES`] bytes.
///
/// The bound is checked at construction; oversized text is rejected rather
/// than truncated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BoundedText(String);

impl BoundedText {
    /// Wrap `text`, failing if it is longer than [`MAX_WORD_BYTES`].
    pub fn new(text: impl Into<String>) -> Result<Self, CapacityError> {
        Self::with_capacity_limit(text, MAX_WORD_BYTES)
    }

    /// Wrap `text` with a custom byte limit.
    pub fn with_capacity_limit(text: impl Into<String>, max: usize) -> Result<Self, CapacityError> {
        let text = text.into();
        if text.len() > max {
            return Err(CapacityError {
                len: text.len(),
                max,
            });
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for BoundedText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for BoundedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoundedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for BoundedText {
    type Error = CapacityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for BoundedText {
    type Error = CapacityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// Something that happened during a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The player submitted the input buffer (space or enter).
    WordTyped(BoundedText),
    /// A scrolling word left the screen without being typed.
    WordMissed(BoundedText),
    /// A submitted word matched a scrolling word, which was consumed.
    WordHit(BoundedText),
    /// A codepoint was typed into an empty input buffer.
    FirstLetterTyped(char),
}

impl Event {
    /// Word payload, if the event carries one.
    pub fn word(&self) -> Option<&str> {
        match self {
            Event::WordTyped(w) | Event::WordMissed(w) | Event::WordHit(w) => Some(w.as_str()),
            Event::FirstLetterTyped(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_text_accepts_up_to_capacity() {
        let text = "a".repeat(MAX_WORD_BYTES);
        let bounded = BoundedText::new(text.clone()).unwrap();
        assert_eq!(bounded.as_str(), text);
        assert_eq!(bounded.len(), MAX_WORD_BYTES);
    }

    #[test]
    fn bounded_text_rejects_overflow() {
        let err = BoundedText::new("a".repeat(MAX_WORD_BYTES + 1)).unwrap_err();
        assert_eq!(
            err,
            CapacityError {
                len: MAX_WORD_BYTES + 1,
                max: MAX_WORD_BYTES
            }
        );
    }

    #[test]
    fn bounded_text_counts_bytes_not_chars() {
        // 20 x "ö" is 40 bytes; 21 is 42.
        assert!(BoundedText::new("ö".repeat(20)).is_ok());
        assert!(BoundedText::new("ö".repeat(21)).is_err());
    }

    #[test]
    fn custom_limit() {
        assert!(BoundedText::with_capacity_limit("abc", 3).is_ok());
        assert!(BoundedText::with_capacity_limit("abcd", 3).is_err());
    }

    #[test]
    fn event_word_payload() {
        let word = BoundedText::new("apple").unwrap();
        assert_eq!(Event::WordMissed(word.clone()).word(), Some("apple"));
        assert_eq!(Event::WordHit(word).word(), Some("apple"));
        assert_eq!(Event::FirstLetterTyped('a').word(), None);
    }
}
