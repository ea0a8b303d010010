// Delimiter-driven word tokenizer
//
// A forward scan with two states. While seeking, delimiters are skipped; the
// first non-delimiter opens a word. While inside a word, the next delimiter
// closes it. ASCII bytes take a one-byte fast path; everything else is
// decoded so a malformed sequence is caught where it occurs.

use std::ops::Range;

use typefast_core::character::is_delimiter;
use typefast_core::policy::DelimiterPolicy;
use typefast_core::utf8::{self, DecodeError, to_lower_ascii_and_swedish};

use crate::TokenizeError;

/// Byte span of a word; `end` is the offset of its last byte (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WordSpan {
    pub start: usize,
    pub end: usize,
}

impl WordSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Half-open byte range, suitable for slicing.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end + 1
    }

    /// Length of the word in bytes.
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Cursor position from which to resume scanning.
    pub fn next_cursor(&self) -> usize {
        self.end + 1
    }
}

#[derive(Debug, Clone, Copy)]
enum ScanState {
    SeekingStart,
    InsideWord { start: usize },
}

/// Find the next word at or after `cursor`.
///
/// Returns `Ok(None)` once only delimiters remain. A word running up to the
/// end of `text` is closed at the last byte.
pub fn find_word(
    text: &[u8],
    policy: &DelimiterPolicy,
    cursor: usize,
) -> Result<Option<WordSpan>, TokenizeError> {
    let mut state = ScanState::SeekingStart;
    let mut pos = cursor;

    while pos < text.len() {
        let byte = text[pos];
        let (codepoint, len) = if byte.is_ascii() {
            (u32::from(byte), 1)
        } else {
            let cp = utf8::decode(text, pos)
                .map_err(|source| TokenizeError::Malformed { offset: pos, source })?;
            (cp.value, cp.len)
        };

        match (state, is_delimiter(codepoint, policy)) {
            (ScanState::SeekingStart, false) => {
                state = ScanState::InsideWord { start: pos };
            }
            (ScanState::InsideWord { start }, true) => {
                return Ok(Some(WordSpan::new(start, pos - 1)));
            }
            _ => {}
        }
        pos += len;
    }

    match state {
        ScanState::InsideWord { start } => Ok(Some(WordSpan::new(start, text.len() - 1))),
        ScanState::SeekingStart => Ok(None),
    }
}

/// Copy the word at `span` out of `text`, lowercasing it if the policy asks.
pub fn extract_word(
    text: &[u8],
    span: WordSpan,
    policy: &DelimiterPolicy,
) -> Result<String, TokenizeError> {
    let malformed = |source: DecodeError| TokenizeError::Malformed {
        offset: span.start + source.offset(),
        source,
    };
    let mut bytes = text[span.range()].to_vec();
    if policy.only_lowercase {
        to_lower_ascii_and_swedish(&mut bytes).map_err(malformed)?;
    }
    String::from_utf8(bytes).map_err(|e| {
        let offset = e.utf8_error().valid_up_to();
        let source = utf8::decode(e.as_bytes(), offset)
            .err()
            .unwrap_or(DecodeError::UnexpectedEnd {
                offset,
                expected: 1,
            });
        malformed(source)
    })
}

/// Iterate over every word of `text` under `policy`.
pub fn words<'a>(text: &'a [u8], policy: &'a DelimiterPolicy) -> Words<'a> {
    Words {
        text,
        policy,
        cursor: 0,
        done: false,
    }
}

/// Iterator returned by [`words`].
///
/// Yields each extracted word (already lowercased when the policy says so).
/// After an error is yielded the iterator is exhausted.
pub struct Words<'a> {
    text: &'a [u8],
    policy: &'a DelimiterPolicy,
    cursor: usize,
    done: bool,
}

impl Iterator for Words<'_> {
    type Item = Result<String, TokenizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = find_word(self.text, self.policy, self.cursor).and_then(|span| {
            span.map(|span| {
                self.cursor = span.next_cursor();
                extract_word(self.text, span, self.policy)
            })
            .transpose()
        });
        match result {
            Ok(Some(word)) => Some(Ok(word)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
