// Live input buffer
//
// Holds the text the player is typing. Keystrokes arrive as codepoints or as
// raw UTF-8 bytes from the keyboard collaborator. A keystroke that fails to
// decode, is not printable, or would overflow the buffer is rejected and the
// buffer is left as it was.

use typefast_core::MAX_WORD_BYTES;
use typefast_core::event::{BoundedText, CapacityError, Event};
use typefast_core::utf8::{self, DecodeError, EncodeError};

/// First printable codepoint; space and control characters sit below it.
const FIRST_PRINTABLE: u32 = 0x21;
const DELETE: u32 = 0x7F;

/// Why a keystroke was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("malformed keyboard input: {0}")]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error("input buffer full: {0}")]
    Capacity(#[from] CapacityError),
    #[error("codepoint U+{0:04X} is not printable")]
    NotPrintable(u32),
}

/// Text typed so far, at most [`MAX_WORD_BYTES`] bytes.
///
/// Not safe for concurrent mutation; it is owned by a single game session.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one codepoint.
    ///
    /// Returns [`Event::FirstLetterTyped`] when the buffer was empty before
    /// the push.
    pub fn push_codepoint(&mut self, codepoint: u32) -> Result<Option<Event>, InputError> {
        if codepoint < FIRST_PRINTABLE || codepoint == DELETE {
            return Err(InputError::NotPrintable(codepoint));
        }
        let encoded = utf8::encode(codepoint)?;
        // Surrogates encode but are not scalar values.
        let c = char::from_u32(codepoint).ok_or(InputError::NotPrintable(codepoint))?;
        let len = self.text.len() + encoded.len();
        if len > MAX_WORD_BYTES {
            return Err(CapacityError {
                len,
                max: MAX_WORD_BYTES,
            }
            .into());
        }
        debug_assert_eq!(c.len_utf8(), encoded.len());

        let first = self.text.is_empty();
        self.text.push(c);
        Ok(first.then_some(Event::FirstLetterTyped(c)))
    }

    /// Decode one codepoint from the start of `bytes` and append it.
    pub fn push_utf8(&mut self, bytes: &[u8]) -> Result<Option<Event>, InputError> {
        let codepoint = utf8::decode(bytes, 0)?;
        self.push_codepoint(codepoint.value)
    }

    /// Remove the last codepoint. Returns `false` if the buffer was empty.
    pub fn backspace(&mut self) -> bool {
        let back = utf8::seek_back_one_codepoint(self.text.as_bytes(), self.text.len());
        if back == 0 {
            return false;
        }
        self.text.truncate(self.text.len() - back);
        true
    }

    /// Take the buffer contents as a [`Event::WordTyped`], leaving it empty.
    ///
    /// An empty buffer submits nothing.
    pub fn submit(&mut self) -> Result<Option<Event>, InputError> {
        if self.text.is_empty() {
            return Ok(None);
        }
        let word = BoundedText::new(std::mem::take(&mut self.text))?;
        Ok(Some(Event::WordTyped(word)))
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}
