// UTF-8 codepoint codec
//
// Byte-exact decoding and encoding of single codepoints, plus the handful of
// helpers the game needs on top of them: backward seek for backspace,
// codepoint counting, index-to-offset mapping and borrowed substrings for the
// highlight split.

use crate::character::fold_codepoint;

/// First byte mask for 2-byte sequences (110xxxxx).
const MASK_2BYTE_FIRST: u32 = 0x1F;
/// First byte mask for 3-byte sequences (1110xxxx).
const MASK_3BYTE_FIRST: u32 = 0x0F;
/// First byte mask for 4-byte sequences (11110xxx).
const MASK_4BYTE_FIRST: u32 = 0x07;
/// Payload mask for continuation bytes (10xxxxxx).
const CONT_MASK: u32 = 0x3F;

/// Highest valid Unicode scalar value.
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// U+FFFD REPLACEMENT CHARACTER.
pub const REPLACEMENT_CHARACTER: u32 = 0xFFFD;

/// Returns `true` if `byte` is a continuation byte (top two bits `10`).
#[inline]
pub fn is_continuation(byte: u8) -> bool {
    byte & 0b1100_0000 == 0b1000_0000
}

// ============================================================================
// Codepoint
// ============================================================================

/// A decoded Unicode scalar value together with its encoded length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Codepoint {
    /// The scalar value.
    pub value: u32,
    /// Number of bytes the value occupies in UTF-8 (1-4).
    pub len: usize,
}

impl Codepoint {
    pub fn new(value: u32, len: usize) -> Self {
        Self { value, len }
    }

    /// Returns `true` for single-byte (ASCII) codepoints.
    pub fn is_ascii(&self) -> bool {
        self.len == 1
    }

    /// Convert to a `char`, if the value is a valid scalar value.
    pub fn to_char(self) -> Option<char> {
        char::from_u32(self.value)
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Error produced when a byte sequence is not well-formed UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid UTF-8 lead byte 0x{byte:02X} at offset {offset}")]
    InvalidLeadByte { byte: u8, offset: usize },
    #[error("invalid UTF-8 continuation byte 0x{byte:02X} at offset {offset}")]
    InvalidContinuation { byte: u8, offset: usize },
    #[error("truncated UTF-8 sequence at offset {offset}: expected {expected} bytes")]
    UnexpectedEnd { offset: usize, expected: usize },
    /// Overlong form, surrogate, or value above U+10FFFF.
    #[error("non-canonical UTF-8 sequence for 0x{value:X} at offset {offset}")]
    NonCanonical { value: u32, offset: usize },
}

impl DecodeError {
    /// Byte offset at which decoding failed.
    pub fn offset(&self) -> usize {
        match *self {
            DecodeError::InvalidLeadByte { offset, .. }
            | DecodeError::InvalidContinuation { offset, .. }
            | DecodeError::UnexpectedEnd { offset, .. }
            | DecodeError::NonCanonical { offset, .. } => offset,
        }
    }
}

/// Error produced when a value cannot be encoded as UTF-8.
///
/// The replacement character bytes are carried along so callers that want
/// lossy output can still write them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("codepoint 0x{codepoint:X} is above U+10FFFF")]
    OutOfRange { codepoint: u32, replacement: Encoded },
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode the codepoint starting at `offset` in `bytes`.
///
/// The sequence length is taken from the lead byte prefix (`0xxxxxxx`,
/// `110xxxxx`, `1110xxxx`, `11110xxx`); every following byte must be a
/// continuation byte whose low six bits are appended to the value. The result
/// must be the shortest encoding of a scalar value: overlong forms,
/// surrogates and values above U+10FFFF are [`DecodeError::NonCanonical`].
pub fn decode(bytes: &[u8], offset: usize) -> Result<Codepoint, DecodeError> {
    let Some(&lead) = bytes.get(offset) else {
        return Err(DecodeError::UnexpectedEnd {
            offset,
            expected: 1,
        });
    };
    let lead32 = u32::from(lead);

    // ASCII: no continuation bytes (most common).
    if lead & 0x80 == 0 {
        return Ok(Codepoint::new(lead32, 1));
    }

    let (len, mut value) = if lead & 0xE0 == 0xC0 {
        (2, lead32 & MASK_2BYTE_FIRST)
    } else if lead & 0xF0 == 0xE0 {
        (3, lead32 & MASK_3BYTE_FIRST)
    } else if lead & 0xF8 == 0xF0 {
        (4, lead32 & MASK_4BYTE_FIRST)
    } else {
        return Err(DecodeError::InvalidLeadByte { byte: lead, offset });
    };

    if offset + len > bytes.len() {
        return Err(DecodeError::UnexpectedEnd {
            offset,
            expected: len,
        });
    }

    for i in 1..len {
        let byte = bytes[offset + i];
        if !is_continuation(byte) {
            return Err(DecodeError::InvalidContinuation {
                byte,
                offset: offset + i,
            });
        }
        value = (value << 6) | (u32::from(byte) & CONT_MASK);
    }

    if encoded_len(value) != Some(len) {
        return Err(DecodeError::NonCanonical { value, offset });
    }
    Ok(Codepoint::new(value, len))
}

/// Canonical UTF-8 length of `value`, or `None` if it is not a scalar value.
fn encoded_len(value: u32) -> Option<usize> {
    match value {
        0..=0x7F => Some(1),
        0x80..=0x7FF => Some(2),
        0xD800..=0xDFFF => None,
        0x800..=0xFFFF => Some(3),
        0x1_0000..=MAX_CODEPOINT => Some(4),
        _ => None,
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// A single encoded codepoint (1-4 bytes) held inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Encoded {
    buf: [u8; 4],
    len: u8,
}

impl Encoded {
    /// The encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    /// Number of encoded bytes.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Bytes of U+FFFD.
const REPLACEMENT_BYTES: Encoded = Encoded {
    buf: [0xEF, 0xBF, 0xBD, 0],
    len: 3,
};

/// Encode `codepoint` as UTF-8.
///
/// Values above U+10FFFF are reported as [`EncodeError::OutOfRange`], which
/// carries the three replacement-character bytes.
pub fn encode(codepoint: u32) -> Result<Encoded, EncodeError> {
    let mut buf = [0u8; 4];
    let len = if codepoint <= 0x7F {
        buf[0] = codepoint as u8;
        1
    } else if codepoint <= 0x07FF {
        buf[0] = (((codepoint >> 6) & 0x1F) | 0xC0) as u8;
        buf[1] = ((codepoint & 0x3F) | 0x80) as u8;
        2
    } else if codepoint <= 0xFFFF {
        buf[0] = (((codepoint >> 12) & 0x0F) | 0xE0) as u8;
        buf[1] = (((codepoint >> 6) & 0x3F) | 0x80) as u8;
        buf[2] = ((codepoint & 0x3F) | 0x80) as u8;
        3
    } else if codepoint <= MAX_CODEPOINT {
        buf[0] = (((codepoint >> 18) & 0x07) | 0xF0) as u8;
        buf[1] = (((codepoint >> 12) & 0x3F) | 0x80) as u8;
        buf[2] = (((codepoint >> 6) & 0x3F) | 0x80) as u8;
        buf[3] = ((codepoint & 0x3F) | 0x80) as u8;
        4
    } else {
        return Err(EncodeError::OutOfRange {
            codepoint,
            replacement: REPLACEMENT_BYTES,
        });
    };
    Ok(Encoded { buf, len })
}

// ============================================================================
// Navigation
// ============================================================================

/// Number of bytes between `offset` and the start of the codepoint before it.
///
/// Scans backwards over continuation bytes. Used for backspace: truncating
/// the buffer by the returned count removes exactly one codepoint. Returns 0
/// at the start of the buffer.
pub fn seek_back_one_codepoint(bytes: &[u8], offset: usize) -> usize {
    let offset = offset.min(bytes.len());
    let mut pos = offset;
    while pos > 0 {
        pos -= 1;
        if !is_continuation(bytes[pos]) {
            break;
        }
    }
    offset - pos
}

/// Count the codepoints in `bytes`, stopping at the end or at a NUL byte.
///
/// Only lead bytes are inspected; the continuation bytes they announce are
/// skipped without validation.
pub fn codepoint_length(bytes: &[u8]) -> usize {
    let mut count = 0;
    let mut i = 0;
    while i < bytes.len() && bytes[i] != 0 {
        let byte = bytes[i];
        i += if byte & 0xF0 == 0xF0 {
            4
        } else if byte & 0xE0 == 0xE0 {
            3
        } else if byte & 0xC0 == 0xC0 {
            2
        } else {
            1
        };
        count += 1;
    }
    count
}

/// Byte offset of the codepoint at `index`, or `bytes.len()` when `index` is
/// at or past the end.
pub fn offset_of_index(bytes: &[u8], index: usize) -> Result<usize, DecodeError> {
    let mut offset = 0;
    let mut current = 0;
    while offset < bytes.len() && current < index {
        offset += decode(bytes, offset)?.len;
        current += 1;
    }
    Ok(offset)
}

/// Substring of `text` covering `count` codepoints starting at codepoint `from`.
///
/// Indices past the end are clamped, so the result may be shorter than `count`.
pub fn substring(text: &str, from: usize, count: usize) -> &str {
    let start = char_offset(text, from);
    let end = start + char_offset(&text[start..], count);
    &text[start..end]
}

/// Substring of `text` from codepoint `from` to the end.
pub fn substring_from(text: &str, from: usize) -> &str {
    &text[char_offset(text, from)..]
}

fn char_offset(text: &str, index: usize) -> usize {
    text.char_indices()
        .nth(index)
        .map_or(text.len(), |(offset, _)| offset)
}

/// Returns `true` if the whole of `bytes` decodes cleanly.
pub fn is_valid(bytes: &[u8]) -> bool {
    codepoints(bytes).all(|item| item.is_ok())
}

/// Iterate over `(offset, codepoint)` pairs of `bytes`.
///
/// Iteration stops after the first decode error, which is yielded once.
pub fn codepoints(bytes: &[u8]) -> Codepoints<'_> {
    Codepoints {
        bytes,
        offset: 0,
        failed: false,
    }
}

/// Iterator returned by [`codepoints`].
pub struct Codepoints<'a> {
    bytes: &'a [u8],
    offset: usize,
    failed: bool,
}

impl Iterator for Codepoints<'_> {
    type Item = Result<(usize, Codepoint), DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.bytes.len() {
            return None;
        }
        match decode(self.bytes, self.offset) {
            Ok(cp) => {
                let at = self.offset;
                self.offset += cp.len;
                Some(Ok((at, cp)))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

// ============================================================================
// Case folding
// ============================================================================

/// Lowercase `bytes` in place: ASCII `A-Z` and the Swedish capitals
/// Å, Ä, Ö. Every other codepoint is left untouched.
///
/// Each folded pair has the same encoded length, so the buffer never changes
/// size. The whole buffer is validated first; on error it is left untouched.
pub fn to_lower_ascii_and_swedish(bytes: &mut [u8]) -> Result<(), DecodeError> {
    if let Some(Err(e)) = codepoints(bytes).find(Result::is_err) {
        return Err(e);
    }
    let mut pos = 0;
    while pos < bytes.len() {
        let cp = decode(bytes, pos)?;
        if cp.is_ascii() {
            bytes[pos] = bytes[pos].to_ascii_lowercase();
        } else {
            let folded = fold_codepoint(cp.value);
            if folded != cp.value {
                match encode(folded) {
                    Ok(encoded) if encoded.len() == cp.len => {
                        bytes[pos..pos + cp.len].copy_from_slice(encoded.as_bytes());
                    }
                    _ => {
                        return Err(DecodeError::NonCanonical {
                            value: cp.value,
                            offset: pos,
                        });
                    }
                }
            }
        }
        pos += cp.len;
    }
    Ok(())
}
