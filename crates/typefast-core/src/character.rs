// Character classification and Swedish case folding
//
// The tokenizer works byte-wise on ASCII and codepoint-wise on everything
// else. ASCII bytes are classified with the C locale rules (alpha, digit,
// punct, space); non-ASCII codepoints are letters only if they are one of
// the six Swedish letters below.

use crate::policy::DelimiterPolicy;

// ---------------------------------------------------------------------------
// Swedish letters
// ---------------------------------------------------------------------------

/// Lowercase Swedish letters: å ä ö
const SWEDISH_LOWER: [u32; 3] = [0xE5, 0xE4, 0xF6];

/// Uppercase Swedish letters, index-aligned with [`SWEDISH_LOWER`]: Å Ä Ö
const SWEDISH_UPPER: [u32; 3] = [0xC5, 0xC4, 0xD6];

/// Returns `true` for å ä ö Å Ä Ö.
pub fn is_swedish_letter(codepoint: u32) -> bool {
    SWEDISH_LOWER.contains(&codepoint) || SWEDISH_UPPER.contains(&codepoint)
}

/// Fold one codepoint to lowercase using the bounded table: ASCII `A-Z` and
/// Å Ä Ö. Everything else is returned unchanged.
pub fn fold_codepoint(codepoint: u32) -> u32 {
    if (0x41..=0x5A).contains(&codepoint) {
        return codepoint + 0x20;
    }
    match SWEDISH_UPPER.iter().position(|&upper| upper == codepoint) {
        Some(index) => SWEDISH_LOWER[index],
        None => codepoint,
    }
}

/// `char` version of [`fold_codepoint`].
pub fn fold_char(c: char) -> char {
    char::from_u32(fold_codepoint(c as u32)).unwrap_or(c)
}

// ---------------------------------------------------------------------------
// Byte classes
// ---------------------------------------------------------------------------

/// Class of a single ASCII byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// `A-Z`, `a-z`
    Letter,
    /// `0-9`
    Digit,
    /// Space, tab, newline, vertical tab, form feed, carriage return.
    Whitespace,
    /// Printable ASCII that is neither alphanumeric nor space.
    Punctuation,
    /// Control characters and every byte above 0x7F.
    Other,
}

/// Classify an ASCII byte.
pub fn char_class(byte: u8) -> CharClass {
    if byte.is_ascii_alphabetic() {
        CharClass::Letter
    } else if byte.is_ascii_digit() {
        CharClass::Digit
    } else if is_space(byte) {
        CharClass::Whitespace
    } else if byte.is_ascii_punctuation() {
        CharClass::Punctuation
    } else {
        CharClass::Other
    }
}

/// C-locale `isspace`: includes the vertical tab, unlike
/// [`u8::is_ascii_whitespace`].
pub fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Whether an ASCII byte may appear inside a word under `policy`.
///
/// Letters always may; digits, punctuation, hyphens and apostrophes only when
/// the policy allows them. Hyphen and apostrophe are punctuation too, so
/// `allow_punctuation` admits them regardless of their own flags.
pub fn is_valid_letter(byte: u8, policy: &DelimiterPolicy) -> bool {
    match char_class(byte) {
        CharClass::Letter => true,
        CharClass::Digit => policy.allow_digits,
        CharClass::Punctuation => {
            policy.allow_punctuation
                || (policy.allow_hyphen && byte == b'-')
                || (policy.allow_apostrophe && byte == b'\'')
        }
        CharClass::Whitespace | CharClass::Other => false,
    }
}

/// Whether a decoded codepoint separates words under `policy`.
pub fn is_delimiter(codepoint: u32, policy: &DelimiterPolicy) -> bool {
    match u8::try_from(codepoint) {
        Ok(byte) if byte.is_ascii() => is_space(byte) || !is_valid_letter(byte, policy),
        _ => !is_swedish_letter(codepoint),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_allowed() -> DelimiterPolicy {
        DelimiterPolicy {
            only_lowercase: false,
            allow_apostrophe: true,
            allow_hyphen: true,
            allow_punctuation: true,
            allow_digits: true,
        }
    }

    // -- Swedish letters --

    #[test]
    fn swedish_letters() {
        for c in ['å', 'ä', 'ö', 'Å', 'Ä', 'Ö'] {
            assert!(is_swedish_letter(c as u32), "{c}");
        }
        assert!(!is_swedish_letter('é' as u32));
        assert!(!is_swedish_letter('a' as u32));
    }

    #[test]
    fn fold_table() {
        assert_eq!(fold_char('A'), 'a');
        assert_eq!(fold_char('Z'), 'z');
        assert_eq!(fold_char('Å'), 'å');
        assert_eq!(fold_char('Ä'), 'ä');
        assert_eq!(fold_char('Ö'), 'ö');
        assert_eq!(fold_char('É'), 'É');
        assert_eq!(fold_char('ö'), 'ö');
        assert_eq!(fold_char('1'), '1');
    }

    // -- byte classes --

    #[test]
    fn classes() {
        assert_eq!(char_class(b'q'), CharClass::Letter);
        assert_eq!(char_class(b'Q'), CharClass::Letter);
        assert_eq!(char_class(b'7'), CharClass::Digit);
        assert_eq!(char_class(b'\t'), CharClass::Whitespace);
        assert_eq!(char_class(0x0B), CharClass::Whitespace);
        assert_eq!(char_class(b'!'), CharClass::Punctuation);
        assert_eq!(char_class(b'~'), CharClass::Punctuation);
        assert_eq!(char_class(0x00), CharClass::Other);
        assert_eq!(char_class(0xC3), CharClass::Other);
    }

    #[test]
    fn valid_letter_default_policy() {
        let policy = DelimiterPolicy::default();
        assert!(is_valid_letter(b'a', &policy));
        assert!(!is_valid_letter(b'1', &policy));
        assert!(!is_valid_letter(b'-', &policy));
        assert!(!is_valid_letter(b'\'', &policy));
        assert!(!is_valid_letter(b'.', &policy));
    }

    #[test]
    fn valid_letter_permissive_policy() {
        let policy = all_allowed();
        assert!(is_valid_letter(b'1', &policy));
        assert!(is_valid_letter(b'-', &policy));
        assert!(is_valid_letter(b'.', &policy));
        assert!(!is_valid_letter(b' ', &policy));
    }

    #[test]
    fn hyphen_and_apostrophe_flags_are_independent() {
        let policy = DelimiterPolicy {
            allow_hyphen: true,
            ..DelimiterPolicy::default()
        };
        assert!(is_valid_letter(b'-', &policy));
        assert!(!is_valid_letter(b'\'', &policy));
        assert!(!is_valid_letter(b',', &policy));
    }

    #[test]
    fn delimiters() {
        let policy = DelimiterPolicy::default();
        assert!(is_delimiter(' ' as u32, &policy));
        assert!(is_delimiter('\n' as u32, &policy));
        assert!(is_delimiter(',' as u32, &policy));
        assert!(!is_delimiter('x' as u32, &policy));
        assert!(!is_delimiter('ä' as u32, &policy));
        assert!(is_delimiter('é' as u32, &policy));
        assert!(is_delimiter('€' as u32, &policy));
    }
}
