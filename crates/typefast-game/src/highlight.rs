// Prefix match between the input buffer and a scrolling word.
//
// Both strings are walked codepoint by codepoint from the start. A codepoint
// matches when its value and its encoded length agree. The count drives the
// two-colour split of the word when it is drawn.

use typefast_core::utf8;

/// Number of leading codepoints shared by `input` and `word`.
///
/// Stops at the first mismatch or when either side runs out.
pub fn highlight_count(input: &str, word: &str) -> usize {
    let (input, word) = (input.as_bytes(), word.as_bytes());
    let (mut i, mut w) = (0, 0);
    let mut count = 0;
    while i < input.len() && w < word.len() {
        let (Ok(a), Ok(b)) = (utf8::decode(input, i), utf8::decode(word, w)) else {
            break;
        };
        if a.value != b.value || a.len != b.len {
            break;
        }
        i += a.len;
        w += b.len;
        count += 1;
    }
    count
}

/// Split `word` after its first `count` codepoints.
///
/// Returns the matched prefix and the remainder. A count past the end puts
/// the whole word in the prefix.
pub fn split_highlight(word: &str, count: usize) -> (&str, &str) {
    let prefix = utf8::substring(word, 0, count);
    (prefix, &word[prefix.len()..])
}
