//! Char-boundary-safe string helpers shared by the aggregator and the memory writer.

/// Return the longest prefix of `s` holding at most `max_chars` characters.
///
/// Never splits a UTF-8 sequence. The result is always a prefix of `s`.
pub fn char_prefix(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}
