//! Delimiter Matcher
//!
//! Finds the balanced partner of an opening bracket, stepping over literals
//! and comments so that brackets inside them never disturb the depth count.
//! Works on raw text as well as on scrubbed text.

use crate::domain::scrub::{find_from, literal_close, CommentSyntax};
use serde::{Deserialize, Serialize};

/// One balanced region: `open` holds the opening delimiter, `close` its
/// partner. Always `open < close`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DelimiterSpan {
    pub open: usize,
    pub close: usize,
}

impl DelimiterSpan {
    /// Byte range covering both delimiters.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.open..self.close + 1
    }
}

/// Index of the delimiter closing the one at `open_index`, using C-like
/// literal and comment rules.
///
/// Returns `None` when `open_index` does not hold `open_ch` or the input
/// ends before the depth returns to zero.
pub fn find_matching(text: &str, open_index: usize, open_ch: char, close_ch: char) -> Option<usize> {
    find_matching_with(text, open_index, open_ch, close_ch, &CommentSyntax::C_LIKE)
}

/// [`find_matching`] with explicit lexical conventions.
pub fn find_matching_with(
    text: &str,
    open_index: usize,
    open_ch: char,
    close_ch: char,
    syntax: &CommentSyntax,
) -> Option<usize> {
    if !open_ch.is_ascii() || !close_ch.is_ascii() {
        return None;
    }
    let (open_b, close_b) = (open_ch as u8, close_ch as u8);
    let bytes = text.as_bytes();
    if bytes.get(open_index) != Some(&open_b) {
        return None;
    }

    let mut depth = 0usize;
    let mut i = open_index;
    while i < bytes.len() {
        let b = bytes[i];
        if b == open_b {
            depth += 1;
        } else if b == close_b {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        } else if b == b'"' || b == b'\'' {
            i = literal_close(bytes, i, syntax.backslash_escapes)?;
        } else if let Some((open, close)) = syntax.block_open_at(bytes, i) {
            let p = find_from(bytes, i + open.len(), close.as_bytes())?;
            i = p + close.len() - 1;
        } else if syntax.line_comment_at(bytes, i) {
            i = find_from(bytes, i, b"\n")?;
        }
        i += 1;
    }
    None
}

/// Balanced span starting at `open_index`, if there is one.
pub fn match_span(text: &str, open_index: usize, open_ch: char, close_ch: char) -> Option<DelimiterSpan> {
    find_matching(text, open_index, open_ch, close_ch).map(|close| DelimiterSpan {
        open: open_index,
        close,
    })
}
