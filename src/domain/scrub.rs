//! Text Scrubber
//!
//! Blanks comments and literal contents while keeping every byte offset and
//! every newline where it was, so spans found on the scrubbed text can be
//! used to slice the raw source.

/// Lexical conventions the scrubber and the delimiter matcher honour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSyntax {
    /// Block comment open/close markers.
    pub block: Option<(&'static str, &'static str)>,
    /// Marker that comments out the rest of the line.
    pub line: Option<&'static str>,
    /// Characters that comment out a whole line when they are its first
    /// non-blank character.
    pub full_line: &'static [u8],
    /// Whether `\` escapes the next character inside a literal.
    pub backslash_escapes: bool,
    /// Whether a line may open with a six-digit sequence number (COBOL
    /// columns 1-6); the full-line test then looks past it.
    pub sequence_area: bool,
}

impl CommentSyntax {
    pub const C_LIKE: CommentSyntax = CommentSyntax {
        block: Some(("/*", "*/")),
        line: Some("//"),
        full_line: &[],
        backslash_escapes: true,
        sequence_area: false,
    };

    pub const COBOL: CommentSyntax = CommentSyntax {
        block: None,
        line: Some("*>"),
        full_line: b"*/",
        backslash_escapes: false,
        sequence_area: true,
    };

    /// Open/close markers of the block comment starting at `i`, if one does.
    pub(crate) fn block_open_at(&self, bytes: &[u8], i: usize) -> Option<(&'static str, &'static str)> {
        self.block
            .filter(|(open, _)| bytes[i..].starts_with(open.as_bytes()))
    }

    pub(crate) fn line_comment_at(&self, bytes: &[u8], i: usize) -> bool {
        self.line
            .is_some_and(|marker| bytes[i..].starts_with(marker.as_bytes()))
    }
}

/// Index of the quote closing the literal opened at `start`, or `None` when
/// the literal runs off the end of the input.
pub(crate) fn literal_close(bytes: &[u8], start: usize, backslash_escapes: bool) -> Option<usize> {
    let quote = bytes[start];
    let mut j = start + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' if backslash_escapes => j += 2,
            b if b == quote => return Some(j),
            _ => j += 1,
        }
    }
    None
}

/// Position of the first `needle` at or after `from`.
pub(crate) fn find_from(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if from >= bytes.len() {
        return None;
    }
    bytes[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}

fn line_end(bytes: &[u8], from: usize) -> usize {
    find_from(bytes, from, b"\n").unwrap_or(bytes.len())
}

/// Whether a six-digit sequence number starts at line start `i`.
fn sequence_number_at(bytes: &[u8], i: usize) -> bool {
    let at_line_start = i == 0 || bytes[i - 1] == b'\n';
    at_line_start && bytes.len() >= i + 6 && bytes[i..i + 6].iter().all(u8::is_ascii_digit)
}

/// Replace comments and literal contents with blanks.
///
/// The result has the same byte length as `source`; newlines inside
/// comments survive and no bracket or quote character remains inside a
/// blanked region. Literal delimiters are kept so callers can still see
/// where a literal starts. Unterminated comments and literals extend to the
/// end of the input.
pub fn scrub(source: &str, syntax: &CommentSyntax) -> String {
    let bytes = source.as_bytes();
    let n = bytes.len();
    let mut out = String::with_capacity(n);
    let mut copied = 0;
    let mut i = 0;
    let mut line_is_blank = true;

    while i < n {
        if syntax.sequence_area && sequence_number_at(bytes, i) {
            i += 6;
            continue;
        }
        let b = bytes[i];

        let blank = if line_is_blank && syntax.full_line.contains(&b) {
            Some((i, line_end(bytes, i)))
        } else if let Some((open, close)) = syntax.block_open_at(bytes, i) {
            let end = find_from(bytes, i + open.len(), close.as_bytes())
                .map_or(n, |p| p + close.len());
            Some((i, end))
        } else if syntax.line_comment_at(bytes, i) {
            Some((i, line_end(bytes, i)))
        } else if b == b'"' || b == b'\'' {
            let close = literal_close(bytes, i, syntax.backslash_escapes);
            let end = close.map_or(n, |c| c + 1);
            push_verbatim(&mut out, source, copied, i + 1);
            copied = i + 1;
            let interior_end = close.unwrap_or(n);
            push_blanked(&mut out, &source[copied..interior_end]);
            copied = interior_end;
            line_is_blank = false;
            i = end;
            continue;
        } else {
            None
        };

        match blank {
            Some((start, end)) => {
                push_verbatim(&mut out, source, copied, start);
                push_blanked(&mut out, &source[start..end]);
                copied = end;
                i = end;
            }
            None => {
                if b == b'\n' {
                    line_is_blank = true;
                } else if !b.is_ascii_whitespace() {
                    line_is_blank = false;
                }
                i += 1;
            }
        }
    }

    push_verbatim(&mut out, source, copied, n);
    out
}

fn push_verbatim(out: &mut String, source: &str, from: usize, to: usize) {
    if from < to {
        out.push_str(&source[from..to]);
    }
}

fn push_blanked(out: &mut String, region: &str) {
    for ch in region.chars() {
        match ch {
            '\n' | '\r' => out.push(ch),
            _ => out.extend(std::iter::repeat(' ').take(ch.len_utf8())),
        }
    }
}
