//! Lexer for YAML lines.
//!
//! The document is scanned one logical line at a time. Each scan is a small
//! state machine that tracks whether it is inside a quoted scalar, so that a
//! `:` or `#` inside quotes is never mistaken for a key separator or the
//! start of a comment.

/// Lexical analysis: the variants are different kinds of "tokens".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // Structural
    /// Root node of the syntax tree
    ROOT = 0,
    /// A line holding nothing but whitespace
    BLANK_LINE,
    /// A line holding only a comment
    COMMENT_LINE,
    /// A `key: value` line
    ENTRY,
    /// A `key:` line opening a nested block
    GROUP,
    /// Any other line (sequence items, block scalar content, markers)
    TEXT_LINE,

    // Tokens
    /// Leading whitespace that determines nesting
    INDENT,
    /// A mapping key, verbatim
    KEY,
    /// Colon separating key and value
    COLON,
    /// A scalar value, verbatim (may span lines when quoted)
    VALUE,
    /// Opaque line content that is not a mapping entry
    TEXT,
    /// Comments starting with '#'
    COMMENT,
    /// Spaces and tabs
    WHITESPACE,
    /// Newline characters
    NEWLINE,
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl SyntaxKind {
    /// Whether this kind is one of the per-line nodes.
    pub fn is_line(self) -> bool {
        matches!(
            self,
            SyntaxKind::BLANK_LINE
                | SyntaxKind::COMMENT_LINE
                | SyntaxKind::ENTRY
                | SyntaxKind::GROUP
                | SyntaxKind::TEXT_LINE
        )
    }

    pub(crate) fn from_raw(raw: u16) -> Self {
        use SyntaxKind::*;
        match raw {
            0 => ROOT,
            1 => BLANK_LINE,
            2 => COMMENT_LINE,
            3 => ENTRY,
            4 => GROUP,
            5 => TEXT_LINE,
            6 => INDENT,
            7 => KEY,
            8 => COLON,
            9 => VALUE,
            10 => TEXT,
            11 => COMMENT,
            12 => WHITESPACE,
            _ => NEWLINE,
        }
    }
}

/// Width of the leading run of spaces and tabs.
pub fn indent_width(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b' ' || *b == b'\t').count()
}

/// Number of leading whitespace bytes (spaces and tabs only).
pub(crate) fn whitespace_len(text: &str) -> usize {
    indent_width(text)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Plain,
    Double,
    Single,
}

/// Outcome of scanning a scalar and its trailing comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Scan {
    /// End of the scalar region, before any comment (untrimmed).
    pub content_end: usize,
    /// Start of the trailing comment, if any.
    pub comment: Option<usize>,
    /// End of the logical line: the offset of its `\n`, or the text length.
    pub line_end: usize,
    /// Whether every quoted region was closed.
    pub terminated: bool,
}

/// Scan a scalar starting at the beginning of `text`.
///
/// Without `multiline`, scanning always stops at the first newline and an
/// open quote there is reported as unterminated. With `multiline`, an open
/// quote carries the scan over to the following lines until it closes. A
/// quote that closes on a later line must end the scalar (only whitespace or
/// a comment may follow it); otherwise the quote is reported as unterminated.
pub(crate) fn scan_scalar(text: &str, multiline: bool) -> Scan {
    let bytes = text.as_bytes();
    let mut state = State::Plain;
    let mut after_space = true;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match state {
            State::Plain => match b {
                b'\n' => {
                    return Scan {
                        content_end: i,
                        comment: None,
                        line_end: i,
                        terminated: true,
                    }
                }
                b'#' if after_space => {
                    let line_end = text[i..].find('\n').map_or(text.len(), |n| i + n);
                    return Scan {
                        content_end: i,
                        comment: Some(i),
                        line_end,
                        terminated: true,
                    };
                }
                b'"' if after_space => state = State::Double,
                b'\'' if after_space => state = State::Single,
                _ => {}
            },
            State::Double => match b {
                b'\n' if !multiline => break,
                b'\\' => {
                    // The escaped byte is skipped, including an escaped line break.
                    if i + 1 < bytes.len() && (bytes[i + 1] != b'\n' || multiline) {
                        i += 1;
                    }
                }
                b'"' if !closes_multiline(text, i) => break,
                b'"' => state = State::Plain,
                _ => {}
            },
            State::Single => match b {
                b'\n' if !multiline => break,
                b'\'' => {
                    if bytes.get(i + 1) == Some(&b'\'') {
                        i += 1;
                    } else if !closes_multiline(text, i) {
                        break;
                    } else {
                        state = State::Plain;
                    }
                }
                _ => {}
            },
        }
        after_space = b == b' ' || b == b'\t';
        i += 1;
    }

    let line_end = if state == State::Plain {
        text.len()
    } else {
        text.find('\n').unwrap_or(text.len())
    };
    Scan {
        content_end: line_end,
        comment: None,
        line_end,
        terminated: state == State::Plain,
    }
}

/// Whether the closing quote at `quote` may end a quoted region. Quotes
/// closing on the first line always may; on a later line the rest of that
/// line must be empty or a comment.
fn closes_multiline(text: &str, quote: usize) -> bool {
    if !text[..quote].contains('\n') {
        return true;
    }
    let rest = &text[quote + 1..];
    let gap = whitespace_len(rest);
    match rest.as_bytes().get(gap) {
        None | Some(b'\n') => true,
        Some(b'#') => gap > 0,
        Some(_) => false,
    }
}

/// Find the colon that separates a mapping key from its value.
///
/// `text` is a single line with indentation already removed. The colon must
/// be followed by whitespace or the end of the line, and must not sit inside
/// a quoted key or a comment.
pub(crate) fn find_key_colon(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = 0;

    if let Some(&quote) = bytes.first().filter(|b| **b == b'"' || **b == b'\'') {
        i = 1;
        loop {
            match bytes.get(i) {
                None | Some(b'\n') => return None,
                Some(b'\\') if quote == b'"' => i += 2,
                Some(&b) if b == quote => {
                    if quote == b'\'' && bytes.get(i + 1) == Some(&b'\'') {
                        i += 2;
                    } else {
                        i += 1;
                        break;
                    }
                }
                Some(_) => i += 1,
            }
        }
    }

    let mut after_space = false;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => return None,
            b'#' if after_space => return None,
            b':' => match bytes.get(i + 1) {
                None | Some(b' ') | Some(b'\t') | Some(b'\n') => return Some(i),
                _ => {}
            },
            _ => {}
        }
        after_space = bytes[i] == b' ' || bytes[i] == b'\t';
        i += 1;
    }
    None
}

/// Whether a line (without indentation) starts something other than a
/// mapping entry: sequence items, complex keys, flow collections, document
/// markers and directives.
pub(crate) fn is_non_mapping_line(text: &str) -> bool {
    let marker = |prefix: &str| {
        text.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', '\t', '\n']))
    };
    marker("-")
        || marker("?")
        || marker("---")
        || marker("...")
        || text.starts_with(['[', '{', '%'])
}

/// Whether a line (without indentation) is a sequence item.
pub(crate) fn is_sequence_item(text: &str) -> bool {
    text.strip_prefix('-')
        .is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', '\t', '\n']))
}

/// Split leading node properties (anchors `&name` and tags `!tag`) from a
/// value. Returns the properties, including the whitespace that follows
/// them, and the remaining content.
pub fn split_properties(value: &str) -> (&str, &str) {
    let mut offset = 0;
    loop {
        let rest = &value[offset..];
        if !rest.starts_with(['&', '!']) {
            break;
        }
        let token_len = rest
            .find(|c: char| c == ' ' || c == '\t')
            .unwrap_or(rest.len());
        offset += token_len;
        offset += whitespace_len(&value[offset..]);
    }
    value.split_at(offset)
}

/// Whether a value introduces a literal (`|`) or folded (`>`) block scalar.
pub(crate) fn starts_block_scalar(value: &str) -> bool {
    let (_, content) = split_properties(value);
    let mut chars = content.chars();
    matches!(chars.next(), Some('|') | Some('>'))
        && chars.all(|c| c.is_ascii_digit() || c == '+' || c == '-')
}

/// Remove surrounding quotes from a key, undoing the quote escapes.
pub fn unquote_key(key: &str) -> String {
    if key.len() >= 2 && key.starts_with('"') && key.ends_with('"') {
        let inner = &key[1..key.len() - 1];
        let mut result = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(ch) = chars.next() {
            if ch == '\\' {
                match chars.next() {
                    Some('n') => result.push('\n'),
                    Some('t') => result.push('\t'),
                    Some(other) => result.push(other),
                    None => result.push('\\'),
                }
            } else {
                result.push(ch);
            }
        }
        result
    } else if key.len() >= 2 && key.starts_with('\'') && key.ends_with('\'') {
        key[1..key.len() - 1].replace("''", "'")
    } else {
        key.to_string()
    }
}
