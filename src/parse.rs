//! Parser types and utilities.

use crate::lex::{self, SyntaxKind};
use crate::PositionedParseError;
use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// The result of a parse operation.
///
/// Parsing never fails: problems such as an unterminated quote are recovered
/// from and reported here, while the tree still reproduces the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse<T> {
    green_node: GreenNode,
    errors: Vec<String>,
    positioned_errors: Vec<PositionedParseError>,
    _ty: std::marker::PhantomData<fn() -> T>,
}

impl<T> Parse<T> {
    pub(crate) fn new_with_positioned_errors(
        green_node: GreenNode,
        errors: Vec<String>,
        positioned_errors: Vec<PositionedParseError>,
    ) -> Self {
        Parse {
            green_node,
            errors,
            positioned_errors,
            _ty: std::marker::PhantomData,
        }
    }

    /// The green tree produced by the parser.
    pub fn green_node(&self) -> &GreenNode {
        &self.green_node
    }

    /// Recovered problems, if any.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Recovered problems with location information.
    pub fn positioned_errors(&self) -> &[PositionedParseError] {
        &self.positioned_errors
    }

    /// Whether the parser had to recover from anything.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl Parse<crate::YamlContents> {
    /// Parse YAML text, returning a Parse result
    pub fn parse_yaml(text: &str) -> Self {
        let normalized;
        let text = if text.contains("\r\n") {
            normalized = text.replace("\r\n", "\n");
            normalized.as_str()
        } else {
            text
        };
        Parser::new(text).parse()
    }

    /// The parsed document.
    pub fn tree(&self) -> crate::YamlContents {
        crate::YamlContents::from_green(self.green_node.clone())
    }
}

/// Internal parser state
struct Parser<'a> {
    text: &'a str,
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<String>,
    positioned_errors: Vec<PositionedParseError>,
    /// Indentation of the key owning the block scalar being read, if any.
    block_scalar_indent: Option<usize>,
    line_number: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
            positioned_errors: Vec::new(),
            block_scalar_indent: None,
            line_number: 1,
        }
    }

    fn parse(mut self) -> Parse<crate::YamlContents> {
        self.builder.start_node(SyntaxKind::ROOT.into());
        while self.pos < self.text.len() {
            self.parse_line();
        }
        self.builder.finish_node();

        tracing::trace!(
            lines = self.line_number,
            recovered = self.errors.len(),
            "parsed YAML document"
        );

        Parse::new_with_positioned_errors(
            self.builder.finish(),
            self.errors,
            self.positioned_errors,
        )
    }

    /// The physical line starting at the cursor, without its newline.
    fn current_line(&self) -> &'a str {
        let rest = &self.text[self.pos..];
        match rest.find('\n') {
            Some(end) => &rest[..end],
            None => rest,
        }
    }

    fn token(&mut self, kind: SyntaxKind, len: usize) {
        if len > 0 {
            let text = &self.text[self.pos..self.pos + len];
            self.builder.token(kind.into(), text);
            self.pos += len;
        }
    }

    /// Consume the newline ending the current line, if there is one.
    fn finish_line(&mut self) {
        if self.text[self.pos..].starts_with('\n') {
            self.token(SyntaxKind::NEWLINE, 1);
            self.line_number += 1;
        }
        self.builder.finish_node();
    }

    fn parse_line(&mut self) {
        let line = self.current_line();
        let indent = lex::indent_width(line);
        let content = &line[indent..];

        if let Some(owner_indent) = self.block_scalar_indent {
            if !content.is_empty() && indent <= owner_indent {
                self.block_scalar_indent = None;
            } else if !content.is_empty() {
                self.builder.start_node(SyntaxKind::TEXT_LINE.into());
                self.token(SyntaxKind::INDENT, indent);
                self.token(SyntaxKind::TEXT, content.len());
                self.finish_line();
                return;
            }
        }

        if content.is_empty() {
            self.builder.start_node(SyntaxKind::BLANK_LINE.into());
            self.token(SyntaxKind::WHITESPACE, indent);
        } else if content.starts_with('#') {
            self.builder.start_node(SyntaxKind::COMMENT_LINE.into());
            self.token(SyntaxKind::INDENT, indent);
            self.token(SyntaxKind::COMMENT, content.len());
        } else if lex::is_non_mapping_line(content) {
            self.parse_text_line(indent);
        } else if let Some(colon) = lex::find_key_colon(content) {
            self.parse_mapping_line(indent, colon);
        } else {
            self.parse_text_line(indent);
        }
        self.finish_line();
    }

    fn parse_text_line(&mut self, indent: usize) {
        self.builder.start_node(SyntaxKind::TEXT_LINE.into());
        self.token(SyntaxKind::INDENT, indent);
        let line = &self.text[self.pos..self.pos + self.current_line().len()];
        let scan = lex::scan_scalar(line, false);
        let content_end = if scan.terminated { scan.content_end } else { line.len() };
        let comment = scan.comment.filter(|_| scan.terminated);
        self.scalar_with_comment(SyntaxKind::TEXT, &line[..content_end], comment, line.len());
    }

    fn parse_mapping_line(&mut self, indent: usize, colon: usize) {
        let line = self.current_line();
        let content = &line[indent..];
        let key = content[..colon].trim_end_matches([' ', '\t']);
        let after = &content[colon + 1..];
        let gap = lex::whitespace_len(after);
        let rest = &after[gap..];

        if rest.is_empty() || rest.starts_with('#') {
            self.builder.start_node(SyntaxKind::GROUP.into());
            self.token(SyntaxKind::INDENT, indent);
            self.token(SyntaxKind::KEY, key.len());
            self.token(SyntaxKind::WHITESPACE, colon - key.len());
            self.token(SyntaxKind::COLON, 1);
            self.token(SyntaxKind::WHITESPACE, gap);
            self.token(SyntaxKind::COMMENT, rest.len());
            return;
        }

        self.builder.start_node(SyntaxKind::ENTRY.into());
        self.token(SyntaxKind::INDENT, indent);
        self.token(SyntaxKind::KEY, key.len());
        self.token(SyntaxKind::WHITESPACE, colon - key.len());
        self.token(SyntaxKind::COLON, 1);
        self.token(SyntaxKind::WHITESPACE, gap);

        let value_start = self.pos;
        let remaining = &self.text[value_start..];
        let scan = lex::scan_scalar(remaining, true);
        // An open quote at the end of the document falls back to a single
        // line of plain value text.
        let (content_end, comment, line_end) = if scan.terminated {
            (scan.content_end, scan.comment, scan.line_end)
        } else {
            self.recover(value_start, "unterminated quoted scalar");
            (rest.len(), None, rest.len())
        };
        let value_text = remaining[..content_end].trim_end_matches([' ', '\t']);
        if lex::starts_block_scalar(value_text) {
            self.block_scalar_indent = Some(indent);
        }
        self.line_number += remaining[..line_end].matches('\n').count();
        self.scalar_with_comment(
            SyntaxKind::VALUE,
            &remaining[..content_end],
            comment,
            line_end,
        );
    }

    /// Emit `kind` for the trimmed scalar, then the comment (with its leading
    /// whitespace) or trailing whitespace, up to `line_end` bytes from the
    /// cursor.
    fn scalar_with_comment(
        &mut self,
        kind: SyntaxKind,
        scalar: &str,
        comment: Option<usize>,
        line_end: usize,
    ) {
        let start = self.pos;
        let trimmed = scalar.trim_end_matches([' ', '\t']).len();
        self.token(kind, trimmed);
        match comment {
            Some(comment_start) => {
                self.token(SyntaxKind::WHITESPACE, comment_start - trimmed);
                self.token(SyntaxKind::COMMENT, line_end - comment_start);
            }
            None => {
                let consumed = self.pos - start;
                self.token(SyntaxKind::WHITESPACE, line_end - consumed);
            }
        }
    }

    fn recover(&mut self, offset: usize, message: &str) {
        let message = format!("line {}: {}", self.line_number, message);
        tracing::warn!("{}", message);
        let at = TextSize::from(offset as u32);
        self.positioned_errors.push(PositionedParseError {
            message: message.clone(),
            range: TextRange::new(at, at),
            code: Some("unterminated-quote".to_string()),
        });
        self.errors.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovered_quote_is_reported() {
        let parse = Parse::parse_yaml("key: \"open\nnext: 1\n");
        assert!(parse.has_errors());
        assert_eq!(parse.errors(), ["line 1: unterminated quoted scalar"]);
        assert_eq!(parse.positioned_errors()[0].range.start(), TextSize::from(5));
        assert_eq!(parse.tree().to_string(), "key: \"open\nnext: 1\n");
    }

    #[test]
    fn test_clean_parse_has_no_errors() {
        let parse = Parse::parse_yaml("key: \"closed\" # c\n");
        assert!(!parse.has_errors());
    }

    #[test]
    fn test_crlf_is_normalized() {
        let parse = Parse::parse_yaml("a: 1\r\nb: 2\r\n");
        assert_eq!(parse.tree().to_string(), "a: 1\nb: 2\n");
    }
}
