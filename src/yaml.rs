//! Lossless line-oriented YAML document.

use crate::{
    error::EditResult,
    lex::{self, SyntaxKind},
    parse::Parse,
    Indentation,
};
use rowan::ast::AstNode;
use rowan::{GreenNode, GreenNodeBuilder, GreenToken, NodeOrToken};
use std::ops::Range;
use std::path::Path;
use std::str::FromStr;

/// YAML language type for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lang {}

impl rowan::Language for Lang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        SyntaxKind::from_raw(raw.0)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub(crate) type SyntaxNode = rowan::SyntaxNode<Lang>;
pub(crate) type SyntaxToken = rowan::SyntaxToken<Lang>;

/// The classification of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Nothing but whitespace
    Blank,
    /// Only a comment
    Comment,
    /// `key: value`
    KeyValue,
    /// `key:` opening a nested block
    KeyOnly,
    /// Any other content, kept verbatim
    Text,
}

/// A single logical line of a document.
///
/// A line spans several physical lines when it holds a multi-line quoted
/// value.
#[derive(PartialEq, Eq, Hash, Clone)]
pub struct Line(SyntaxNode);

impl std::fmt::Debug for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Line").field("syntax", &self.0).finish()
    }
}

impl AstNode for Line {
    type Language = Lang;

    fn can_cast(kind: SyntaxKind) -> bool {
        kind.is_line()
    }

    fn cast(syntax: SyntaxNode) -> Option<Self> {
        if Self::can_cast(syntax.kind()) {
            Some(Self(syntax))
        } else {
            None
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        &self.0
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.text())
    }
}

impl Line {
    /// The kind of this line.
    pub fn kind(&self) -> LineKind {
        match self.0.kind() {
            SyntaxKind::BLANK_LINE => LineKind::Blank,
            SyntaxKind::COMMENT_LINE => LineKind::Comment,
            SyntaxKind::ENTRY => LineKind::KeyValue,
            SyntaxKind::GROUP => LineKind::KeyOnly,
            _ => LineKind::Text,
        }
    }

    /// Position of this line in its document.
    pub fn index(&self) -> usize {
        self.0.index()
    }

    fn tokens(&self) -> impl Iterator<Item = SyntaxToken> {
        self.0.children_with_tokens().filter_map(|e| e.into_token())
    }

    fn token(&self, kind: SyntaxKind) -> Option<SyntaxToken> {
        self.tokens().find(|t| t.kind() == kind)
    }

    /// Width of the leading whitespace.
    pub fn indent(&self) -> usize {
        match self.tokens().next() {
            Some(t) if t.kind() == SyntaxKind::INDENT => t.text().len(),
            Some(t) if t.kind() == SyntaxKind::WHITESPACE && self.kind() == LineKind::Blank => {
                t.text().len()
            }
            _ => 0,
        }
    }

    /// The key exactly as written, including any quotes.
    pub fn raw_key(&self) -> Option<String> {
        self.token(SyntaxKind::KEY).map(|t| t.text().to_string())
    }

    /// The key with surrounding quotes removed.
    pub fn key(&self) -> Option<String> {
        self.token(SyntaxKind::KEY).map(|t| lex::unquote_key(t.text()))
    }

    /// The value exactly as written.
    pub fn value(&self) -> Option<String> {
        self.token(SyntaxKind::VALUE).map(|t| t.text().to_string())
    }

    /// The comment text, starting at `#`.
    pub fn comment(&self) -> Option<String> {
        self.token(SyntaxKind::COMMENT).map(|t| t.text().to_string())
    }

    /// The trailing comment including the whitespace in front of it.
    ///
    /// Comment-only lines have no trailing comment.
    pub fn trailing_comment(&self) -> Option<String> {
        let gap = self.comment_gap()?;
        Some(format!("{}{}", gap.text(), self.comment()?))
    }

    /// The whitespace token in front of a trailing comment.
    pub(crate) fn comment_gap(&self) -> Option<SyntaxToken> {
        if self.kind() == LineKind::Comment {
            return None;
        }
        let mut previous: Option<SyntaxToken> = None;
        for token in self.tokens() {
            if token.kind() == SyntaxKind::COMMENT {
                return previous.filter(|p| p.kind() == SyntaxKind::WHITESPACE);
            }
            previous = Some(token);
        }
        None
    }

    /// Column width of the content in front of a trailing comment, counted
    /// on the last physical line.
    pub fn content_width(&self) -> usize {
        let text = self.0.text().to_string();
        let end = match self.comment_gap() {
            Some(gap) => usize::from(gap.text_range().start() - self.0.text_range().start()),
            None => text.trim_end_matches(['\n', ' ', '\t']).len(),
        };
        let content = &text[..end];
        let last = content.rfind('\n').map_or(content, |n| &content[n + 1..]);
        last.chars().count()
    }

    /// Whether the line ends with a newline.
    pub fn has_newline(&self) -> bool {
        self.token(SyntaxKind::NEWLINE).is_some()
    }

    /// Whether this line is a mapping key (with or without a value).
    pub fn is_key(&self) -> bool {
        matches!(self.kind(), LineKind::KeyValue | LineKind::KeyOnly)
    }

    /// Whether this line carries document structure (not blank, not a comment).
    pub fn is_structural(&self) -> bool {
        !matches!(self.kind(), LineKind::Blank | LineKind::Comment)
    }

    /// Whether this line is an item of a block sequence.
    pub fn is_sequence_item(&self) -> bool {
        self.kind() == LineKind::Text
            && self
                .token(SyntaxKind::TEXT)
                .is_some_and(|t| lex::is_sequence_item(t.text()))
    }

    /// Whether the value is only anchor/tag properties, as in
    /// `default: &default`, so the line may still open a nested block.
    pub fn has_properties_only(&self) -> bool {
        self.value()
            .is_some_and(|v| lex::split_properties(&v).1.is_empty())
    }

    pub(crate) fn with_token_replaced(&self, token: &SyntaxToken, text: &str) -> GreenNode {
        let replacement = GreenToken::new(token.kind().into(), text);
        self.0
            .green()
            .replace_child(token.index(), NodeOrToken::Token(replacement))
    }

    pub(crate) fn value_token(&self) -> Option<SyntaxToken> {
        self.token(SyntaxKind::VALUE)
    }

    pub(crate) fn with_newline(&self) -> GreenNode {
        let count = self.0.children_with_tokens().count();
        let newline = GreenToken::new(SyntaxKind::NEWLINE.into(), "\n");
        self.0
            .green()
            .insert_child(count, NodeOrToken::Token(newline))
    }

    pub(crate) fn without_newline(&self) -> GreenNode {
        match self.token(SyntaxKind::NEWLINE) {
            Some(newline) => self.0.green().remove_child(newline.index()),
            None => self.0.green().into_owned(),
        }
    }
}

/// Build a line node from its tokens; empty tokens are skipped.
pub(crate) fn build_line(kind: SyntaxKind, tokens: &[(SyntaxKind, &str)]) -> GreenNode {
    let mut builder = GreenNodeBuilder::new();
    builder.start_node(kind.into());
    for (token_kind, text) in tokens {
        if !text.is_empty() {
            builder.token((*token_kind).into(), text);
        }
    }
    builder.finish_node();
    builder.finish()
}

/// A YAML document that can be edited without disturbing its formatting.
#[derive(Debug, Clone)]
pub struct YamlContents {
    root: SyntaxNode,
    indentation: Indentation,
}

impl Default for YamlContents {
    fn default() -> Self {
        Self::new()
    }
}

impl YamlContents {
    /// Create a new empty document.
    pub fn new() -> YamlContents {
        let mut builder = GreenNodeBuilder::new();
        builder.start_node(SyntaxKind::ROOT.into());
        builder.finish_node();
        Self::from_green(builder.finish())
    }

    pub(crate) fn from_green(green: GreenNode) -> YamlContents {
        YamlContents {
            root: SyntaxNode::new_root(green),
            indentation: Indentation::default(),
        }
    }

    /// Parse YAML text, returning a Parse result
    pub fn parse(text: &str) -> Parse<YamlContents> {
        Parse::parse_yaml(text)
    }

    /// Read and parse a YAML file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> EditResult<YamlContents> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::parse(&contents).tree())
    }

    /// Write the rendered document to a file.
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> EditResult<()> {
        std::fs::write(path, self.to_string())?;
        Ok(())
    }

    /// Use `indentation` for nesting when the document gives no hint.
    pub fn with_indentation(mut self, indentation: Indentation) -> Self {
        self.indentation = indentation;
        self
    }

    /// Set the fallback indentation for new nested keys.
    pub fn set_indentation(&mut self, indentation: Indentation) {
        self.indentation = indentation;
    }

    /// The fallback indentation for new nested keys.
    pub fn indentation(&self) -> Indentation {
        self.indentation
    }

    /// The underlying syntax tree.
    pub fn syntax(&self) -> &SyntaxNode {
        &self.root
    }

    /// All lines, in document order.
    pub fn lines(&self) -> impl Iterator<Item = Line> {
        self.root.children().filter_map(Line::cast)
    }

    /// The line at `index`.
    pub fn line(&self, index: usize) -> Option<Line> {
        self.lines().nth(index)
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.root.children().count()
    }

    /// Whether the document has no lines at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn splice_lines(&mut self, range: Range<usize>, lines: Vec<GreenNode>) {
        let green = self
            .root
            .green()
            .splice_children(range, lines.into_iter().map(NodeOrToken::Node));
        self.root = SyntaxNode::new_root(green);
    }

    pub(crate) fn replace_line(&mut self, index: usize, line: GreenNode) {
        self.splice_lines(index..index + 1, vec![line]);
    }
}

impl std::fmt::Display for YamlContents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.root.text())
    }
}

impl FromStr for YamlContents {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(YamlContents::parse(s).tree())
    }
}
