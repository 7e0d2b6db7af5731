//! Locating entries by key path.
//!
//! Nesting is derived purely from indentation: the children of a key are
//! the lines after it that are indented deeper, up to the first structural
//! line that is not.

use crate::path::KeyPath;
use crate::yaml::{Line, LineKind, YamlContents};
use std::ops::Range;

/// Where a key path resolves to, or where its first missing key belongs.
#[derive(Debug, Clone)]
pub struct Location {
    /// The line for the last segment, if the whole path exists.
    pub found: Option<Line>,
    /// Lines matched for the segments before `found` (or before `missing`).
    pub ancestors: Vec<Line>,
    /// Index of the first segment that does not exist.
    pub missing: Option<usize>,
    /// Line index at which the missing segment should be inserted. For a
    /// found line, the index just past its last descendant.
    pub insert_at: usize,
    /// Indentation for the missing segment. For a found line, the
    /// indentation its children have or would have.
    pub child_indent: usize,
    /// Whether the block receiving the missing segment holds mapping entries
    /// (or nothing yet) rather than sequence items or other text.
    pub mapping_scope: bool,
}

impl Location {
    /// Whether the found line has nested lines below it.
    pub fn has_children(&self) -> bool {
        self.found
            .as_ref()
            .is_some_and(|line| self.insert_at > line.index() + 1)
    }
}

/// Whether `line` may own lines at its own indentation: a key introducing a
/// block sequence written without extra indentation.
fn opens_block(line: &Line) -> bool {
    line.kind() == LineKind::KeyOnly || line.has_properties_only()
}

/// The lines nested under `lines[index]`, excluding trailing blank and
/// comment lines.
pub(crate) fn block_range(lines: &[Line], index: usize) -> Range<usize> {
    let parent = &lines[index];
    let depth = parent.indent();
    let mut end = index + 1;
    for (offset, line) in lines[index + 1..].iter().enumerate() {
        if !line.is_structural() {
            continue;
        }
        let nested = line.indent() > depth
            || (line.indent() == depth && line.is_sequence_item() && opens_block(parent));
        if !nested {
            break;
        }
        end = index + 1 + offset + 1;
    }
    index + 1..end
}

/// Index just past the last structural line of the document.
fn root_end(lines: &[Line]) -> usize {
    lines
        .iter()
        .rposition(Line::is_structural)
        .map_or(lines.len(), |i| i + 1)
}

fn first_structural(lines: &[Line]) -> Option<&Line> {
    lines.iter().find(|l| l.is_structural())
}

impl YamlContents {
    /// Resolve `path` against the document.
    ///
    /// Each segment must match a key at the indentation of the first
    /// structural line in its parent's block. When sibling keys repeat, the
    /// first one wins.
    pub fn locate(&self, path: impl Into<KeyPath>) -> Location {
        let path = path.into();
        let lines: Vec<Line> = self.lines().collect();
        let mut ancestors: Vec<Line> = Vec::new();
        let mut scope = 0..lines.len();

        for (position, segment) in path.segments().iter().enumerate() {
            let candidates = &lines[scope.clone()];
            let first = first_structural(candidates);
            let child_indent = first.map(Line::indent);
            let matched = child_indent.and_then(|indent| {
                candidates.iter().find(|line| {
                    line.is_key()
                        && line.indent() == indent
                        && line.key().as_deref() == Some(segment.as_str())
                })
            });

            match matched {
                Some(line) => {
                    let block = block_range(&lines, line.index());
                    if position + 1 == path.len() {
                        let child_indent = lines[block.clone()]
                            .iter()
                            .find(|l| l.is_structural())
                            .map_or_else(
                                || self.nested_indent(line, ancestors.last()),
                                Line::indent,
                            );
                        return Location {
                            found: Some(line.clone()),
                            ancestors,
                            missing: None,
                            insert_at: block.end,
                            child_indent,
                            mapping_scope: first.map_or(true, Line::is_key),
                        };
                    }
                    ancestors.push(line.clone());
                    scope = block;
                }
                None => {
                    let insert_at = match ancestors.last() {
                        Some(parent) => block_range(&lines, parent.index()).end,
                        None => root_end(&lines),
                    };
                    let child_indent = child_indent.unwrap_or_else(|| match ancestors.last() {
                        Some(parent) => {
                            let grandparent = ancestors.len().checked_sub(2).map(|i| &ancestors[i]);
                            self.nested_indent(parent, grandparent)
                        }
                        None => 0,
                    });
                    return Location {
                        found: None,
                        ancestors,
                        missing: Some(position),
                        insert_at,
                        child_indent,
                        mapping_scope: first.map_or(true, Line::is_key),
                    };
                }
            }
        }

        Location {
            found: None,
            ancestors,
            missing: Some(0),
            insert_at: root_end(&lines),
            child_indent: first_structural(&lines).map_or(0, Line::indent),
            mapping_scope: true,
        }
    }

    /// The line holding the entry at `path`, if it exists.
    pub fn get(&self, path: impl Into<KeyPath>) -> Option<Line> {
        self.locate(path).found
    }

    /// Whether an entry exists at `path`.
    pub fn contains_key(&self, path: impl Into<KeyPath>) -> bool {
        self.get(path).is_some()
    }

    /// Indentation for the first child of a key that has none yet.
    pub(crate) fn nested_indent(&self, parent: &Line, grandparent: Option<&Line>) -> usize {
        parent.indent() + self.indent_step(parent, grandparent)
    }

    /// The nesting step below `parent`: its own step relative to its parent,
    /// else the step used elsewhere in the document, else the configured
    /// indentation.
    pub(crate) fn indent_step(&self, parent: &Line, grandparent: Option<&Line>) -> usize {
        grandparent
            .map(|g| parent.indent().saturating_sub(g.indent()))
            .filter(|step| *step > 0)
            .or_else(|| self.document_step())
            .unwrap_or_else(|| self.indentation().width())
    }

    /// The first nesting step found in the document: the indentation gained
    /// from a key to the next structural line below it.
    pub fn document_step(&self) -> Option<usize> {
        let lines: Vec<Line> = self.lines().filter(Line::is_structural).collect();
        lines.windows(2).find_map(|pair| {
            let (parent, child) = (&pair[0], &pair[1]);
            (parent.is_key() && child.indent() > parent.indent())
                .then(|| child.indent() - parent.indent())
        })
    }
}
