//! Trailing comment alignment.
//!
//! Consecutive non-blank lines at the same indentation form a group. Inside
//! a group every trailing comment starts one column after the widest content
//! that carries a comment. Only the whitespace in front of the `#` changes.

use crate::yaml::{Line, LineKind, YamlContents};
use std::str::FromStr;

/// Realign the trailing comments of YAML text.
///
/// ```
/// let text = "a: 1 # one\nlonger: 2 # two\n";
/// assert_eq!(
///     yaml_contents::align::realign(text),
///     "a: 1      # one\nlonger: 2 # two\n"
/// );
/// ```
pub fn realign(text: &str) -> String {
    let mut doc = match YamlContents::from_str(text) {
        Ok(doc) => doc,
        Err(never) => match never {},
    };
    doc.realign();
    doc.to_string()
}

/// Split lines into alignment groups, as runs of line indices.
fn groups(lines: &[Line]) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut depth = None;
    for (index, line) in lines.iter().enumerate() {
        if line.kind() == LineKind::Blank {
            groups.push(std::mem::take(&mut current));
            depth = None;
            continue;
        }
        if depth != Some(line.indent()) {
            groups.push(std::mem::take(&mut current));
            depth = Some(line.indent());
        }
        current.push(index);
    }
    groups.push(current);
    groups.retain(|group| !group.is_empty());
    groups
}

impl YamlContents {
    /// Align trailing comments per indentation group.
    ///
    /// The target column is one past the widest content among the lines of
    /// the group that carry a trailing comment; lines without one neither
    /// move nor widen the group.
    ///
    /// Returns the number of comments that moved; realigning an aligned
    /// document changes nothing.
    pub fn realign(&mut self) -> usize {
        let lines: Vec<Line> = self.lines().collect();
        let mut moved = 0;
        for group in groups(&lines) {
            let commented: Vec<&Line> = group
                .iter()
                .map(|&index| &lines[index])
                .filter(|line| line.comment_gap().is_some())
                .collect();
            let Some(column) = commented.iter().map(|line| line.content_width() + 1).max()
            else {
                continue;
            };
            for line in commented {
                let Some(gap) = line.comment_gap() else {
                    continue;
                };
                let padding = " ".repeat(column - line.content_width());
                if gap.text() != padding {
                    let green = line.with_token_replaced(&gap, &padding);
                    self.replace_line(line.index(), green);
                    moved += 1;
                }
            }
        }
        tracing::debug!(moved, "realigned trailing comments");
        moved
    }
}
