//! Adding, updating and removing entries by key path.
//!
//! Every mutation works on whole line nodes: new lines are spliced in,
//! replaced lines keep all of their tokens except the one being changed.
//! A failed mutation leaves the document untouched.

use crate::error::{EditError, EditResult};
use crate::lex::SyntaxKind;
use crate::path::KeyPath;
use crate::scalar::ScalarValue;
use crate::yaml::{build_line, Line, LineKind, YamlContents};

/// Render a key for a new line.
fn render_key(segment: &str) -> String {
    ScalarValue::new(segment).to_yaml_string()
}

impl YamlContents {
    /// Replace the value of an existing scalar entry.
    ///
    /// Indentation, key and trailing comment are kept exactly; only the value
    /// text changes. Fails with [`EditError::KeyNotFound`] if the path does
    /// not lead to a `key: value` line, and never creates keys.
    ///
    /// ```
    /// use std::str::FromStr;
    /// use yaml_contents::YamlContents;
    ///
    /// let mut doc = YamlContents::from_str("debug: true  # For now\n").unwrap();
    /// doc.set_key("debug", false).unwrap();
    /// assert_eq!(doc.to_string(), "debug: false  # For now\n");
    /// ```
    pub fn set_key(
        &mut self,
        path: impl Into<KeyPath>,
        value: impl Into<ScalarValue>,
    ) -> EditResult<()> {
        let path = path.into();
        if path.is_empty() {
            return Err(EditError::EmptyPath);
        }
        let location = self.locate(&path);
        match location.found {
            Some(ref line) if line.kind() == LineKind::KeyValue && !location.has_children() => {
                self.replace_value(&path, line, &value.into());
                Ok(())
            }
            _ => Err(EditError::KeyNotFound(path.to_string())),
        }
    }

    /// Add an entry, creating every missing parent key.
    ///
    /// New lines are indented like their existing siblings and placed after
    /// the last line nested under their parent. If the entry already exists
    /// as a scalar its value is replaced as by [`YamlContents::set_key`].
    ///
    /// Fails with [`EditError::KeyConflict`] when a parent on the path is a
    /// scalar, when the parent holds a sequence, or when the entry exists and
    /// has nested keys.
    ///
    /// ```
    /// use std::str::FromStr;
    /// use yaml_contents::YamlContents;
    ///
    /// let mut doc = YamlContents::from_str("# Top of file.\n").unwrap();
    /// doc.add_key("default.one.alpha", true).unwrap();
    /// assert_eq!(
    ///     doc.to_string(),
    ///     "# Top of file.\ndefault:\n  one:\n    alpha: true\n"
    /// );
    /// ```
    pub fn add_key(
        &mut self,
        path: impl Into<KeyPath>,
        value: impl Into<ScalarValue>,
    ) -> EditResult<()> {
        let path = path.into();
        if path.is_empty() {
            return Err(EditError::EmptyPath);
        }
        let value = value.into();
        let location = self.locate(&path);

        if let Some(position) = location
            .ancestors
            .iter()
            .position(|line| line.kind() == LineKind::KeyValue && !line.has_properties_only())
        {
            return Err(EditError::conflict(
                path.prefix(position + 1).to_string(),
                "cannot nest keys under a scalar value",
            ));
        }

        if let Some(ref found) = location.found {
            if found.kind() != LineKind::KeyValue || location.has_children() {
                return Err(EditError::conflict(
                    path.to_string(),
                    "entry holds nested content",
                ));
            }
            self.replace_value(&path, found, &value);
            return Ok(());
        }

        let missing = location.missing.unwrap_or(0);
        if !location.mapping_scope {
            return Err(EditError::conflict(
                path.prefix(missing).to_string(),
                "block does not hold a mapping",
            ));
        }

        let step = match location.ancestors.last() {
            Some(parent) if location.child_indent > parent.indent() => {
                location.child_indent - parent.indent()
            }
            _ => self
                .document_step()
                .unwrap_or_else(|| self.indentation().width()),
        };

        let previous = location
            .insert_at
            .checked_sub(1)
            .and_then(|index| self.line(index));
        let previous_open = previous.as_ref().filter(|line| !line.has_newline());

        let segments = &path.segments()[missing..];
        let mut new_lines = Vec::with_capacity(segments.len() + 1);
        if let Some(line) = previous_open {
            new_lines.push(line.with_newline());
        }
        let rendered = value.to_yaml_string();
        let mut indent = location.child_indent;
        for (offset, segment) in segments.iter().enumerate() {
            let is_last = offset + 1 == segments.len();
            let padding = " ".repeat(indent);
            let key = render_key(segment);
            let newline = if is_last && previous_open.is_some() {
                ""
            } else {
                "\n"
            };
            new_lines.push(if is_last {
                build_line(
                    SyntaxKind::ENTRY,
                    &[
                        (SyntaxKind::INDENT, &padding),
                        (SyntaxKind::KEY, &key),
                        (SyntaxKind::COLON, ":"),
                        (SyntaxKind::WHITESPACE, " "),
                        (SyntaxKind::VALUE, &rendered),
                        (SyntaxKind::NEWLINE, newline),
                    ],
                )
            } else {
                build_line(
                    SyntaxKind::GROUP,
                    &[
                        (SyntaxKind::INDENT, &padding),
                        (SyntaxKind::KEY, &key),
                        (SyntaxKind::COLON, ":"),
                        (SyntaxKind::NEWLINE, newline),
                    ],
                )
            });
            indent += step;
        }

        let start = if previous_open.is_some() {
            location.insert_at - 1
        } else {
            location.insert_at
        };
        tracing::debug!(
            path = %path,
            index = location.insert_at,
            lines = segments.len(),
            "inserting key"
        );
        self.splice_lines(start..location.insert_at, new_lines);
        Ok(())
    }

    /// Remove an entry together with every line nested under it.
    pub fn remove_key(&mut self, path: impl Into<KeyPath>) -> EditResult<()> {
        let path = path.into();
        if path.is_empty() {
            return Err(EditError::EmptyPath);
        }
        let location = self.locate(&path);
        let found = location
            .found
            .ok_or_else(|| EditError::KeyNotFound(path.to_string()))?;
        let range = found.index()..location.insert_at;
        tracing::debug!(path = %path, lines = range.len(), "removing key");
        self.splice_lines(range, Vec::new());
        Ok(())
    }

    fn replace_value(&mut self, path: &KeyPath, line: &Line, value: &ScalarValue) {
        if let Some(token) = line.value_token() {
            let rendered = value.render_replacing(token.text());
            tracing::debug!(path = %path, index = line.index(), value = %rendered, "replacing value");
            let green = line.with_token_replaced(&token, &rendered);
            self.replace_line(line.index(), green);
        }
    }
}
