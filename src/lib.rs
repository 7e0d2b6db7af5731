#![deny(missing_docs)]
#![warn(clippy::unnecessary_to_owned)]
#![warn(clippy::redundant_clone)]
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::manual_string_new)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

//! A comment-preserving structured YAML editor.
//!
//! Documents are parsed into a lossless [rowan] tree with one node per line.
//! Keys can be added or updated by path and trailing comments realigned,
//! while every untouched line is reproduced byte for byte.

pub mod align;
mod error;
mod lex;
mod mutation;
mod navigate;
mod parse;
mod path;
mod scalar;
mod yaml;

pub use error::{EditError, EditResult};
pub use lex::{split_properties, SyntaxKind};
pub use navigate::Location;
pub use parse::Parse;
pub use path::KeyPath;
pub use rowan::TextRange;
pub use scalar::{ScalarStyle, ScalarType, ScalarValue};
pub use yaml::{Lang, Line, LineKind, YamlContents};

/// A positioned parse error containing location information.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionedParseError {
    /// The error message
    pub message: String,
    /// The text range where the error occurred
    pub range: rowan::TextRange,
    /// Optional error code for categorization
    pub code: Option<String>,
}

impl std::fmt::Display for PositionedParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PositionedParseError {}

/// The indentation to use for newly nested keys when the document itself
/// gives no hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indentation {
    /// The number of spaces to use for indentation.
    Spaces(u32),
}

impl Indentation {
    /// The indentation width in columns.
    pub fn width(self) -> usize {
        match self {
            Indentation::Spaces(n) => n as usize,
        }
    }
}

impl Default for Indentation {
    fn default() -> Self {
        Indentation::Spaces(2)
    }
}
