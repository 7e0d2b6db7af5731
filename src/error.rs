//! Error types for yaml-contents

use thiserror::Error;

/// Errors that can occur when editing YAML documents
#[derive(Debug, Error)]
pub enum EditError {
    /// I/O error when reading or writing files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key path does not resolve to an existing scalar entry
    #[error("Key not found: '{0}'")]
    KeyNotFound(String),

    /// The key path runs into an entry that cannot hold the new key
    #[error("Key conflict at '{path}': {reason}")]
    KeyConflict {
        /// The portion of the path where the conflict was detected
        path: String,
        /// Why the key cannot be added there
        reason: String,
    },

    /// A key path without any segments
    #[error("Key path is empty")]
    EmptyPath,
}

impl EditError {
    pub(crate) fn conflict(path: impl Into<String>, reason: impl Into<String>) -> Self {
        EditError::KeyConflict {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for yaml-contents operations
pub type EditResult<T> = Result<T, EditError>;
