//! Error types for sprite generation

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::optimize::OptimizeError;

/// Errors that abort a generation call
///
/// Every variant is fatal to the whole call: no partial sprite is ever
/// returned.
#[derive(Debug, Error)]
pub enum SpriteError {
    /// A source lacks resolvable geometry or a usable identifier.
    ///
    /// The message always starts with `Invalid SVG`.
    #[error("Invalid SVG '{}': {}", .path.display(), .reason)]
    InvalidSource { path: PathBuf, reason: String },

    /// A source is not well-formed markup
    #[error("failed to parse '{}': {}", .path.display(), .message)]
    ParseFailure { path: PathBuf, message: String },

    /// A source file could not be read
    #[error("failed to read '{}': {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two sources mapped to the same identifier while strict ids are enabled
    #[error("duplicate symbol identifier '{id}'")]
    DuplicateIdentifier { id: String },

    /// The optimization pass failed
    #[error("optimizer failed: {0}")]
    OptimizerFailure(#[from] OptimizeError),
}

impl SpriteError {
    /// Create an invalid source error
    pub fn invalid(path: &Path, reason: impl Into<String>) -> Self {
        Self::InvalidSource {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create a parse failure
    pub fn parse(path: &Path, message: impl Into<String>) -> Self {
        Self::ParseFailure {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    /// Create a read error
    pub fn read(path: &Path, source: std::io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }
}
