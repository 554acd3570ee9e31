//! Error types for name normalization.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a normalizer.
///
/// Normalizing a name never fails; only loading and compiling a vocabulary can.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Vocabulary file could not be read.
    #[error("failed to read vocabulary {path}: {source}")]
    VocabularyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Vocabulary file is not valid vocabulary JSON.
    #[error("invalid vocabulary {path}: {source}")]
    VocabularyParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Vocabulary has no version label.
    #[error("vocabulary version must not be empty")]
    MissingVersion,

    /// Noise-word pattern failed to compile.
    #[error("invalid noise-word pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type for normalizer construction.
pub type Result<T> = std::result::Result<T, NormalizeError>;
