//! Error types.
//!
//! Indexing itself never fails; errors only come from loading the tables and
//! vocabulary the pipeline is configured with.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading pipeline inputs
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LexiconError {
    /// A line of an irregular-forms table has fewer than two fields
    #[error("invalid irregular form entry at line {line}: {content:?}")]
    InvalidIrregularLine {
        /// 1-based line number
        line: usize,
        /// The offending line
        content: String,
    },

    /// Tracked-word JSON could not be parsed
    #[error("invalid vocabulary JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An input file could not be read
    #[error("failed to read {path:?}: {source}")]
    Io {
        /// The file that was being read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Result alias used by the loaders
pub type Result<T> = std::result::Result<T, LexiconError>;

/// Read a whole file, attaching its path to any I/O error
pub fn read_to_string(path: impl Into<PathBuf>) -> Result<String> {
    let path = path.into();
    std::fs::read_to_string(&path).map_err(|source| LexiconError::Io { path, source })
}
