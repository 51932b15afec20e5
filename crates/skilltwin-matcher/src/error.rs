//! Error types for loading the skill catalog

use std::path::PathBuf;
use thiserror::Error;

/// Catalog construction errors
///
/// All of these are startup failures: a matcher is never built from a
/// catalog that failed to load.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A data source could not be read from disk
    #[error("Failed to read {path:?}: {source}")]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// An alias or category source is not valid JSON of the expected shape
    #[error("Malformed JSON in {origin}: {source}")]
    Json {
        /// File path or label of the source
        origin: String,
        /// Parser error
        source: serde_json::Error,
    },

    /// The vocabulary source holds no usable skill names
    #[error("Vocabulary {origin} contains no skills")]
    EmptyVocabulary {
        /// File path or label of the source
        origin: String,
    },

    /// The normalization pattern failed to compile
    #[error("Invalid normalization pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, CatalogError>;
