//! Error types for catalog loading, querying and the service boundary.

use std::path::PathBuf;
use thiserror::Error;

/// A single fixed-width line could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The line ends before the last field's offset.
    #[error("line is {found} bytes long, expected at least {expected}")]
    TooShort {
        /// Actual byte length of the line.
        found: usize,
        /// Minimum byte length required by the field layout.
        expected: usize,
    },
}

/// Loading a catalog generation failed; nothing was published.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The catalog source could not be opened or read.
    #[error("catalog source {path} is unavailable: {source}")]
    SourceUnavailable {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A line in the source is malformed, so the whole load is rejected.
    #[error("malformed record on line {line}: {source}")]
    MalformedRecord {
        /// 1-based line number of the offending line.
        line: usize,
        /// What was wrong with the line.
        #[source]
        source: RecordError,
    },
}

/// A caller-supplied query failed the request preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidQuery {
    /// No search term was supplied.
    #[error("Search term is required")]
    Missing,

    /// The search term is shorter than the configured minimum.
    #[error("Search term must be at least {min} characters long")]
    TooShort {
        /// Minimum length in characters.
        min: usize,
    },
}

/// Errors surfaced by [`crate::server::CatalogService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No catalog generation has been published yet.
    #[error("catalog is not loaded")]
    NotReady,
}
