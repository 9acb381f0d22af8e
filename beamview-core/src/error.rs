//! Error types for beamview-core.

use thiserror::Error;

/// Result type alias for preview operations.
pub type Result<T> = std::result::Result<T, PreviewError>;

/// Errors raised by lazy array sources during materialization.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Backend-specific failure (malformed payload, decode error, ...).
    #[error("backend error: {0}")]
    Backend(String),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Preview pipeline error types.
#[derive(Error, Debug)]
pub enum PreviewError {
    /// Heuristic search exhausted all streams without a multi-dimensional field.
    #[error("no stream carries a multi-dimensional field")]
    NoSuitableField,

    /// The chosen field has no backing data source in its stream.
    #[error("field '{field}' in stream '{stream}' has no data source")]
    FieldNotLoadable {
        /// Stream name chosen by the heuristic.
        stream: String,
        /// Field name chosen by the heuristic.
        field: String,
    },

    /// Materialization of the lazy array failed.
    #[error("load failed: {0}")]
    Load(#[from] SourceError),

    /// Squeezed array collapsed below 2 dimensions.
    #[error("array has only {ndim} dimension(s) after squeeze, need at least 2")]
    ShapeTooSmall {
        /// Dimension count after removing length-1 axes.
        ndim: usize,
    },

    /// Legacy header exposes no frames.
    #[error("legacy header has no frames")]
    EmptyHeader,
}
