//! Run handles.
//!
//! A run is either a catalog (streams with descriptor metadata and lazy
//! data) or a legacy header (a plain sequence of raw frames). The two
//! variants take different preview paths; dispatch is explicit on the
//! [`Run`] sum type rather than inferred from handle capabilities.

use ndarray::Array2;

use crate::catalog::Catalog;

/// A legacy-header run: raw 2-D frames with no stream metadata.
#[derive(Debug, Clone, Default)]
pub struct LegacyHeader {
    frames: Vec<Array2<f64>>,
}

impl LegacyHeader {
    /// Creates a header from a frame sequence.
    #[must_use]
    pub fn new(frames: Vec<Array2<f64>>) -> Self {
        Self { frames }
    }

    /// First frame, if any.
    #[must_use]
    pub fn first_frame(&self) -> Option<&Array2<f64>> {
        self.frames.first()
    }

    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if the header has no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// A run handle: the input to the preview pipeline.
#[derive(Debug, Clone)]
pub enum Run {
    /// Catalog-backed run with named streams.
    Catalog(Catalog),
    /// Legacy header exposing raw frames directly.
    Header(LegacyHeader),
}
