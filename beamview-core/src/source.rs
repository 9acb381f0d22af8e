//! Lazy array sources.
//!
//! A run's field data is not loaded when the catalog is constructed; it is
//! materialized on demand through the [`ArraySource`] trait. Backends own
//! whatever storage they like (files, remote handles, in-memory arrays).

use ndarray::ArrayD;

use crate::error::SourceError;

/// Trait for lazily materialized array data.
///
/// Implementations must be cheap to construct; all expensive work happens
/// in [`ArraySource::materialize`].
pub trait ArraySource: Send + Sync {
    /// Force evaluation into a concrete in-memory array.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read or decoded.
    fn materialize(&self) -> std::result::Result<ArrayD<f64>, SourceError>;
}

/// An array source backed by an in-memory array.
///
/// Used for synthetic runs and tests; materialization clones the array.
#[derive(Debug, Clone)]
pub struct MemorySource {
    data: ArrayD<f64>,
}

impl MemorySource {
    /// Creates a source wrapping the given array.
    #[must_use]
    pub fn new(data: ArrayD<f64>) -> Self {
        Self { data }
    }
}

impl ArraySource for MemorySource {
    fn materialize(&self) -> std::result::Result<ArrayD<f64>, SourceError> {
        Ok(self.data.clone())
    }
}
