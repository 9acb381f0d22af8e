//! Fitting error types.

use thiserror::Error;

/// Result type for fitting operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fitting error types.
#[derive(Error, Debug)]
pub enum Error {
    /// No data points supplied.
    #[error("cannot fit a model to empty data")]
    EmptyData,

    /// x and y sample counts differ.
    #[error("sample length mismatch: {x_len} x values, {y_len} y values")]
    LengthMismatch {
        /// Number of x samples.
        x_len: usize,
        /// Number of y samples.
        y_len: usize,
    },
}
