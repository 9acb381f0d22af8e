//! Worker-to-UI message types.
//!
//! Preview workers run on background threads and report back to the UI
//! thread via a channel. Every message carries the request generation it
//! belongs to; results from superseded requests are discarded on receipt.

use ndarray::Array2;

/// Messages sent from preview workers to the UI thread.
pub enum PreviewMessage {
    /// Preview succeeded.
    ///
    /// Contains the reduced 2-D array and, for catalog runs, the
    /// (stream, field) pair the heuristic chose.
    Ready {
        /// Request generation this result belongs to.
        generation: u64,
        /// Reduced raw image data.
        image: Box<Array2<f64>>,
        /// Chosen (stream, field), catalog path only.
        origin: Option<(String, String)>,
    },

    /// Preview failed; the underlying error has already been logged.
    Failed {
        /// Request generation this result belongs to.
        generation: u64,
    },
}
