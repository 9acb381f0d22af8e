//! beamview-io: Image file-format plugins.
//!
//! Defines the [`ImageFormat`] plugin contract for reading and writing
//! single-frame image files, a flat binary implementation that is always
//! available, and an HDF5 implementation behind the `hdf5` feature.
//!

mod error;
mod flat;
mod format;
#[cfg(feature = "hdf5")]
pub mod hdf5;

pub use error::{Error, Result};
pub use flat::FlatFormat;
pub use format::{format_for_path, open_frames, FileSource, ImageFormat};
#[cfg(feature = "hdf5")]
pub use self::hdf5::Hdf5Format;
