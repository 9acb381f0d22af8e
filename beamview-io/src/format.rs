//! The image file-format plugin contract.

use std::path::{Path, PathBuf};

use ndarray::{Array2, ArrayD, ArrayView2};

use beamview_core::{ArraySource, LegacyHeader, SourceError};

use crate::error::{Error, Result};
use crate::flat::FlatFormat;

/// Plugin contract for single-frame image file formats.
///
/// Implementations declare the extensions they handle and provide
/// symmetric read/write of a 2-D frame.
pub trait ImageFormat: Send + Sync {
    /// File extensions handled by this format (lowercase, without dot).
    fn extensions(&self) -> &'static [&'static str];

    /// Reads one frame from a file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or its contents are
    /// not a valid frame in this format.
    fn read(&self, path: &Path) -> Result<Array2<f64>>;

    /// Writes one frame to a file, replacing any existing contents.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written.
    fn write(&self, path: &Path, frame: ArrayView2<'_, f64>) -> Result<()>;
}

/// All built-in formats, in lookup order.
fn registry() -> Vec<Box<dyn ImageFormat>> {
    let mut formats: Vec<Box<dyn ImageFormat>> = vec![Box::new(FlatFormat)];
    #[cfg(feature = "hdf5")]
    formats.push(Box::new(crate::hdf5::Hdf5Format));
    formats
}

/// Picks the format registered for the file's extension.
#[must_use]
pub fn format_for_path(path: &Path) -> Option<Box<dyn ImageFormat>> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    registry()
        .into_iter()
        .find(|f| f.extensions().contains(&ext.as_str()))
}

/// Opens a frame file as a legacy-header run.
///
/// # Errors
/// Returns [`Error::UnsupportedExtension`] if no format handles the file,
/// or the format's read error.
pub fn open_frames(path: &Path) -> Result<LegacyHeader> {
    let format = format_for_path(path)
        .ok_or_else(|| Error::UnsupportedExtension(path.display().to_string()))?;
    let frame = format.read(path)?;
    Ok(LegacyHeader::new(vec![frame]))
}

/// A lazy array source backed by an image file.
///
/// Nothing is read until materialization, so catalogs can reference large
/// frame files without paying for them up front.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source for the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ArraySource for FileSource {
    fn materialize(&self) -> std::result::Result<ArrayD<f64>, SourceError> {
        let format = format_for_path(&self.path)
            .ok_or_else(|| SourceError::Backend(format!("no format for {}", self.path.display())))?;
        let frame = format
            .read(&self.path)
            .map_err(|e| SourceError::Backend(e.to_string()))?;
        Ok(frame.into_dyn())
    }
}
