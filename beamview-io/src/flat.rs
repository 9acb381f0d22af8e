//! Flat binary frame format.
//!
//! Layout: 4-byte magic `BVF1`, u32 LE row count, u32 LE column count,
//! then row-major little-endian `f64` samples.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use memmap2::Mmap;
use ndarray::{Array2, ArrayView2};

use crate::error::{Error, Result};
use crate::format::ImageFormat;

const MAGIC: &[u8; 4] = b"BVF1";
const HEADER_LEN: usize = 12;

/// The always-available flat binary format (`.bvf`).
pub struct FlatFormat;

impl ImageFormat for FlatFormat {
    fn extensions(&self) -> &'static [&'static str] {
        &["bvf"]
    }

    fn read(&self, path: &Path) -> Result<Array2<f64>> {
        let file = File::open(path)?;
        // SAFETY: The file is opened read-only and we assume it is not modified concurrently.
        // This is the standard safety contract for memory mapping.
        #[allow(unsafe_code)]
        let mmap = unsafe { Mmap::map(&file).map_err(|e| Error::MmapError(e.to_string()))? };

        let bytes: &[u8] = &mmap;
        if bytes.len() < HEADER_LEN || &bytes[..4] != MAGIC {
            return Err(Error::InvalidFormat("missing BVF1 header".to_owned()));
        }

        let rows = read_u32(&bytes[4..8]) as usize;
        let cols = read_u32(&bytes[8..12]) as usize;
        let expected = HEADER_LEN + rows * cols * 8;
        if bytes.len() != expected {
            return Err(Error::InvalidFormat(format!(
                "expected {expected} bytes for a {rows}x{cols} frame, found {}",
                bytes.len()
            )));
        }

        let samples: Vec<f64> = bytes[HEADER_LEN..]
            .chunks_exact(8)
            .map(|c| f64::from_le_bytes(c.try_into().unwrap_or_default()))
            .collect();

        Array2::from_shape_vec((rows, cols), samples)
            .map_err(|e| Error::InvalidFormat(e.to_string()))
    }

    fn write(&self, path: &Path, frame: ArrayView2<'_, f64>) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        let (rows, cols) = frame.dim();
        let rows = u32::try_from(rows)
            .map_err(|_| Error::InvalidFormat(format!("frame has too many rows: {rows}")))?;
        let cols = u32::try_from(cols)
            .map_err(|_| Error::InvalidFormat(format!("frame has too many columns: {cols}")))?;
        writer.write_all(MAGIC)?;
        writer.write_all(&rows.to_le_bytes())?;
        writer.write_all(&cols.to_le_bytes())?;

        for &sample in frame.iter() {
            writer.write_all(&sample.to_le_bytes())?;
        }

        writer.flush()?;
        Ok(())
    }
}

fn read_u32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes(bytes.try_into().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn plugin_contract_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ones.bvf");

        let data = Array2::<f64>::ones((101, 100));
        let format: Box<dyn ImageFormat> = Box::new(FlatFormat);

        format.write(&path, data.view()).unwrap();
        let restored = format.read(&path).unwrap();

        assert_eq!(restored, data);
    }

    #[test]
    fn rejects_foreign_magic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.bvf");
        std::fs::write(&path, b"NOPE\x00\x00\x00\x00\x00\x00\x00\x00").unwrap();

        assert!(matches!(
            FlatFormat.read(&path),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn rejects_truncated_payload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.bvf");

        let mut bytes = Vec::new();
        bytes.extend_from_slice(MAGIC);
        bytes.extend_from_slice(&2u32.to_le_bytes());
        bytes.extend_from_slice(&2u32.to_le_bytes());
        bytes.extend_from_slice(&1.0f64.to_le_bytes()); // 1 of 4 samples
        std::fs::write(&path, &bytes).unwrap();

        assert!(matches!(
            FlatFormat.read(&path),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn non_contiguous_views_serialize_in_logical_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("slice.bvf");

        let data = Array2::from_shape_fn((4, 4), |(r, c)| (r * 4 + c) as f64);
        let view = data.slice(ndarray::s![.., ..;2]);

        FlatFormat.write(&path, view).unwrap();
        let restored = FlatFormat.read(&path).unwrap();

        assert_eq!(restored, view.to_owned());
    }
}
