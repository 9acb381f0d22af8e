//! HDF5 frame format (`/entry/image`, NeXus-style layout).

use std::path::Path;
use std::str::FromStr;

use ::hdf5::types::VarLenUnicode;
use ::hdf5::{File, Group};
use ndarray::{Array2, ArrayView2};

use crate::error::{Error, Result};
use crate::format::ImageFormat;

const IMAGE_PATH: &str = "entry/image";

/// HDF5-backed frame format (`.h5`, `.hdf5`, `.nxs`).
pub struct Hdf5Format;

impl ImageFormat for Hdf5Format {
    fn extensions(&self) -> &'static [&'static str] {
        &["h5", "hdf5", "nxs"]
    }

    fn read(&self, path: &Path) -> Result<Array2<f64>> {
        let file = File::open(path)?;
        let dataset = file.dataset(IMAGE_PATH)?;
        Ok(dataset.read_2d::<f64>()?)
    }

    fn write(&self, path: &Path, frame: ArrayView2<'_, f64>) -> Result<()> {
        let file = File::create(path)?;
        let entry = file.create_group("entry")?;
        set_attr_str(&entry, "NX_class", "NXentry")?;
        entry
            .new_dataset_builder()
            .with_data(frame)
            .create("image")?;
        Ok(())
    }
}

fn set_attr_str(group: &Group, name: &str, value: &str) -> Result<()> {
    let value = VarLenUnicode::from_str(value)
        .map_err(|e| Error::InvalidFormat(format!("invalid utf-8 attribute: {e}")))?;
    group
        .new_attr::<VarLenUnicode>()
        .create(name)?
        .write_scalar(&value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn hdf5_plugin_contract_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("frame.h5");

        let data = Array2::from_shape_fn((16, 24), |(r, c)| f64::from(r as u32 * 24 + c as u32));
        let format: Box<dyn ImageFormat> = Box::new(Hdf5Format);

        format.write(&path, data.view()).unwrap();
        assert_eq!(format.read(&path).unwrap(), data);
    }
}
