//! Headless preview pipeline.
//!
//! Reduces a run handle to a displayable 2-D array: guess which stream and
//! field of a catalog hold image data, materialize the lazy array, collapse
//! it to 2-D, and compute the log-scaled display transform. All operations
//! are pure so the pipeline can be exercised without a GUI.

use ndarray::{Array2, ArrayD, Axis};

use crate::catalog::Catalog;
use crate::error::{PreviewError, Result};
use crate::run::{LegacyHeader, Run};

/// Picks the (stream, field) pair most likely to hold image data.
///
/// Tries stream `"primary"` first if present, then every stream in catalog
/// order (a duplicate visit of `"primary"` is harmless; first match wins).
/// Only the first descriptor of each stream is inspected, and the first
/// field whose declared shape has more than one dimension is chosen.
/// Streams without descriptors are skipped.
#[must_use]
pub fn guess_stream_field(catalog: &Catalog) -> Option<(&str, &str)> {
    let candidates = catalog
        .stream("primary")
        .into_iter()
        .chain(catalog.streams());

    for stream in candidates {
        let Some(descriptor) = stream.first_descriptor() else {
            continue;
        };
        for (field, key) in descriptor.data_keys() {
            if key.ndim() > 1 {
                return Some((stream.name(), field));
            }
        }
    }
    None
}

/// Removes every length-1 axis.
fn squeeze(mut data: ArrayD<f64>) -> ArrayD<f64> {
    for axis in (0..data.ndim()).rev() {
        if data.shape()[axis] == 1 {
            data = data.index_axis_move(Axis(axis), 0);
        }
    }
    data
}

/// Collapses an N-D array to exactly 2-D.
///
/// Length-1 axes are squeezed away first, then the leading axis is dropped
/// (keeping index 0) until two dimensions remain. The values and order of
/// the surviving last two axes are unchanged.
///
/// # Errors
/// Returns [`PreviewError::ShapeTooSmall`] if the squeezed array has fewer
/// than 2 dimensions.
pub fn reduce_to_2d(data: ArrayD<f64>) -> Result<Array2<f64>> {
    let mut data = squeeze(data);
    if data.ndim() < 2 {
        return Err(PreviewError::ShapeTooSmall { ndim: data.ndim() });
    }
    while data.ndim() > 2 {
        data = data.index_axis_move(Axis(0), 0);
    }
    let ndim = data.ndim();
    data.into_dimensionality()
        .map_err(|_| PreviewError::ShapeTooSmall { ndim })
}

/// Catalog preview path: guess, materialize, reduce.
///
/// # Errors
/// Returns an error if no stream carries a multi-dimensional field, the
/// chosen field has no data source, materialization fails, or the array
/// cannot be reduced to 2-D.
pub fn catalog_preview(catalog: &Catalog) -> Result<Array2<f64>> {
    let (stream_name, field) =
        guess_stream_field(catalog).ok_or(PreviewError::NoSuitableField)?;

    let source = catalog
        .stream(stream_name)
        .and_then(|s| s.source(field))
        .ok_or_else(|| PreviewError::FieldNotLoadable {
            stream: stream_name.to_owned(),
            field: field.to_owned(),
        })?;

    let data = source.materialize()?;
    reduce_to_2d(data)
}

/// Header preview path: first frame of the sequence.
///
/// # Errors
/// Returns [`PreviewError::EmptyHeader`] if the header has no frames.
pub fn header_preview(header: &LegacyHeader) -> Result<Array2<f64>> {
    header
        .first_frame()
        .cloned()
        .ok_or(PreviewError::EmptyHeader)
}

/// Previews a run, dispatching on its variant.
///
/// Both paths report failures through [`PreviewError`]; callers surface a
/// single user-visible failure state regardless of the cause.
///
/// # Errors
/// Propagates the catalog-path or header-path error.
pub fn run_preview(run: &Run) -> Result<Array2<f64>> {
    match run {
        Run::Catalog(catalog) => catalog_preview(catalog),
        Run::Header(header) => header_preview(header),
    }
}

/// Log-scaled display transform.
///
/// Computes `ln(A * [A > 0] + [A < 1])` element-wise: values at or below
/// zero display as `ln(1) = 0`, values in `(0, 1)` display as `ln(A + 1)`,
/// and values at or above 1 display as `ln(A)` exactly. The input array is
/// never modified; display scaling is separate from the stored raw data.
#[must_use]
pub fn log_display(raw: &Array2<f64>) -> Array2<f64> {
    raw.mapv(|v| {
        let positive = if v > 0.0 { v } else { 0.0 };
        let offset = if v < 1.0 { 1.0 } else { 0.0 };
        (positive + offset).ln()
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use approx::assert_abs_diff_eq;
    use ndarray::{array, ArrayD};

    use super::*;
    use crate::catalog::{DataKey, Descriptor, Stream};
    use crate::source::MemorySource;

    fn image_stream(name: &str, shape: Vec<usize>) -> Stream {
        Stream::new(name)
            .with_descriptor(Descriptor::new().with_field("image", DataKey::new(shape)))
    }

    #[test]
    fn primary_wins_over_other_qualifying_streams() {
        let catalog = Catalog::new()
            .with_stream(image_stream("dark", vec![32, 32]))
            .with_stream(image_stream("primary", vec![64, 64]));

        assert_eq!(guess_stream_field(&catalog), Some(("primary", "image")));
    }

    #[test]
    fn natural_order_when_primary_missing() {
        let catalog = Catalog::new()
            .with_stream(
                Stream::new("baseline")
                    .with_descriptor(Descriptor::new().with_field("i0", DataKey::new(vec![]))),
            )
            .with_stream(image_stream("dark", vec![32, 32]))
            .with_stream(image_stream("flat", vec![16, 16]));

        assert_eq!(guess_stream_field(&catalog), Some(("dark", "image")));
    }

    #[test]
    fn scalar_and_vector_fields_never_qualify() {
        let catalog = Catalog::new().with_stream(
            Stream::new("primary").with_descriptor(
                Descriptor::new()
                    .with_field("i0", DataKey::new(vec![]))
                    .with_field("spectrum", DataKey::new(vec![2048])),
            ),
        );

        assert_eq!(guess_stream_field(&catalog), None);
    }

    #[test]
    fn streams_without_descriptors_are_skipped() {
        let catalog = Catalog::new()
            .with_stream(Stream::new("primary"))
            .with_stream(image_stream("dark", vec![8, 8]));

        assert_eq!(guess_stream_field(&catalog), Some(("dark", "image")));
    }

    #[test]
    fn only_first_descriptor_is_inspected() {
        let catalog = Catalog::new().with_stream(
            Stream::new("primary")
                .with_descriptor(Descriptor::new().with_field("i0", DataKey::new(vec![])))
                .with_descriptor(
                    Descriptor::new().with_field("image", DataKey::new(vec![64, 64])),
                ),
        );

        assert_eq!(guess_stream_field(&catalog), None);
    }

    #[test]
    fn reduction_preserves_last_two_axes() {
        let data = ArrayD::from_shape_vec(vec![1, 2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
            .unwrap();
        let reduced = reduce_to_2d(data).unwrap();
        assert_eq!(reduced, array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    }

    #[test]
    fn reduction_drops_leading_axis_keeping_index_zero() {
        // Shape (2, 2, 2): the first plane survives.
        let data = ArrayD::from_shape_vec(
            vec![2, 2, 2],
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
        )
        .unwrap();
        let reduced = reduce_to_2d(data).unwrap();
        assert_eq!(reduced, array![[1.0, 2.0], [3.0, 4.0]]);
    }

    #[test]
    fn reduction_of_2d_is_identity() {
        let data = ArrayD::from_shape_vec(vec![2, 2], vec![9.0, 8.0, 7.0, 6.0]).unwrap();
        let reduced = reduce_to_2d(data).unwrap();
        assert_eq!(reduced, array![[9.0, 8.0], [7.0, 6.0]]);
    }

    #[test]
    fn over_squeezed_arrays_are_rejected() {
        let vector = ArrayD::from_shape_vec(vec![1, 5], vec![1.0; 5]).unwrap();
        assert!(matches!(
            reduce_to_2d(vector),
            Err(PreviewError::ShapeTooSmall { ndim: 1 })
        ));

        let scalar = ArrayD::from_shape_vec(vec![1, 1], vec![42.0]).unwrap();
        assert!(matches!(
            reduce_to_2d(scalar),
            Err(PreviewError::ShapeTooSmall { ndim: 0 })
        ));
    }

    #[test]
    fn log_display_is_exact_log_at_or_above_one() {
        let raw = array![[1.0, std::f64::consts::E], [10.0, 1234.5]];
        let display = log_display(&raw);
        for (&r, &d) in raw.iter().zip(display.iter()) {
            assert_abs_diff_eq!(d, r.ln());
        }
    }

    #[test]
    fn log_display_zeroes_nonpositive_values() {
        let raw = array![[0.0, -3.5], [-1e9, 0.0]];
        let display = log_display(&raw);
        for &d in display.iter() {
            assert_abs_diff_eq!(d, 0.0);
        }
    }

    #[test]
    fn log_display_offsets_fractional_values() {
        let raw = array![[0.5]];
        let display = log_display(&raw);
        assert_abs_diff_eq!(display[[0, 0]], 1.5_f64.ln());
    }

    #[test]
    fn catalog_preview_materializes_chosen_field() {
        let data = ArrayD::from_shape_vec(vec![1, 2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let catalog = Catalog::new().with_stream(
            Stream::new("primary")
                .with_descriptor(
                    Descriptor::new().with_field("image", DataKey::new(vec![1, 2, 2])),
                )
                .with_source("image", Arc::new(MemorySource::new(data))),
        );

        let preview = catalog_preview(&catalog).unwrap();
        assert_eq!(preview, array![[1.0, 2.0], [3.0, 4.0]]);
    }

    #[test]
    fn catalog_preview_without_source_is_not_loadable() {
        let catalog = Catalog::new().with_stream(image_stream("primary", vec![64, 64]));
        assert!(matches!(
            catalog_preview(&catalog),
            Err(PreviewError::FieldNotLoadable { .. })
        ));
    }

    #[test]
    fn empty_header_is_reported() {
        let header = LegacyHeader::default();
        assert!(matches!(
            header_preview(&header),
            Err(PreviewError::EmptyHeader)
        ));
    }

    #[test]
    fn header_preview_returns_first_frame() {
        let header = LegacyHeader::new(vec![array![[1.0, 2.0]], array![[3.0, 4.0]]]);
        assert_eq!(header_preview(&header).unwrap(), array![[1.0, 2.0]]);
    }
}
