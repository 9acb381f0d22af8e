//! Texture generation for the preview image.

use egui::ColorImage;
use ndarray::Array2;
use rayon::prelude::*;

use beamview_core::log_display;

use crate::util::{f64_to_usize_bounded, usize_to_f64};
use crate::viewer::Colormap;

/// Render raw image data to a color texture.
///
/// Applies the log display transform, normalizes to the transformed data's
/// min/max (auto-levels), and maps through the colormap. The raw array is
/// left untouched. Texture row 0 is array row 0; the plot's bottom-up
/// y-axis is reconciled in [`plot_y_to_row`].
#[must_use]
pub fn render_preview(raw: &Array2<f64>, colormap: Colormap) -> ColorImage {
    let display = log_display(raw);
    let (rows, cols) = display.dim();
    if rows == 0 || cols == 0 {
        return ColorImage::new([1, 1], egui::Color32::BLACK);
    }

    let (min, max) = finite_min_max(&display);
    let range = (max - min).max(f64::EPSILON);

    let mut pixels = vec![0_u8; rows * cols * 4];
    pixels
        .par_chunks_exact_mut(cols * 4)
        .enumerate()
        .for_each(|(row, row_pixels)| {
            for (col, px) in row_pixels.chunks_exact_mut(4).enumerate() {
                let value = display[[row, col]];
                let normalized = if value.is_finite() {
                    (value - min) / range
                } else {
                    0.0
                };
                #[allow(clippy::cast_possible_truncation)]
                let rgba = colormap.apply(normalized as f32);
                px.copy_from_slice(&rgba);
            }
        });

    ColorImage::from_rgba_unmultiplied([cols, rows], &pixels)
}

/// Min and max over finite values, ignoring NaN/inf from the transform.
fn finite_min_max(display: &Array2<f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in display.iter() {
        if v.is_finite() {
            min = min.min(v);
            max = max.max(v);
        }
    }
    if min > max {
        (0.0, 1.0)
    } else {
        (min, max)
    }
}

/// Map a plot-space y coordinate (bottom-up axis) to an array row index
/// (top-down, row-major).
///
/// The image occupies plot y in `[0, rows]` with array row 0 along the top
/// edge; this is the vertical flip between the two conventions.
#[must_use]
pub fn plot_y_to_row(y: f64, rows: usize) -> Option<usize> {
    let flipped = usize_to_f64(rows) - y;
    f64_to_usize_bounded(flipped.floor(), rows)
}
