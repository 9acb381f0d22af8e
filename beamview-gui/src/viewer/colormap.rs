//! Colormap definitions and application logic.

use crate::util::{f32_to_u8, usize_to_f32};

/// Available colormaps for the preview image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Colormap {
    /// Black to white.
    #[default]
    Grayscale,
    /// Black to red to yellow to white.
    Hot,
    /// Viridis (anchor-interpolated approximation).
    Viridis,
}

impl std::fmt::Display for Colormap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Colormap::Grayscale => write!(f, "Grayscale"),
            Colormap::Hot => write!(f, "Hot (Thermal)"),
            Colormap::Viridis => write!(f, "Viridis"),
        }
    }
}

/// Viridis anchor colors at t = 0, 0.25, 0.5, 0.75, 1.
const VIRIDIS_ANCHORS: [[f32; 3]; 5] = [
    [68.0, 1.0, 84.0],
    [59.0, 82.0, 139.0],
    [33.0, 145.0, 140.0],
    [94.0, 201.0, 98.0],
    [253.0, 231.0, 37.0],
];

impl Colormap {
    /// Apply the colormap to a normalized value in `[0, 1]`.
    #[must_use]
    pub fn apply(self, val: f32) -> [u8; 4] {
        let val = val.clamp(0.0, 1.0);
        match self {
            Colormap::Grayscale => {
                let v = f32_to_u8(val * 255.0);
                [v, v, v, 255]
            }
            Colormap::Hot => {
                // Three ramps: red in [0, 1/3), green in [1/3, 2/3), blue above.
                let r = f32_to_u8(val * 3.0 * 255.0);
                let g = f32_to_u8((val * 3.0 - 1.0) * 255.0);
                let b = f32_to_u8((val * 3.0 - 2.0) * 255.0);
                [r, g, b, 255]
            }
            Colormap::Viridis => {
                let scaled = val * 4.0;
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let low = (scaled.floor() as usize).min(3);
                let t = scaled - usize_to_f32(low);
                let a = VIRIDIS_ANCHORS[low];
                let b = VIRIDIS_ANCHORS[low + 1];
                [
                    f32_to_u8(a[0] + (b[0] - a[0]) * t),
                    f32_to_u8(a[1] + (b[1] - a[1]) * t),
                    f32_to_u8(a[2] + (b[2] - a[2]) * t),
                    255,
                ]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_black_and_full_scale() {
        assert_eq!(Colormap::Grayscale.apply(0.0), [0, 0, 0, 255]);
        assert_eq!(Colormap::Grayscale.apply(1.0), [255, 255, 255, 255]);
        assert_eq!(Colormap::Hot.apply(0.0), [0, 0, 0, 255]);
        assert_eq!(Colormap::Hot.apply(1.0), [255, 255, 255, 255]);
        assert_eq!(Colormap::Viridis.apply(1.0), [253, 231, 37, 255]);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        assert_eq!(Colormap::Grayscale.apply(-0.5), [0, 0, 0, 255]);
        assert_eq!(Colormap::Grayscale.apply(1.5), [255, 255, 255, 255]);
    }
}
