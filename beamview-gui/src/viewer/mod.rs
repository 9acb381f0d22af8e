//! Preview image rendering.

mod colormap;
mod texture;

pub use colormap::Colormap;
pub use texture::{plot_y_to_row, render_preview};
