//! Main application state and logic.

use std::path::PathBuf;
use std::sync::Arc;

use eframe::egui;
use ndarray::ArrayD;

use beamview_core::{Catalog, DataKey, Descriptor, MemorySource, Run, Stream};

use crate::preview::PreviewPanel;
use crate::viewer::{render_preview, Colormap};

/// Main application state.
pub struct BeamviewApp {
    /// The preview panel widget.
    pub(crate) panel: PreviewPanel,
    /// Current colormap selection.
    pub(crate) colormap: Colormap,
    /// Label of the last loaded run source.
    pub(crate) source_label: Option<String>,
    /// User-facing status message.
    pub(crate) status_text: String,
    /// Current cursor info (row, col, raw value).
    pub(crate) cursor_info: Option<(usize, usize, f64)>,
}

impl Default for BeamviewApp {
    fn default() -> Self {
        Self {
            panel: PreviewPanel::default(),
            colormap: Colormap::default(),
            source_label: None,
            status_text: "Ready".to_owned(),
            cursor_info: None,
        }
    }
}

impl BeamviewApp {
    /// Open a frame file chosen by the user and preview it.
    pub fn open_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Beamview frames", &["bvf", "h5", "hdf5", "nxs"])
            .pick_file()
        else {
            return;
        };
        self.preview_file(path);
    }

    fn preview_file(&mut self, path: PathBuf) {
        match beamview_io::open_frames(&path) {
            Ok(header) => {
                self.source_label = Some(
                    path.file_name()
                        .map_or_else(|| path.display().to_string(), |n| {
                            n.to_string_lossy().into_owned()
                        }),
                );
                self.status_text = "Previewing file".to_owned();
                self.panel.preview(Arc::new(Run::Header(header)));
            }
            Err(e) => {
                log::error!("failed to open {}: {e}", path.display());
                self.status_text = format!("Error: {e}");
            }
        }
    }

    /// Preview a synthetic demo catalog.
    pub fn load_demo(&mut self) {
        self.source_label = Some("demo catalog".to_owned());
        self.status_text = "Previewing demo catalog".to_owned();
        self.panel.preview(Arc::new(demo_run()));
    }

    /// Export the currently displayed preview to a PNG file.
    pub fn export_png(&mut self) {
        let Some(raw) = self.panel.imgdata() else {
            self.status_text = "Nothing to export".to_owned();
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .set_file_name("preview.png")
            .save_file()
        else {
            return;
        };

        let rendered = render_preview(raw, self.colormap);
        match save_png(&rendered, &path) {
            Ok(()) => self.status_text = format!("Saved {}", path.display()),
            Err(e) => {
                log::error!("PNG export failed: {e}");
                self.status_text = format!("Error: {e}");
            }
        }
    }
}

/// Write a rendered color image as an RGBA PNG.
fn save_png(rendered: &egui::ColorImage, path: &std::path::Path) -> anyhow::Result<()> {
    let [width, height] = rendered.size;
    let mut bytes = Vec::with_capacity(width * height * 4);
    for px in &rendered.pixels {
        bytes.extend_from_slice(&px.to_array());
    }

    let buffer = image::RgbaImage::from_raw(
        u32::try_from(width)?,
        u32::try_from(height)?,
        bytes,
    )
    .ok_or_else(|| anyhow::anyhow!("pixel buffer does not match image dimensions"))?;
    buffer.save(path)?;
    Ok(())
}

/// A synthetic catalog run: one baseline stream of scalars and a primary
/// stream whose image field holds a single-frame Gaussian spot.
fn demo_run() -> Run {
    const SIZE: usize = 256;

    let data = ArrayD::from_shape_fn(vec![1, SIZE, SIZE], |idx| {
        let (row, col) = (idx[1], idx[2]);
        #[allow(clippy::cast_precision_loss)]
        let (y, x) = (row as f64 - 128.0, col as f64 - 128.0);
        let spot = 4000.0 * (-(x * x + y * y) / (2.0 * 24.0 * 24.0)).exp();
        let halo = 90.0 * (-((x * x + y * y).sqrt() - 90.0).powi(2) / 180.0).exp();
        spot + halo
    });

    let catalog = Catalog::new()
        .with_stream(
            Stream::new("baseline").with_descriptor(
                Descriptor::new()
                    .with_field("ring_current", DataKey::new(vec![]))
                    .with_field("sample_temp", DataKey::new(vec![])),
            ),
        )
        .with_stream(
            Stream::new("primary")
                .with_descriptor(
                    Descriptor::new()
                        .with_field("i0", DataKey::new(vec![]))
                        .with_field("image", DataKey::new(vec![1, SIZE, SIZE])),
                )
                .with_source("image", Arc::new(MemorySource::new(data))),
        );

    Run::Catalog(catalog)
}

impl eframe::App for BeamviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.panel.handle_messages();
        self.render_side_panel(ctx);
        self.render_central_panel(ctx);

        if self.panel.is_waiting() {
            ctx.request_repaint();
        }
    }
}
