//! Central panel: preview image or text overlay.

use eframe::egui;
use egui_plot::{Plot, PlotImage, PlotPoint};

use crate::app::BeamviewApp;
use crate::state::DisplayState;
use crate::util::{f64_to_usize_bounded, usize_to_f32};
use crate::viewer::{plot_y_to_row, render_preview};

impl BeamviewApp {
    /// Render the central panel with the preview image or overlay text.
    pub(crate) fn render_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| match self.panel.display().clone() {
            DisplayState::Image => self.render_image(ctx, ui),
            DisplayState::Text(message) => {
                self.cursor_info = None;
                ui.centered_and_justified(|ui| {
                    ui.label(egui::RichText::new(message).size(18.0).strong());
                });
            }
            DisplayState::Empty => {
                self.cursor_info = None;
                ui.centered_and_justified(|ui| {
                    ui.label(egui::RichText::new("No run loaded").weak());
                });
            }
        });
    }

    fn render_image(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let Some(imgdata) = self.panel.imgdata() else {
            return;
        };
        let (rows, cols) = imgdata.dim();

        if self.panel.texture.is_none() {
            let rendered = render_preview(imgdata, self.colormap);
            self.panel.texture =
                Some(ctx.load_texture("preview", rendered, egui::TextureOptions::NEAREST));
        }
        let Some(tex) = &self.panel.texture else {
            return;
        };

        let mut plot = Plot::new("preview_plot")
            .data_aspect(1.0)
            .show_grid(false);
        if self.panel.needs_refit {
            plot = plot.reset();
            self.panel.needs_refit = false;
        }

        let (w, h) = (usize_to_f32(cols), usize_to_f32(rows));
        let mut cursor_info = None;
        plot.show(ui, |plot_ui| {
            plot_ui.image(PlotImage::new(
                tex,
                PlotPoint::new(f64::from(w) / 2.0, f64::from(h) / 2.0),
                [w, h],
            ));

            if let Some(pointer) = plot_ui.pointer_coordinate() {
                let col = f64_to_usize_bounded(pointer.x.floor(), cols);
                let row = plot_y_to_row(pointer.y, rows);
                if let (Some(col), Some(row)) = (col, row) {
                    cursor_info = self
                        .panel
                        .imgdata()
                        .map(|data| (row, col, data[[row, col]]));
                }
            }
        });
        self.cursor_info = cursor_info;
    }
}
