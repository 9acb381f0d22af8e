//! Control panel (left sidebar) rendering.

use eframe::egui;

use super::theme::{form_label, primary_button, stat_label, stat_value};
use crate::app::BeamviewApp;
use crate::state::DisplayState;
use crate::viewer::Colormap;

impl BeamviewApp {
    /// Render the left sidebar with run selection, colormap, and status.
    pub(crate) fn render_side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("controls")
            .resizable(false)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.heading("BEAMVIEW");
                ui.separator();

                ui.label(form_label("Run"));
                if ui.add(primary_button("Open frame file...")).clicked() {
                    self.open_file();
                }
                if ui.button("Demo catalog").clicked() {
                    self.load_demo();
                }

                ui.add_space(12.0);
                ui.label(form_label("Display"));
                egui::ComboBox::from_id_salt("colormap")
                    .selected_text(self.colormap.to_string())
                    .show_ui(ui, |ui| {
                        for cm in [Colormap::Grayscale, Colormap::Hot, Colormap::Viridis] {
                            if ui
                                .selectable_value(&mut self.colormap, cm, cm.to_string())
                                .changed()
                            {
                                // Force a texture rebuild with the new map.
                                self.panel.texture = None;
                            }
                        }
                    });

                if ui.button("Export PNG...").clicked() {
                    self.export_png();
                }

                ui.add_space(12.0);
                ui.label(form_label("Status"));
                self.render_status(ui);
            });
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        egui::Grid::new("status_grid").num_columns(2).show(ui, |ui| {
            if let Some(label) = &self.source_label {
                ui.label(stat_label("source"));
                ui.label(stat_value(label));
                ui.end_row();
            }

            if let Some((stream, field)) = self.panel.origin() {
                ui.label(stat_label("stream"));
                ui.label(stat_value(stream));
                ui.end_row();
                ui.label(stat_label("field"));
                ui.label(stat_value(field));
                ui.end_row();
            }

            if let DisplayState::Image = self.panel.display() {
                if let Some(imgdata) = self.panel.imgdata() {
                    let (rows, cols) = imgdata.dim();
                    ui.label(stat_label("shape"));
                    ui.label(stat_value(&format!("{rows} x {cols}")));
                    ui.end_row();
                }
            }

            if let Some((row, col, value)) = self.cursor_info {
                ui.label(stat_label("cursor"));
                ui.label(stat_value(&format!("[{row}, {col}] = {value:.4}")));
                ui.end_row();
            }
        });

        ui.add_space(4.0);
        ui.label(stat_label(&self.status_text));
    }
}
