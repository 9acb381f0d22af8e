//! Preview panel: request bookkeeping and display state.

mod worker;

pub use worker::preview_worker;

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use eframe::egui;
use ndarray::Array2;

use beamview_core::Run;

use crate::message::PreviewMessage;
use crate::state::DisplayState;

/// Overlay text while a catalog preview is in flight.
pub const LOADING_TEXT: &str = "LOADING...";
/// Overlay text for every preview failure.
pub const UNKNOWN_FORMAT_TEXT: &str = "UNKNOWN DATA FORMAT";

/// The preview panel widget state.
///
/// Each `preview` call bumps a request generation and offloads the
/// pipeline to a worker thread; results are applied from the UI thread in
/// [`PreviewPanel::handle_messages`], where stale generations are dropped.
pub struct PreviewPanel {
    display: DisplayState,
    imgdata: Option<Array2<f64>>,
    origin: Option<(String, String)>,
    generation: u64,
    delivered: u64,

    /// Cached texture for the current image, rebuilt after every change.
    pub(crate) texture: Option<egui::TextureHandle>,
    /// Set when the view should refit to new content.
    pub(crate) needs_refit: bool,

    rx: Receiver<PreviewMessage>,
    tx: Sender<PreviewMessage>,
}

impl Default for PreviewPanel {
    fn default() -> Self {
        let (tx, rx) = channel();
        Self {
            display: DisplayState::Empty,
            imgdata: None,
            origin: None,
            generation: 0,
            delivered: 0,
            texture: None,
            needs_refit: false,
            rx,
            tx,
        }
    }
}

impl PreviewPanel {
    /// Starts an asynchronous preview of the given run.
    ///
    /// A new call supersedes any in-flight request: the older result will
    /// be discarded when it arrives.
    pub fn preview(&mut self, run: Arc<Run>) {
        self.generation += 1;
        let generation = self.generation;

        // The catalog path does real work (search + load + reduce); tell
        // the user immediately. The header path is a plain memory read.
        if matches!(run.as_ref(), Run::Catalog(_)) {
            self.show_text(LOADING_TEXT);
        }

        let tx = self.tx.clone();
        thread::spawn(move || preview_worker(&run, generation, &tx));
    }

    /// Drains pending worker messages.
    pub fn handle_messages(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.apply(msg);
        }
    }

    /// Applies one worker message, dropping stale generations.
    pub(crate) fn apply(&mut self, msg: PreviewMessage) {
        match msg {
            PreviewMessage::Ready {
                generation,
                image,
                origin,
            } => {
                self.delivered = self.delivered.max(generation);
                if generation == self.generation {
                    self.origin = origin;
                    self.show_image(*image);
                }
            }
            PreviewMessage::Failed { generation } => {
                self.delivered = self.delivered.max(generation);
                if generation == self.generation {
                    self.origin = None;
                    self.show_text(UNKNOWN_FORMAT_TEXT);
                }
            }
        }
    }

    fn show_image(&mut self, image: Array2<f64>) {
        self.imgdata = Some(image);
        self.display = DisplayState::Image;
        self.texture = None;
        self.needs_refit = true;
    }

    fn show_text(&mut self, text: &str) {
        self.imgdata = None;
        self.texture = None;
        self.display = DisplayState::Text(text.to_owned());
        self.needs_refit = true;
    }

    /// Current display state.
    #[must_use]
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Raw 2-D data of the displayed image, if any.
    #[must_use]
    pub fn imgdata(&self) -> Option<&Array2<f64>> {
        self.imgdata.as_ref()
    }

    /// (stream, field) chosen for the last successful catalog preview.
    #[must_use]
    pub fn origin(&self) -> Option<(&str, &str)> {
        self.origin.as_ref().map(|(s, f)| (s.as_str(), f.as_str()))
    }

    /// Returns true while a request is in flight.
    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.delivered < self.generation
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::channel;
    use std::sync::Arc;
    use std::time::Duration;

    use ndarray::{array, ArrayD};

    use beamview_core::{
        Catalog, DataKey, Descriptor, LegacyHeader, MemorySource, Run, Stream,
    };

    use super::*;

    fn image_run(shape: &[usize]) -> Run {
        let len: usize = shape.iter().product();
        #[allow(clippy::cast_precision_loss)]
        let data =
            ArrayD::from_shape_vec(shape.to_vec(), (0..len).map(|i| i as f64).collect()).unwrap();
        Run::Catalog(
            Catalog::new().with_stream(
                Stream::new("primary")
                    .with_descriptor(
                        Descriptor::new().with_field("image", DataKey::new(shape.to_vec())),
                    )
                    .with_source("image", Arc::new(MemorySource::new(data))),
            ),
        )
    }

    fn drain_one(panel: &mut PreviewPanel) {
        // Worker threads are fast but asynchronous; poll briefly.
        for _ in 0..200 {
            panel.handle_messages();
            if !panel.is_waiting() {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("worker never reported back");
    }

    #[test]
    fn catalog_preview_ends_in_image_state() {
        let mut panel = PreviewPanel::default();
        panel.preview(Arc::new(image_run(&[1, 50, 50])));
        assert_eq!(panel.display().text(), Some(LOADING_TEXT));

        drain_one(&mut panel);
        assert_eq!(*panel.display(), DisplayState::Image);
        let imgdata = panel.imgdata().unwrap();
        assert_eq!(imgdata.dim(), (50, 50));
        // The held data is the source with its length-1 axis squeezed away.
        assert_eq!(imgdata[[0, 0]], 0.0);
        assert_eq!(imgdata[[0, 49]], 49.0);
        assert_eq!(imgdata[[49, 49]], 2499.0);
        assert_eq!(panel.origin(), Some(("primary", "image")));
    }

    #[test]
    fn empty_header_ends_in_unknown_format_text() {
        let mut panel = PreviewPanel::default();
        panel.preview(Arc::new(Run::Header(LegacyHeader::default())));

        drain_one(&mut panel);
        assert_eq!(panel.display().text(), Some(UNKNOWN_FORMAT_TEXT));
        assert!(panel.imgdata().is_none());
    }

    #[test]
    fn scalar_only_catalog_ends_in_unknown_format_text() {
        let catalog = Catalog::new().with_stream(
            Stream::new("primary")
                .with_descriptor(Descriptor::new().with_field("i0", DataKey::new(vec![]))),
        );
        let mut panel = PreviewPanel::default();
        panel.preview(Arc::new(Run::Catalog(catalog)));

        drain_one(&mut panel);
        assert_eq!(panel.display().text(), Some(UNKNOWN_FORMAT_TEXT));
    }

    #[test]
    fn stale_results_never_overwrite_newer_ones() {
        // Drive apply() directly so message ordering is deterministic.
        let (_tx, rx) = channel();
        let (tx2, _rx2) = channel();
        let mut panel = PreviewPanel {
            rx,
            tx: tx2,
            ..PreviewPanel::default()
        };

        panel.generation = 2;

        // Newer request's result lands first.
        panel.apply(PreviewMessage::Ready {
            generation: 2,
            image: Box::new(array![[9.0]]),
            origin: None,
        });
        assert_eq!(*panel.display(), DisplayState::Image);

        // The superseded request's failure arrives late and is dropped.
        panel.apply(PreviewMessage::Failed { generation: 1 });
        assert_eq!(*panel.display(), DisplayState::Image);
        assert_eq!(panel.imgdata().unwrap()[[0, 0]], 9.0);

        // Same for a stale success overwriting a newer failure.
        panel.generation = 4;
        panel.apply(PreviewMessage::Failed { generation: 4 });
        assert_eq!(panel.display().text(), Some(UNKNOWN_FORMAT_TEXT));
        panel.apply(PreviewMessage::Ready {
            generation: 3,
            image: Box::new(array![[1.0]]),
            origin: None,
        });
        assert_eq!(panel.display().text(), Some(UNKNOWN_FORMAT_TEXT));
        assert!(panel.imgdata().is_none());
    }

    #[test]
    fn switching_states_clears_the_alternate_element() {
        let mut panel = PreviewPanel::default();

        panel.show_image(array![[1.0, 2.0]]);
        assert!(panel.imgdata().is_some());
        assert_eq!(*panel.display(), DisplayState::Image);

        panel.show_text(UNKNOWN_FORMAT_TEXT);
        assert!(panel.imgdata().is_none());
        assert_eq!(panel.display().text(), Some(UNKNOWN_FORMAT_TEXT));

        panel.show_image(array![[3.0]]);
        assert_eq!(*panel.display(), DisplayState::Image);
        assert!(panel.display().text().is_none());
    }
}
