//! Background preview worker.

use std::sync::mpsc::Sender;

use beamview_core::{guess_stream_field, run_preview, Run};

use crate::message::PreviewMessage;

/// Runs the preview pipeline for one request and reports the outcome.
///
/// Every failure kind collapses into a single [`PreviewMessage::Failed`];
/// the error detail goes to the log only.
pub fn preview_worker(run: &Run, generation: u64, tx: &Sender<PreviewMessage>) {
    let origin = match run {
        Run::Catalog(catalog) => {
            guess_stream_field(catalog).map(|(s, f)| (s.to_owned(), f.to_owned()))
        }
        Run::Header(_) => None,
    };

    match run_preview(run) {
        Ok(image) => {
            let _ = tx.send(PreviewMessage::Ready {
                generation,
                image: Box::new(image),
                origin,
            });
        }
        Err(e) => {
            log::error!("preview failed: {e}");
            let _ = tx.send(PreviewMessage::Failed { generation });
        }
    }
}
