//! beamview-core: Run data model and preview pipeline.
//!
//! This crate provides the foundational abstractions for beamline run
//! handles (catalogs and legacy headers), lazy array materialization,
//! and the headless preview pipeline that reduces run data to a
//! displayable 2-D image.
//!

pub mod catalog;
pub mod error;
pub mod preview;
pub mod run;
pub mod source;

pub use catalog::{Catalog, DataKey, Descriptor, Stream};
pub use error::{PreviewError, Result, SourceError};
pub use preview::{
    catalog_preview, guess_stream_field, header_preview, log_display, reduce_to_2d, run_preview,
};
pub use run::{LegacyHeader, Run};
pub use source::{ArraySource, MemorySource};
