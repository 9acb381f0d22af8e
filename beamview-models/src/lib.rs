//! beamview-models: Fittable 1-D model plugins.
//!
//! Defines the [`Fittable1D`] plugin contract for parametric 1-D models,
//! a Levenberg-Marquardt least-squares fitter, and a Gaussian model.
//!

mod error;
mod fittable;
mod gaussian;
mod lm;

pub use error::{Error, Result};
pub use fittable::Fittable1D;
pub use gaussian::Gaussian1D;
pub use lm::{fit, FitResult, LmConfig};
