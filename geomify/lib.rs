//! Reconstruct raster images out of randomly mutated translucent geometric
//! shapes.
//!
//! A [`Model`] owns the target image and a working canvas. Every call to
//! [`Model::step`] runs a batch of parallel hill climbs over random candidate
//! shapes, solves for the best color of the winner and composites it onto the
//! canvas, chipping away at the difference between the two images. The caller
//! decides when to stop stepping and what to do with the committed shapes,
//! the [`exporter`] module can serialize them to SVG, JSON or BMP.

#![deny(missing_docs)]

pub mod bitmap;
pub mod climb;
pub mod core;
pub mod error;
pub mod exporter;
pub mod model;
pub mod raster;
pub mod scanline;
pub mod shape;

pub use crate::bitmap::{Bitmap, Rgba};
pub use crate::climb::State;
pub use crate::error::Error;
pub use crate::model::{Model, ShapeResult};
pub use crate::scanline::Scanline;
pub use crate::shape::{Shape, ShapeKind, ShapeMutator};
