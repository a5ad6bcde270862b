//! Geometric primitives and utilities shared by the geomify crates.

#![deny(missing_docs)]

pub mod angle;
pub mod point;

pub use crate::angle::{normalize_angle, rotate_about};
pub use crate::point::{Point, PointF64, PointI32};
