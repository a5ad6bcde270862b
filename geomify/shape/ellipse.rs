//! Ellipses and circles, axis-aligned or rotated.

use std::f64::consts::PI;

use geo::{normalize_angle, rotate_about, PointF64, PointI32};
use rand::Rng;
use rand_pcg::Pcg32;

use crate::raster;
use crate::scanline::{self, Scanline};
use crate::shape::{perturb_coord, perturb_extent, random_coord, random_extent, ANGLE_DELTA};

// how many perimeter points the rotated ellipse is sampled at before the
// row min/max pass
const PERIMETER_SAMPLES: u32 = 60;

/// An axis-aligned ellipse.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Ellipse {
    /// Center x coordinate.
    pub x: i32,
    /// Center y coordinate.
    pub y: i32,
    /// Horizontal semi-axis, at least 1.
    pub rx: i32,
    /// Vertical semi-axis, at least 1.
    pub ry: i32,
}

impl Ellipse {
    /// Randomize center and semi-axes.
    pub fn setup(&mut self, width: u32, height: u32, rng: &mut Pcg32) {
        self.x = random_coord(width, rng);
        self.y = random_coord(height, rng);
        self.rx = random_extent(width, rng);
        self.ry = random_extent(height, rng);
    }

    /// Move the center or resize one semi-axis.
    pub fn mutate(&mut self, width: u32, height: u32, rng: &mut Pcg32) {
        match rng.gen_range(0..3) {
            0 => {
                self.x = perturb_coord(self.x, width, rng);
                self.y = perturb_coord(self.y, height, rng);
            }
            1 => self.rx = perturb_extent(self.rx, width, rng),
            _ => self.ry = perturb_extent(self.ry, height, rng),
        }
    }

    /// One symmetric run per covered row.
    pub fn rasterize(&self, width: u32, height: u32) -> Vec<Scanline> {
        scanline::clip(
            row_spans(self.x, self.y, self.rx, self.ry),
            width,
            height,
        )
    }

    /// `[x, y, rx, ry]`
    pub fn params(&self) -> Vec<i32> {
        vec![self.x, self.y, self.rx, self.ry]
    }
}

/// An ellipse rotated about its center.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotatedEllipse {
    /// Center x coordinate.
    pub x: i32,
    /// Center y coordinate.
    pub y: i32,
    /// First semi-axis, at least 1.
    pub rx: i32,
    /// Second semi-axis, at least 1.
    pub ry: i32,
    /// Rotation about the center, radians in `[0, 2π)`.
    pub angle: f64,
}

impl RotatedEllipse {
    /// Randomize center, semi-axes and rotation.
    pub fn setup(&mut self, width: u32, height: u32, rng: &mut Pcg32) {
        self.x = random_coord(width, rng);
        self.y = random_coord(height, rng);
        self.rx = random_extent(width, rng);
        self.ry = random_extent(height, rng);
        self.angle = rng.gen_range(0.0..2.0 * PI);
    }

    /// Move the center, resize one semi-axis or turn the ellipse.
    pub fn mutate(&mut self, width: u32, height: u32, rng: &mut Pcg32) {
        match rng.gen_range(0..4) {
            0 => {
                self.x = perturb_coord(self.x, width, rng);
                self.y = perturb_coord(self.y, height, rng);
            }
            1 => self.rx = perturb_extent(self.rx, width, rng),
            2 => self.ry = perturb_extent(self.ry, height, rng),
            _ => {
                self.angle = normalize_angle(self.angle + rng.gen_range(-ANGLE_DELTA..ANGLE_DELTA));
            }
        }
    }

    /// Fill of the rotated perimeter samples.
    pub fn rasterize(&self, width: u32, height: u32) -> Vec<Scanline> {
        let center = PointF64::new(f64::from(self.x), f64::from(self.y));

        let points: Vec<PointI32> = (0..PERIMETER_SAMPLES)
            .map(|i| {
                let t = 2.0 * PI * f64::from(i) / f64::from(PERIMETER_SAMPLES);
                let pt = PointF64::new(
                    center.x + f64::from(self.rx) * t.cos(),
                    center.y + f64::from(self.ry) * t.sin(),
                );

                rotate_about(&pt, &center, self.angle).round()
            })
            .collect();

        raster::polygon_scanlines(&points, width, height)
    }

    /// `[x, y, rx, ry, angle_degrees]`
    pub fn params(&self) -> Vec<i32> {
        vec![
            self.x,
            self.y,
            self.rx,
            self.ry,
            self.angle.to_degrees().round() as i32,
        ]
    }
}

/// A circle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Circle {
    /// Center x coordinate.
    pub x: i32,
    /// Center y coordinate.
    pub y: i32,
    /// Radius, at least 1.
    pub r: i32,
}

impl Circle {
    /// Randomize center and radius.
    pub fn setup(&mut self, width: u32, height: u32, rng: &mut Pcg32) {
        self.x = random_coord(width, rng);
        self.y = random_coord(height, rng);
        self.r = random_extent(width.min(height), rng);
    }

    /// Move the center or resize the radius.
    pub fn mutate(&mut self, width: u32, height: u32, rng: &mut Pcg32) {
        if rng.gen_range(0..2) == 0 {
            self.x = perturb_coord(self.x, width, rng);
            self.y = perturb_coord(self.y, height, rng);
        } else {
            self.r = perturb_extent(self.r, width.min(height), rng);
        }
    }

    /// One symmetric run per covered row.
    pub fn rasterize(&self, width: u32, height: u32) -> Vec<Scanline> {
        scanline::clip(row_spans(self.x, self.y, self.r, self.r), width, height)
    }

    /// `[x, y, r]`
    pub fn params(&self) -> Vec<i32> {
        vec![self.x, self.y, self.r]
    }
}

// per-row midpoint evaluation of an axis-aligned ellipse outline
fn row_spans(x: i32, y: i32, rx: i32, ry: i32) -> Vec<Scanline> {
    (-ry..=ry)
        .map(move |dy| {
            let fy = f64::from(dy) / f64::from(ry);
            let dx = (f64::from(rx) * (1.0 - fy * fy).max(0.0).sqrt()).floor() as i32;

            Scanline::new(y + dy, x - dx, x + dx + 1)
        })
        .collect()
}
