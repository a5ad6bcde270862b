//! Axis-aligned and rotated rectangles.

use geo::{normalize_angle, rotate_about, PointF64, PointI32};
use rand::Rng;
use rand_pcg::Pcg32;

use crate::raster;
use crate::scanline::{self, Scanline};
use crate::shape::{perturb_coord, random_coord, random_extent, ANGLE_DELTA};

/// An axis-aligned rectangle covering `[x1, x2) x [y1, y2)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x1: i32,
    /// Top edge.
    pub y1: i32,
    /// Right edge, exclusive.
    pub x2: i32,
    /// Bottom edge, exclusive.
    pub y2: i32,
}

impl Rect {
    /// Randomize the two corners, normalized to a non empty extent.
    pub fn setup(&mut self, width: u32, height: u32, rng: &mut Pcg32) {
        self.x1 = random_coord(width, rng);
        self.y1 = random_coord(height, rng);
        self.x2 = random_coord(width, rng);
        self.y2 = random_coord(height, rng);

        self.normalize();
    }

    /// Move one of the two corners.
    pub fn mutate(&mut self, width: u32, height: u32, rng: &mut Pcg32) {
        if rng.gen_range(0..2) == 0 {
            self.x1 = perturb_coord(self.x1, width, rng);
            self.y1 = perturb_coord(self.y1, height, rng);
        } else {
            self.x2 = perturb_coord(self.x2, width, rng);
            self.y2 = perturb_coord(self.y2, height, rng);
        }

        self.normalize();
    }

    /// One run per covered row.
    pub fn rasterize(&self, width: u32, height: u32) -> Vec<Scanline> {
        scanline::clip(
            (self.y1..self.y2).map(|y| Scanline::new(y, self.x1, self.x2)),
            width,
            height,
        )
    }

    /// `[x1, y1, x2, y2]`
    pub fn params(&self) -> Vec<i32> {
        vec![self.x1, self.y1, self.x2, self.y2]
    }

    fn normalize(&mut self) {
        if self.x1 > self.x2 {
            std::mem::swap(&mut self.x1, &mut self.x2);
        }
        if self.y1 > self.y2 {
            std::mem::swap(&mut self.y1, &mut self.y2);
        }

        // keep at least one pixel of extent
        if self.x1 == self.x2 {
            self.x2 += 1;
        }
        if self.y1 == self.y2 {
            self.y2 += 1;
        }
    }
}

/// A rectangle rotated about its center.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotatedRect {
    /// Left edge before rotation.
    pub x1: i32,
    /// Top edge before rotation.
    pub y1: i32,
    /// Right edge before rotation.
    pub x2: i32,
    /// Bottom edge before rotation.
    pub y2: i32,
    /// Rotation about the center, radians in `[0, 2π)`.
    pub angle: f64,
}

impl RotatedRect {
    /// Randomize as a center plus half-extents, then rotate by a random
    /// angle.
    pub fn setup(&mut self, width: u32, height: u32, rng: &mut Pcg32) {
        let cx = random_coord(width, rng);
        let cy = random_coord(height, rng);
        let hw = random_extent(width, rng);
        let hh = random_extent(height, rng);

        self.x1 = num::clamp(cx - hw, 0, width as i32 - 1);
        self.y1 = num::clamp(cy - hh, 0, height as i32 - 1);
        self.x2 = num::clamp(cx + hw, 0, width as i32 - 1);
        self.y2 = num::clamp(cy + hh, 0, height as i32 - 1);
        self.angle = rng.gen_range(0.0..2.0 * std::f64::consts::PI);

        self.normalize();
    }

    /// Move one of the two corners or turn the rectangle.
    pub fn mutate(&mut self, width: u32, height: u32, rng: &mut Pcg32) {
        match rng.gen_range(0..3) {
            0 => {
                self.x1 = perturb_coord(self.x1, width, rng);
                self.y1 = perturb_coord(self.y1, height, rng);
            }
            1 => {
                self.x2 = perturb_coord(self.x2, width, rng);
                self.y2 = perturb_coord(self.y2, height, rng);
            }
            _ => {
                self.angle = normalize_angle(self.angle + rng.gen_range(-ANGLE_DELTA..ANGLE_DELTA));
            }
        }

        self.normalize();
    }

    /// The four corners after rotating about the center.
    pub fn corners(&self) -> [PointI32; 4] {
        let center = PointF64::new(
            f64::from(self.x1 + self.x2) / 2.0,
            f64::from(self.y1 + self.y2) / 2.0,
        );

        let corner = |x: i32, y: i32| {
            rotate_about(
                &PointF64::new(f64::from(x), f64::from(y)),
                &center,
                self.angle,
            )
            .round()
        };

        [
            corner(self.x1, self.y1),
            corner(self.x2, self.y1),
            corner(self.x2, self.y2),
            corner(self.x1, self.y2),
        ]
    }

    /// Fill of the rotated outline.
    pub fn rasterize(&self, width: u32, height: u32) -> Vec<Scanline> {
        raster::polygon_scanlines(&self.corners(), width, height)
    }

    /// `[x1, y1, x2, y2, angle_degrees]`
    pub fn params(&self) -> Vec<i32> {
        vec![
            self.x1,
            self.y1,
            self.x2,
            self.y2,
            self.angle.to_degrees().round() as i32,
        ]
    }

    fn normalize(&mut self) {
        if self.x1 > self.x2 {
            std::mem::swap(&mut self.x1, &mut self.x2);
        }
        if self.y1 > self.y2 {
            std::mem::swap(&mut self.y1, &mut self.y2);
        }

        if self.x1 == self.x2 {
            self.x2 += 1;
        }
        if self.y1 == self.y2 {
            self.y2 += 1;
        }
    }
}
