//! The stroked primitives: lines, quadratic Bézier curves and polylines.

use geo::{PointF64, PointI32};
use rand::Rng;
use rand_pcg::Pcg32;

use crate::raster;
use crate::scanline::Scanline;
use crate::shape::{perturb_coord, random_coord};

// flattening a bézier stops when the control point deviates from the chord
// by at most half a pixel, or at this recursion depth
const MAX_FLATTEN_DEPTH: u32 = 10;

// new polyline points spawn this close to the previous one
const POLYLINE_SPREAD: i32 = 32;

const MAX_POLYLINE_POINTS: usize = 4;

/// A one pixel thick segment.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Line {
    /// First endpoint.
    pub p1: PointI32,
    /// Second endpoint.
    pub p2: PointI32,
}

impl Line {
    /// Randomize both endpoints uniformly inside the canvas.
    pub fn setup(&mut self, width: u32, height: u32, rng: &mut Pcg32) {
        self.p1 = PointI32::new(random_coord(width, rng), random_coord(height, rng));
        self.p2 = PointI32::new(random_coord(width, rng), random_coord(height, rng));
    }

    /// Move one of the two endpoints.
    pub fn mutate(&mut self, width: u32, height: u32, rng: &mut Pcg32) {
        let pt = if rng.gen_range(0..2) == 0 {
            &mut self.p1
        } else {
            &mut self.p2
        };

        pt.x = perturb_coord(pt.x, width, rng);
        pt.y = perturb_coord(pt.y, height, rng);
    }

    /// Bresenham stroke of the segment.
    pub fn rasterize(&self, width: u32, height: u32) -> Vec<Scanline> {
        raster::stroke_scanlines(&[self.p1, self.p2], width, height)
    }

    /// `[x1, y1, x2, y2]`
    pub fn params(&self) -> Vec<i32> {
        vec![self.p1.x, self.p1.y, self.p2.x, self.p2.y]
    }
}

/// A one pixel thick quadratic Bézier curve.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct QuadraticBezier {
    /// The control point.
    pub control: PointI32,
    /// First endpoint.
    pub p1: PointI32,
    /// Second endpoint.
    pub p2: PointI32,
}

impl QuadraticBezier {
    /// Randomize the endpoints and the control point.
    pub fn setup(&mut self, width: u32, height: u32, rng: &mut Pcg32) {
        self.control = PointI32::new(random_coord(width, rng), random_coord(height, rng));
        self.p1 = PointI32::new(random_coord(width, rng), random_coord(height, rng));
        self.p2 = PointI32::new(random_coord(width, rng), random_coord(height, rng));
    }

    /// Move one of the three points.
    pub fn mutate(&mut self, width: u32, height: u32, rng: &mut Pcg32) {
        let pt = match rng.gen_range(0..3) {
            0 => &mut self.control,
            1 => &mut self.p1,
            _ => &mut self.p2,
        };

        pt.x = perturb_coord(pt.x, width, rng);
        pt.y = perturb_coord(pt.y, height, rng);
    }

    /// Flatten to a polyline by recursive subdivision, then stroke it.
    pub fn rasterize(&self, width: u32, height: u32) -> Vec<Scanline> {
        let mut points = vec![self.p1];
        flatten(
            self.p1.cast(),
            self.control.cast(),
            self.p2.cast(),
            0,
            &mut points,
        );

        raster::stroke_scanlines(&points, width, height)
    }

    /// `[cx, cy, x1, y1, x2, y2]`
    pub fn params(&self) -> Vec<i32> {
        vec![
            self.control.x,
            self.control.y,
            self.p1.x,
            self.p1.y,
            self.p2.x,
            self.p2.y,
        ]
    }
}

/// A one pixel thick open polyline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyline {
    /// The vertices, at least two once set up.
    pub points: Vec<PointI32>,
}

impl Polyline {
    /// Randomize as a short walk: the first vertex is uniform, every next
    /// one lands near the previous.
    pub fn setup(&mut self, width: u32, height: u32, rng: &mut Pcg32) {
        let count = rng.gen_range(2..=MAX_POLYLINE_POINTS);

        self.points.clear();
        self.points
            .push(PointI32::new(random_coord(width, rng), random_coord(height, rng)));

        for _ in 1..count {
            let prev = *self.points.last().unwrap();
            self.points.push(PointI32::new(
                num::clamp(
                    prev.x + rng.gen_range(-POLYLINE_SPREAD..=POLYLINE_SPREAD),
                    0,
                    width as i32 - 1,
                ),
                num::clamp(
                    prev.y + rng.gen_range(-POLYLINE_SPREAD..=POLYLINE_SPREAD),
                    0,
                    height as i32 - 1,
                ),
            ));
        }
    }

    /// Move one randomly chosen vertex.
    pub fn mutate(&mut self, width: u32, height: u32, rng: &mut Pcg32) {
        if self.points.is_empty() {
            return;
        }

        let i = rng.gen_range(0..self.points.len());
        let pt = &mut self.points[i];

        pt.x = perturb_coord(pt.x, width, rng);
        pt.y = perturb_coord(pt.y, height, rng);
    }

    /// Bresenham stroke of every segment, with shared joints drawn once.
    pub fn rasterize(&self, width: u32, height: u32) -> Vec<Scanline> {
        raster::stroke_scanlines(&self.points, width, height)
    }

    /// `[x1, y1, x2, y2, ...]`
    pub fn params(&self) -> Vec<i32> {
        self.points.iter().flat_map(|p| vec![p.x, p.y]).collect()
    }
}

fn flatten(p1: PointF64, control: PointF64, p2: PointF64, depth: u32, out: &mut Vec<PointI32>) {
    if depth >= MAX_FLATTEN_DEPTH || flat_enough(&p1, &control, &p2) {
        out.push(p2.round());
        return;
    }

    let left = p1.midpoint(&control);
    let right = control.midpoint(&p2);
    let mid = left.midpoint(&right);

    flatten(p1, left, mid, depth + 1, out);
    flatten(mid, right, p2, depth + 1, out);
}

// the farthest a quadratic strays from its chord is half the control point's
// distance from it, so "flat" means that distance is within a pixel
fn flat_enough(p1: &PointF64, control: &PointF64, p2: &PointF64) -> bool {
    let chord_sq = p1.squared_dist::<f64>(p2);
    if chord_sq < 1e-9 {
        return control.squared_dist::<f64>(p1) <= 1.0;
    }

    let cross = (p2.x - p1.x) * (control.y - p1.y) - (p2.y - p1.y) * (control.x - p1.x);

    cross * cross <= chord_sq
}
