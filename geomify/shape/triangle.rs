//! The triangle primitive.

use geo::PointI32;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::raster;
use crate::scanline::Scanline;
use crate::shape::{perturb_coord, random_coord};

/// A triangle given by its three vertices.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Triangle {
    /// The vertices.
    pub points: [PointI32; 3],
}

impl Triangle {
    /// Randomize the three vertices uniformly inside the canvas.
    pub fn setup(&mut self, width: u32, height: u32, rng: &mut Pcg32) {
        for pt in self.points.iter_mut() {
            pt.x = random_coord(width, rng);
            pt.y = random_coord(height, rng);
        }
    }

    /// Move one randomly chosen vertex.
    pub fn mutate(&mut self, width: u32, height: u32, rng: &mut Pcg32) {
        let pt = &mut self.points[rng.gen_range(0..3)];

        pt.x = perturb_coord(pt.x, width, rng);
        pt.y = perturb_coord(pt.y, height, rng);
    }

    /// Edge fill of the triangle.
    pub fn rasterize(&self, width: u32, height: u32) -> Vec<Scanline> {
        raster::polygon_scanlines(&self.points, width, height)
    }

    /// `[x1, y1, x2, y2, x3, y3]`
    pub fn params(&self) -> Vec<i32> {
        self.points.iter().flat_map(|p| vec![p.x, p.y]).collect()
    }
}
