//! Low level implementation details of line drawing algorithms.

use std::mem;

use geo::PointI32;

/// Iterator that returns all the points that compose the line from start to
/// end, both included. It uses the [Bresenham's line
/// algorithm](https://en.wikipedia.org/wiki/Bresenham%27s_line_algorithm) to
/// interpolate the points in the line. Coordinates can be negative, clipping
/// is the caller's job.
#[derive(Debug)]
pub struct BresenhamLineIter {
    // this struct is designed to work for non steep lines. In case we actually
    // want to iterate over a steep line then the `new` function swaps x with y,
    // sets `is_steep` that is then checked in `next` and swaps x with y again
    // if the flag is set.
    x: i64,
    y: i64,
    end_x: i64,
    is_steep: bool,
    d: i64,
    dx: i64,
    dy: i64,
    xstep: i64,
    ystep: i64,
}

impl BresenhamLineIter {
    /// Creates a new `BresenhamLineIter` iterator to return all points between
    /// `start` and `end` both included.
    pub fn new(start: PointI32, end: PointI32) -> BresenhamLineIter {
        let mut start = start.cast::<i64>();
        let mut end = end.cast::<i64>();

        let mut dx = (end.x - start.x).abs();
        let mut dy = (end.y - start.y).abs();

        // find out whether the line is steep that is that whether it grows
        // faster in y or in x. The steep case is handled by swapping the
        // coordinates before and after the core loop, which is written for the
        // shallow case only.
        let is_steep = dy > dx;
        if is_steep {
            mem::swap(&mut start.x, &mut start.y);
            mem::swap(&mut end.x, &mut end.y);
            mem::swap(&mut dx, &mut dy);
        }

        let xstep = if start.x > end.x { -1 } else { 1 };
        let ystep = if start.y > end.y { -1 } else { 1 };

        BresenhamLineIter {
            x: start.x,
            y: start.y,
            end_x: end.x,
            is_steep,
            dx,
            dy,
            d: 2 * dy - dx,
            xstep,
            ystep,
        }
    }
}

impl Iterator for BresenhamLineIter {
    type Item = PointI32;

    fn next(&mut self) -> Option<Self::Item> {
        if (self.x > self.end_x && self.xstep > 0) || (self.x < self.end_x && self.xstep < 0) {
            return None;
        }

        let mut res = PointI32::new(self.x as i32, self.y as i32);
        if self.is_steep {
            mem::swap(&mut res.x, &mut res.y);
        }

        if self.d > 0 {
            self.y += self.ystep;
            self.d -= 2 * self.dx;
        }
        self.d += 2 * self.dy;

        self.x += self.xstep;

        Some(res)
    }
}
