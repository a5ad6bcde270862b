//! Draw scanlines into bitmaps and turn raw geometry into scanlines.

pub mod line;

pub use self::line::BresenhamLineIter;

use std::collections::BTreeMap;

use geo::PointI32;

use crate::bitmap::{Bitmap, Rgba};
use crate::scanline::{self, Scanline};

/// Composite `color` over `bitmap` along the given scanlines with source-over
/// alpha blending.
///
/// All the arithmetic is integer fixed-point: channels are 0..=255 and the
/// division by 255 rounds exactly like `x / 255`. The scanlines must already
/// be clipped to the bitmap.
pub fn draw_lines(bitmap: &mut Bitmap, color: Rgba, lines: &[Scanline]) {
    let sr = u32::from(color.r);
    let sg = u32::from(color.g);
    let sb = u32::from(color.b);
    let sa = u32::from(color.a);
    let complement = 255 - sa;

    for line in lines {
        let y = line.y as u32;

        for x in line.x1 as u32..line.x2 as u32 {
            let d = bitmap.pixel(x, y);

            bitmap.set_pixel(
                x,
                y,
                Rgba::new(
                    div255(sr * sa + u32::from(d.r) * complement) as u8,
                    div255(sg * sa + u32::from(d.g) * complement) as u8,
                    div255(sb * sa + u32::from(d.b) * complement) as u8,
                    (sa + div255(u32::from(d.a) * complement)) as u8,
                ),
            );
        }
    }
}

/// Copy the pixels covered by `lines` from `src` into `dst`.
///
/// The two bitmaps must have identical dimensions. This is what lets a hill
/// climb worker reuse a single scratch bitmap: restore the touched runs from
/// the committed canvas, draw the next candidate, measure, repeat.
pub fn copy_lines(dst: &mut Bitmap, src: &Bitmap, lines: &[Scanline]) {
    let width = src.width() as usize;

    for line in lines {
        let row = line.y as usize * width;
        let start = (row + line.x1 as usize) * 4;
        let end = (row + line.x2 as usize) * 4;

        dst.data_mut()[start..end].copy_from_slice(&src.data()[start..end]);
    }
}

/// Fill the polygon described by `points` (closed implicitly) with one
/// half-open run per covered row.
///
/// Every edge is walked with Bresenham accumulating the leftmost and
/// rightmost touched column per row, which works for any convex outline and
/// is how the rotated shapes get rasterized after rotating their sample
/// points.
pub fn polygon_scanlines(points: &[PointI32], width: u32, height: u32) -> Vec<Scanline> {
    let mut rows: BTreeMap<i32, (i32, i32)> = BTreeMap::new();

    for i in 0..points.len() {
        let start = points[i];
        let end = points[(i + 1) % points.len()];

        for pt in BresenhamLineIter::new(start, end) {
            let run = rows.entry(pt.y).or_insert((pt.x, pt.x));
            run.0 = run.0.min(pt.x);
            run.1 = run.1.max(pt.x);
        }
    }

    scanline::clip(
        rows.into_iter()
            .map(|(y, (x1, x2))| Scanline::new(y, x1, x2)),
        width,
        height,
    )
}

/// Stroke the open polyline described by `points` one pixel thick.
///
/// The covered pixels of all the segments are deduplicated before being
/// merged into runs so that joints are not composited twice.
pub fn stroke_scanlines(points: &[PointI32], width: u32, height: u32) -> Vec<Scanline> {
    let mut pixels = Vec::new();

    for segment in points.windows(2) {
        for pt in BresenhamLineIter::new(segment[0], segment[1]) {
            pixels.push((pt.y, pt.x));
        }
    }

    pixels.sort_unstable();
    pixels.dedup();

    let mut lines: Vec<Scanline> = Vec::new();
    for (y, x) in pixels {
        match lines.last_mut() {
            Some(last) if last.y == y && last.x2 == x => last.x2 = x + 1,
            _ => lines.push(Scanline::new(y, x, x + 1)),
        }
    }

    scanline::clip(lines, width, height)
}

// Exact floor(x / 255) for x in the 0..=255*255 range.
fn div255(x: u32) -> u32 {
    (x * 257 + 1) >> 16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_div255_is_exact() {
        for x in 0..=255 * 255 {
            assert_eq!(div255(x), x / 255, "x = {}", x);
        }
    }

    #[test]
    fn test_draw_lines_opaque_overwrites() {
        let mut bitmap = Bitmap::new(4, 2, Rgba::new(10, 20, 30, 255));

        draw_lines(
            &mut bitmap,
            Rgba::new(200, 100, 50, 255),
            &[Scanline::new(1, 1, 3)],
        );

        assert_eq!(bitmap.pixel(0, 1), Rgba::new(10, 20, 30, 255));
        assert_eq!(bitmap.pixel(1, 1), Rgba::new(200, 100, 50, 255));
        assert_eq!(bitmap.pixel(2, 1), Rgba::new(200, 100, 50, 255));
        assert_eq!(bitmap.pixel(3, 1), Rgba::new(10, 20, 30, 255));
        assert_eq!(bitmap.pixel(1, 0), Rgba::new(10, 20, 30, 255));
    }

    #[test]
    fn test_draw_lines_blends() {
        let mut bitmap = Bitmap::new(1, 1, Rgba::new(0, 0, 0, 255));

        draw_lines(
            &mut bitmap,
            Rgba::new(255, 101, 0, 128),
            &[Scanline::new(0, 0, 1)],
        );

        // c * 128 / 255 over black, alpha saturates back to full
        assert_eq!(bitmap.pixel(0, 0), Rgba::new(128, 50, 0, 255));
    }

    #[test]
    fn test_draw_lines_empty_is_noop() {
        let mut bitmap = Bitmap::new(1, 1, Rgba::new(7, 7, 7, 7));
        let before = bitmap.clone();

        draw_lines(&mut bitmap, Rgba::new(255, 255, 255, 255), &[]);

        assert_eq!(bitmap, before);
    }

    #[test]
    fn test_copy_lines_restores_runs() {
        let src = Bitmap::new(4, 4, Rgba::new(1, 2, 3, 4));
        let mut dst = Bitmap::new(4, 4, Rgba::new(9, 9, 9, 9));

        copy_lines(&mut dst, &src, &[Scanline::new(2, 1, 3)]);

        assert_eq!(dst.pixel(0, 2), Rgba::new(9, 9, 9, 9));
        assert_eq!(dst.pixel(1, 2), Rgba::new(1, 2, 3, 4));
        assert_eq!(dst.pixel(2, 2), Rgba::new(1, 2, 3, 4));
        assert_eq!(dst.pixel(3, 2), Rgba::new(9, 9, 9, 9));
        assert_eq!(dst.pixel(1, 1), Rgba::new(9, 9, 9, 9));
    }

    #[test]
    fn test_polygon_scanlines_square() {
        let points = [
            PointI32::new(0, 0),
            PointI32::new(4, 0),
            PointI32::new(4, 4),
            PointI32::new(0, 4),
        ];

        let lines = polygon_scanlines(&points, 10, 10);

        assert_eq!(
            lines,
            (0..=4).map(|y| Scanline::new(y, 0, 4)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_polygon_scanlines_clips() {
        let points = [
            PointI32::new(-3, -3),
            PointI32::new(5, -3),
            PointI32::new(5, 2),
            PointI32::new(-3, 2),
        ];

        let lines = polygon_scanlines(&points, 4, 4);

        assert_eq!(
            lines,
            (0..=2).map(|y| Scanline::new(y, 0, 4)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_stroke_scanlines_merges_runs() {
        let points = [PointI32::new(0, 0), PointI32::new(3, 0)];

        assert_eq!(
            stroke_scanlines(&points, 10, 10),
            vec![Scanline::new(0, 0, 4)]
        );
    }

    #[test]
    fn test_stroke_scanlines_dedups_joints() {
        // both segments share the pixel at (2, 0)
        let points = [
            PointI32::new(0, 0),
            PointI32::new(2, 0),
            PointI32::new(2, 2),
        ];

        assert_eq!(
            stroke_scanlines(&points, 10, 10),
            vec![
                Scanline::new(0, 0, 3),
                Scanline::new(1, 2, 3),
                Scanline::new(2, 2, 3),
            ]
        );
    }
}
