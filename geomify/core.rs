//! The image difference metrics and the optimal color solver that drive the
//! whole approximation loop.

use crate::bitmap::{Bitmap, Rgba};
use crate::scanline::Scanline;

/// Root mean square difference between two bitmaps of identical dimensions,
/// over all four channels, normalized to `[0, 1]`.
pub fn diff_full(target: &Bitmap, current: &Bitmap) -> f64 {
    let mut total = 0_u64;

    for (t, c) in target.data().iter().zip(current.data()) {
        let d = i64::from(*t) - i64::from(*c);
        total += (d * d) as u64;
    }

    let count = u64::from(target.width()) * u64::from(target.height()) * 4;

    (total as f64 / count as f64).sqrt() / 255.0
}

/// Incremental version of [`diff_full`].
///
/// Given that `after` equals `before` everywhere but on the pixels covered by
/// `lines`, recover the running squared-error sum from `last_score`, swap the
/// covered pixels' contribution and normalize again. Equals
/// `diff_full(target, after)` up to float rounding without rescanning the
/// image.
pub fn diff_partial(
    target: &Bitmap,
    before: &Bitmap,
    after: &Bitmap,
    last_score: f64,
    lines: &[Scanline],
) -> f64 {
    let count = u64::from(target.width()) * u64::from(target.height()) * 4;
    let mut total = ((last_score * 255.0).powi(2) * count as f64).round() as i64;

    for line in lines {
        let y = line.y as u32;

        for x in line.x1 as u32..line.x2 as u32 {
            total -= squared_error(target.pixel(x, y), before.pixel(x, y));
            total += squared_error(target.pixel(x, y), after.pixel(x, y));
        }
    }

    (total.max(0) as f64 / count as f64).sqrt() / 255.0
}

/// Solve for the constant color that, composited over `current` at the given
/// `alpha` along `lines`, best approximates `target` in the least squares
/// sense.
///
/// Per channel the ideal contribution of each covered pixel is
/// `(tgt - (1 - a) * cur) / a`, and the best constant is its mean, rounded
/// to the nearest integer and clamped to a byte. The accumulation is scaled
/// by 255 to stay in integers. Empty coverage or a zero alpha yield black at
/// the requested alpha.
pub fn compute_color(target: &Bitmap, current: &Bitmap, lines: &[Scanline], alpha: u8) -> Rgba {
    if alpha == 0 {
        return Rgba::new(0, 0, 0, alpha);
    }

    let complement = 255 - i64::from(alpha);
    let mut r = 0_i64;
    let mut g = 0_i64;
    let mut b = 0_i64;
    let mut count = 0_i64;

    for line in lines {
        let y = line.y as u32;

        for x in line.x1 as u32..line.x2 as u32 {
            let t = target.pixel(x, y);
            let c = current.pixel(x, y);

            r += 255 * i64::from(t.r) - complement * i64::from(c.r);
            g += 255 * i64::from(t.g) - complement * i64::from(c.g);
            b += 255 * i64::from(t.b) - complement * i64::from(c.b);
        }

        count += i64::from(line.x2 - line.x1);
    }

    if count == 0 {
        return Rgba::new(0, 0, 0, alpha);
    }

    let denom = i64::from(alpha) * count;

    Rgba::new(
        num::clamp(rounded_div(r, denom), 0, 255) as u8,
        num::clamp(rounded_div(g, denom), 0, 255) as u8,
        num::clamp(rounded_div(b, denom), 0, 255) as u8,
        alpha,
    )
}

// n / denom rounded to the nearest integer, denom is always positive here
fn rounded_div(n: i64, denom: i64) -> i64 {
    (2 * n + denom) / (2 * denom)
}

fn squared_error(t: Rgba, c: Rgba) -> i64 {
    let dr = i64::from(t.r) - i64::from(c.r);
    let dg = i64::from(t.g) - i64::from(c.g);
    let db = i64::from(t.b) - i64::from(c.b);
    let da = i64::from(t.a) - i64::from(c.a);

    dr * dr + dg * dg + db * db + da * da
}
