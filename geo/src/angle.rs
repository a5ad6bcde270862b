//! Module that contains simple utilities to work with angles.

use std::f64::consts::PI;

use crate::point::PointF64;

/// Rotate `pt` about `center` by `angle` radians, counter-clockwise in a
/// y-down coordinate system.
pub fn rotate_about(pt: &PointF64, center: &PointF64, angle: f64) -> PointF64 {
    let (sin, cos) = angle.sin_cos();

    let dx = pt.x - center.x;
    let dy = pt.y - center.y;

    PointF64::new(
        center.x + dx * cos - dy * sin,
        center.y + dx * sin + dy * cos,
    )
}

/// Wrap an angle in radians into the `[0, 2π)` range.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle % (2.0 * PI);

    if wrapped < 0.0 {
        wrapped + 2.0 * PI
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    fn assert_close(p1: &PointF64, p2: &PointF64) {
        assert!(
            (p1.x - p2.x).abs() < 1e-9 && (p1.y - p2.y).abs() < 1e-9,
            "{:?} != {:?}",
            p1,
            p2
        );
    }

    #[test]
    fn test_rotate_about_quarter_turn() {
        let center = PointF64::new(1.0, 1.0);

        let rotated = rotate_about(&PointF64::new(3.0, 1.0), &center, PI / 2.0);
        assert_close(&rotated, &PointF64::new(1.0, 3.0));

        let rotated = rotate_about(&rotated, &center, PI / 2.0);
        assert_close(&rotated, &PointF64::new(-1.0, 1.0));
    }

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(0.0)).abs() < 1e-9);
        assert!((normalize_angle(2.0 * PI)).abs() < 1e-9);
        assert!((normalize_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-9);
        assert!((normalize_angle(5.0 * PI) - PI).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_normalize_angle_in_range(angle in -1000.0_f64..1000.0) {
            let wrapped = normalize_angle(angle);

            prop_assert!(wrapped >= 0.0);
            prop_assert!(wrapped < 2.0 * PI);
        }

        #[test]
        fn prop_rotate_full_turn_is_identity(
            x in -100.0_f64..100.0,
            y in -100.0_f64..100.0,
            cx in -100.0_f64..100.0,
            cy in -100.0_f64..100.0
        ) {
            let pt = PointF64::new(x, y);
            let center = PointF64::new(cx, cy);

            let rotated = rotate_about(&pt, &center, 2.0 * PI);

            prop_assert!((rotated.x - pt.x).abs() < 1e-6);
            prop_assert!((rotated.y - pt.y).abs() < 1e-6);
        }
    }
}
