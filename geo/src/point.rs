//! The 2d points every shape hangs its geometry on.

/// A point with `f64` coordinates, used while flattening curves and rotating
/// outlines before they are snapped back to pixels.
pub type PointF64 = Point<f64>;

/// A point with `i32` pixel coordinates, the unit shape parameters are
/// described in.
pub type PointI32 = Point<i32>;

/// A 2d point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point<T>
where
    T: num::Num + From<u8> + Copy,
{
    /// Horizontal coordinate.
    pub x: T,

    /// Vertical coordinate, growing downward in image space.
    pub y: T,
}

impl<T> Default for Point<T>
where
    T: num::Num + From<u8> + Copy,
{
    fn default() -> Self {
        Point::new(T::zero(), T::zero())
    }
}

impl<T> Point<T>
where
    T: num::Num + From<u8> + Copy,
{
    /// Build a point from its coordinates.
    pub fn new(x: T, y: T) -> Point<T> {
        Point { x, y }
    }

    /// The point halfway between this point and `other`.
    ///
    /// Subdividing a curve at midpoints keeps every sample on the curve,
    /// which is what the Bézier flattening relies on.
    pub fn midpoint(&self, other: &Self) -> Self {
        let two = T::from(2);

        Point::new((self.x + other.x) / two, (self.y + other.y) / two)
    }

    /// The squared euclidean distance to `other`, accumulated in the wider
    /// type `O` so that pixel coordinates cannot overflow. Flatness checks
    /// compare these directly, no square root needed.
    pub fn squared_dist<O>(&self, other: &Self) -> O
    where
        O: num::Num + From<T> + Copy,
    {
        let delta = |a: T, b: T| <O as From<T>>::from(a) - <O as From<T>>::from(b);

        let dx = delta(self.x, other.x);
        let dy = delta(self.y, other.y);

        dx * dx + dy * dy
    }

    /// The same point in another coordinate type.
    pub fn cast<O>(&self) -> Point<O>
    where
        O: num::Num + From<T> + From<u8> + Copy,
    {
        Point::new(O::from(self.x), O::from(self.y))
    }
}

impl PointF64 {
    /// Round both coordinates to the nearest pixel.
    pub fn round(&self) -> PointI32 {
        Point::new(self.x.round() as i32, self.y.round() as i32)
    }
}

#[cfg(test)]
mod test {
    use super::{PointF64, PointI32};

    use proptest::prelude::*;

    #[test]
    fn test_midpoint_subdivision() {
        // fractional midpoints stay exact in f64, curve flattening depends
        // on it
        let mid = PointF64::new(0.0, 0.0).midpoint(&PointF64::new(5.0, 3.0));
        assert_eq!(mid, PointF64::new(2.5, 1.5));

        let quarter = PointF64::new(0.0, 0.0).midpoint(&mid);
        assert_eq!(quarter, PointF64::new(1.25, 0.75));

        // the integer version truncates toward zero
        assert_eq!(
            PointI32::new(0, 0).midpoint(&PointI32::new(5, 3)),
            PointI32::new(2, 1)
        );
        assert_eq!(
            PointI32::new(-4, 7).midpoint(&PointI32::new(10, 1)),
            PointI32::new(3, 4)
        );
    }

    #[test]
    fn test_squared_dist_widens() {
        let p = PointI32::new(2, 3);
        let q = PointI32::new(5, 7);

        assert_eq!(p.squared_dist::<i64>(&q), 25);
        assert_eq!(q.squared_dist::<i64>(&p), 25);

        // the square of a large coordinate does not fit the narrow type but
        // fits the accumulator
        let far = PointI32::new(100_000, 0);
        assert_eq!(PointI32::new(0, 0).squared_dist::<f64>(&far), 1e10);
    }

    #[test]
    fn test_cast_and_round() {
        assert_eq!(
            PointI32::new(3, -2).cast::<f64>(),
            PointF64::new(3.0, -2.0)
        );

        assert_eq!(PointF64::new(1.2, 7.8).round(), PointI32::new(1, 8));
        assert_eq!(PointF64::new(-1.5, 0.4).round(), PointI32::new(-2, 0));
    }

    proptest! {
        // halving a chord quarters its squared length, the invariant that
        // makes midpoint subdivision of a curve terminate
        #[test]
        fn prop_midpoint_quarters_the_squared_distance(
            x1 in -500.0_f64..500.0,
            y1 in -500.0_f64..500.0,
            x2 in -500.0_f64..500.0,
            y2 in -500.0_f64..500.0
        ) {
            let p = PointF64::new(x1, y1);
            let q = PointF64::new(x2, y2);
            let mid = p.midpoint(&q);

            let full: f64 = p.squared_dist(&q);
            let half: f64 = p.squared_dist(&mid);

            prop_assert!((4.0 * half - full).abs() <= full * 1e-12 + 1e-12);
        }
    }
}
