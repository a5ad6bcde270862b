//! The closed family of geometric primitives the approximation can draw.
//!
//! Every primitive knows how to initialize itself at random inside a canvas,
//! perturb one of its parameters, and rasterize itself to clipped scanlines.
//! Color is not part of a shape, it gets solved for at commit time.

pub mod ellipse;
pub mod line;
pub mod mutator;
pub mod rect;
pub mod triangle;

pub use self::ellipse::{Circle, Ellipse, RotatedEllipse};
pub use self::line::{Line, Polyline, QuadraticBezier};
pub use self::mutator::ShapeMutator;
pub use self::rect::{Rect, RotatedRect};
pub use self::triangle::Triangle;

use std::f64::consts::PI;

use rand::Rng;
use rand_pcg::Pcg32;

use crate::scanline::Scanline;

/// How far a single mutation can move a coordinate, in pixels.
pub(crate) const COORD_DELTA: i32 = 16;

/// How far a single mutation can turn an angle, in radians (a tenth of a full
/// turn).
pub(crate) const ANGLE_DELTA: f64 = 0.2 * PI;

/// Tag identifying each primitive kind, also its serialization tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Axis-aligned rectangle.
    Rectangle = 0,
    /// Rectangle rotated about its center.
    RotatedRectangle = 1,
    /// Triangle.
    Triangle = 2,
    /// Axis-aligned ellipse.
    Ellipse = 3,
    /// Ellipse rotated about its center.
    RotatedEllipse = 4,
    /// Circle.
    Circle = 5,
    /// One pixel thick segment.
    Line = 6,
    /// One pixel thick quadratic Bézier curve.
    QuadraticBezier = 7,
    /// One pixel thick open polyline.
    Polyline = 8,
}

impl ShapeKind {
    /// Every kind the model can draw, in serialization tag order.
    pub const ALL: [ShapeKind; 9] = [
        ShapeKind::Rectangle,
        ShapeKind::RotatedRectangle,
        ShapeKind::Triangle,
        ShapeKind::Ellipse,
        ShapeKind::RotatedEllipse,
        ShapeKind::Circle,
        ShapeKind::Line,
        ShapeKind::QuadraticBezier,
        ShapeKind::Polyline,
    ];

    /// The serialization tag of this kind.
    pub fn tag(self) -> u8 {
        self as u8
    }
}

/// A geometric primitive with its parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangle.
    Rectangle(Rect),
    /// Rotated rectangle.
    RotatedRectangle(RotatedRect),
    /// Triangle.
    Triangle(Triangle),
    /// Axis-aligned ellipse.
    Ellipse(Ellipse),
    /// Rotated ellipse.
    RotatedEllipse(RotatedEllipse),
    /// Circle.
    Circle(Circle),
    /// Segment.
    Line(Line),
    /// Quadratic Bézier curve.
    QuadraticBezier(QuadraticBezier),
    /// Open polyline.
    Polyline(Polyline),
}

impl Shape {
    /// Create a shape of the given kind with zeroed parameters. Use a
    /// [`ShapeMutator`] to give it a random geometry.
    pub fn new(kind: ShapeKind) -> Shape {
        match kind {
            ShapeKind::Rectangle => Shape::Rectangle(Rect::default()),
            ShapeKind::RotatedRectangle => Shape::RotatedRectangle(RotatedRect::default()),
            ShapeKind::Triangle => Shape::Triangle(Triangle::default()),
            ShapeKind::Ellipse => Shape::Ellipse(Ellipse::default()),
            ShapeKind::RotatedEllipse => Shape::RotatedEllipse(RotatedEllipse::default()),
            ShapeKind::Circle => Shape::Circle(Circle::default()),
            ShapeKind::Line => Shape::Line(Line::default()),
            ShapeKind::QuadraticBezier => Shape::QuadraticBezier(QuadraticBezier::default()),
            ShapeKind::Polyline => Shape::Polyline(Polyline::default()),
        }
    }

    /// The kind tag of this shape.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::RotatedRectangle(_) => ShapeKind::RotatedRectangle,
            Shape::Triangle(_) => ShapeKind::Triangle,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::RotatedEllipse(_) => ShapeKind::RotatedEllipse,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Line(_) => ShapeKind::Line,
            Shape::QuadraticBezier(_) => ShapeKind::QuadraticBezier,
            Shape::Polyline(_) => ShapeKind::Polyline,
        }
    }

    /// Randomize the shape's geometry uniformly inside a `width` x `height`
    /// canvas.
    pub fn setup(&mut self, width: u32, height: u32, rng: &mut Pcg32) {
        match self {
            Shape::Rectangle(s) => s.setup(width, height, rng),
            Shape::RotatedRectangle(s) => s.setup(width, height, rng),
            Shape::Triangle(s) => s.setup(width, height, rng),
            Shape::Ellipse(s) => s.setup(width, height, rng),
            Shape::RotatedEllipse(s) => s.setup(width, height, rng),
            Shape::Circle(s) => s.setup(width, height, rng),
            Shape::Line(s) => s.setup(width, height, rng),
            Shape::QuadraticBezier(s) => s.setup(width, height, rng),
            Shape::Polyline(s) => s.setup(width, height, rng),
        }
    }

    /// Perturb one randomly chosen parameter of the shape, keeping it inside
    /// the canvas invariants.
    pub fn mutate(&mut self, width: u32, height: u32, rng: &mut Pcg32) {
        match self {
            Shape::Rectangle(s) => s.mutate(width, height, rng),
            Shape::RotatedRectangle(s) => s.mutate(width, height, rng),
            Shape::Triangle(s) => s.mutate(width, height, rng),
            Shape::Ellipse(s) => s.mutate(width, height, rng),
            Shape::RotatedEllipse(s) => s.mutate(width, height, rng),
            Shape::Circle(s) => s.mutate(width, height, rng),
            Shape::Line(s) => s.mutate(width, height, rng),
            Shape::QuadraticBezier(s) => s.mutate(width, height, rng),
            Shape::Polyline(s) => s.mutate(width, height, rng),
        }
    }

    /// Rasterize the shape into scanlines clipped to a `width` x `height`
    /// canvas.
    pub fn rasterize(&self, width: u32, height: u32) -> Vec<Scanline> {
        match self {
            Shape::Rectangle(s) => s.rasterize(width, height),
            Shape::RotatedRectangle(s) => s.rasterize(width, height),
            Shape::Triangle(s) => s.rasterize(width, height),
            Shape::Ellipse(s) => s.rasterize(width, height),
            Shape::RotatedEllipse(s) => s.rasterize(width, height),
            Shape::Circle(s) => s.rasterize(width, height),
            Shape::Line(s) => s.rasterize(width, height),
            Shape::QuadraticBezier(s) => s.rasterize(width, height),
            Shape::Polyline(s) => s.rasterize(width, height),
        }
    }

    /// The integer parameter view of the shape, in its serialization order.
    /// Angles are reported in whole degrees.
    pub fn params(&self) -> Vec<i32> {
        match self {
            Shape::Rectangle(s) => s.params(),
            Shape::RotatedRectangle(s) => s.params(),
            Shape::Triangle(s) => s.params(),
            Shape::Ellipse(s) => s.params(),
            Shape::RotatedEllipse(s) => s.params(),
            Shape::Circle(s) => s.params(),
            Shape::Line(s) => s.params(),
            Shape::QuadraticBezier(s) => s.params(),
            Shape::Polyline(s) => s.params(),
        }
    }
}

/// A random coordinate in `[0, bound)`.
pub(crate) fn random_coord(bound: u32, rng: &mut Pcg32) -> i32 {
    rng.gen_range(0..bound as i32)
}

/// Move `v` by up to [`COORD_DELTA`] pixels in either direction, clamped to
/// `[0, bound)`.
pub(crate) fn perturb_coord(v: i32, bound: u32, rng: &mut Pcg32) -> i32 {
    num::clamp(
        v + rng.gen_range(-COORD_DELTA..=COORD_DELTA),
        0,
        bound as i32 - 1,
    )
}

/// A random half-extent (radius) for a canvas `bound` pixels across, at
/// least 1.
pub(crate) fn random_extent(bound: u32, rng: &mut Pcg32) -> i32 {
    rng.gen_range(1..=(bound as i32 / 2).max(1))
}

/// Move an extent by up to [`COORD_DELTA`] pixels, keeping it in
/// `[1, bound]`.
pub(crate) fn perturb_extent(v: i32, bound: u32, rng: &mut Pcg32) -> i32 {
    num::clamp(
        v + rng.gen_range(-COORD_DELTA..=COORD_DELTA),
        1,
        bound as i32,
    )
}
