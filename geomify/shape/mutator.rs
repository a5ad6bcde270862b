//! Pluggable setup and mutation callbacks, one pair per shape kind.

use rand_pcg::Pcg32;

use crate::shape::{Shape, ShapeKind};

/// Initialize a shape's geometry inside a `width` x `height` canvas.
pub type SetupFn = fn(&mut Shape, u32, u32, &mut Pcg32);

/// Perturb one of a shape's parameters in place.
pub type MutateFn = fn(&mut Shape, u32, u32, &mut Pcg32);

/// A dispatch table from shape kind to its setup and mutation callbacks.
///
/// The default entries implement the uniform setup and the bounded random
/// perturbations every primitive ships with; single entries can be replaced
/// to customize how a specific kind explores the canvas.
#[derive(Clone, Debug)]
pub struct ShapeMutator {
    setup: [SetupFn; ShapeKind::ALL.len()],
    mutate: [MutateFn; ShapeKind::ALL.len()],
}

impl ShapeMutator {
    /// A mutator with the default callbacks installed for every kind.
    pub fn new() -> ShapeMutator {
        ShapeMutator {
            setup: [default_setup; ShapeKind::ALL.len()],
            mutate: [default_mutate; ShapeKind::ALL.len()],
        }
    }

    /// Run the setup callback registered for the shape's kind.
    pub fn setup(&self, shape: &mut Shape, width: u32, height: u32, rng: &mut Pcg32) {
        self.setup[shape.kind().tag() as usize](shape, width, height, rng);
    }

    /// Run the mutation callback registered for the shape's kind.
    pub fn mutate(&self, shape: &mut Shape, width: u32, height: u32, rng: &mut Pcg32) {
        self.mutate[shape.kind().tag() as usize](shape, width, height, rng);
    }

    /// Replace the setup callback for `kind`.
    pub fn set_setup(&mut self, kind: ShapeKind, f: SetupFn) {
        self.setup[kind.tag() as usize] = f;
    }

    /// Replace the mutation callback for `kind`.
    pub fn set_mutate(&mut self, kind: ShapeKind, f: MutateFn) {
        self.mutate[kind.tag() as usize] = f;
    }
}

impl Default for ShapeMutator {
    fn default() -> ShapeMutator {
        ShapeMutator::new()
    }
}

/// The stock setup: uniform random geometry inside the canvas.
pub fn default_setup(shape: &mut Shape, width: u32, height: u32, rng: &mut Pcg32) {
    shape.setup(width, height, rng);
}

/// The stock mutation: perturb one randomly chosen parameter.
pub fn default_mutate(shape: &mut Shape, width: u32, height: u32, rng: &mut Pcg32) {
    shape.mutate(width, height, rng);
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;

    use crate::shape::Rect;

    fn pin_rect(shape: &mut Shape, _width: u32, _height: u32, _rng: &mut Pcg32) {
        if let Shape::Rectangle(rect) = shape {
            *rect = Rect {
                x1: 1,
                y1: 1,
                x2: 3,
                y2: 3,
            };
        }
    }

    #[test]
    fn test_override_setup_only_affects_its_kind() {
        let mut mutator = ShapeMutator::new();
        mutator.set_setup(ShapeKind::Rectangle, pin_rect);

        let mut rng = Pcg32::seed_from_u64(0);

        let mut rect = Shape::new(ShapeKind::Rectangle);
        mutator.setup(&mut rect, 10, 10, &mut rng);
        assert_eq!(rect.params(), vec![1, 1, 3, 3]);

        let mut circle = Shape::new(ShapeKind::Circle);
        mutator.setup(&mut circle, 10, 10, &mut rng);
        assert_ne!(circle.params(), vec![0, 0, 0]);
    }

    #[test]
    fn test_default_mutate_changes_nothing_but_the_shape() {
        let mutator = ShapeMutator::new();
        let mut rng = Pcg32::seed_from_u64(1);

        let mut shape = Shape::new(ShapeKind::Line);
        mutator.setup(&mut shape, 10, 10, &mut rng);
        let kind = shape.kind();

        mutator.mutate(&mut shape, 10, 10, &mut rng);

        assert_eq!(shape.kind(), kind);
    }
}
