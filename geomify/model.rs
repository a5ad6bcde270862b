//! The model that owns the canvases and drives the approximation, one
//! committed shape per step.

use std::sync::atomic::{AtomicU32, Ordering};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::bitmap::{Bitmap, Rgba};
use crate::climb::{self, State};
use crate::core;
use crate::error::Error;
use crate::raster;
use crate::scanline::Scanline;
use crate::shape::{Shape, ShapeKind, ShapeMutator};

// used when the hardware concurrency cannot be detected
const DEFAULT_MAX_THREADS: usize = 4;

/// A shape committed to the canvas: the score the canvas reached, the color
/// the shape was drawn with and the shape itself.
#[derive(Clone, Debug)]
pub struct ShapeResult {
    /// The root mean square error after the commit.
    pub score: f64,
    /// The color the shape was composited with.
    pub color: Rgba,
    /// The committed shape.
    pub shape: Shape,
}

/// Approximates a target bitmap by iteratively committing the best candidate
/// shape out of a batch of parallel hill climbs.
#[derive(Debug)]
pub struct Model {
    target: Bitmap,
    current: Bitmap,
    last_score: f64,
    base_seed: u32,
    seed_offset: AtomicU32,
    mutator: ShapeMutator,
}

impl Model {
    /// Create a model whose canvas starts as a solid fill of the target's
    /// average color.
    pub fn new(target: Bitmap) -> Result<Model, Error> {
        check_dimensions(&target)?;
        let background = target.average_color();

        Model::with_background(target, background)
    }

    /// Create a model whose canvas starts as a solid `background` fill.
    pub fn with_background(target: Bitmap, background: Rgba) -> Result<Model, Error> {
        check_dimensions(&target)?;
        let current = Bitmap::new(target.width(), target.height(), background);

        Model::with_initial(target, current)
    }

    /// Create a model whose canvas starts as the given bitmap, which must
    /// match the target's dimensions.
    pub fn with_initial(target: Bitmap, initial: Bitmap) -> Result<Model, Error> {
        check_dimensions(&target)?;

        if target.width() != initial.width() || target.height() != initial.height() {
            return Err(Error::DimensionMismatch {
                target_width: target.width(),
                target_height: target.height(),
                initial_width: initial.width(),
                initial_height: initial.height(),
            });
        }

        let last_score = core::diff_full(&target, &initial);

        Ok(Model {
            target,
            current: initial,
            last_score,
            base_seed: 0,
            seed_offset: AtomicU32::new(0),
            mutator: ShapeMutator::new(),
        })
    }

    /// Throw the canvas away and refill it with `background`.
    pub fn reset(&mut self, background: Rgba) {
        self.current.fill(background);
        self.last_score = core::diff_full(&self.target, &self.current);
    }

    /// The width of the target.
    pub fn width(&self) -> u32 {
        self.target.width()
    }

    /// The height of the target.
    pub fn height(&self) -> u32 {
        self.target.height()
    }

    /// The bitmap being approximated.
    pub fn target(&self) -> &Bitmap {
        &self.target
    }

    /// The canvas built so far.
    pub fn current(&self) -> &Bitmap {
        &self.current
    }

    /// The root mean square error between target and canvas.
    pub fn last_score(&self) -> f64 {
        self.last_score
    }

    /// Set the base RNG seed. Together with the thread count it pins down
    /// the whole run.
    pub fn set_seed(&mut self, seed: u32) {
        self.base_seed = seed;
    }

    /// The mutation callbacks used on candidate shapes.
    pub fn mutator(&self) -> &ShapeMutator {
        &self.mutator
    }

    /// Mutable access to the mutation callbacks, to override per-kind
    /// behavior.
    pub fn mutator_mut(&mut self) -> &mut ShapeMutator {
        &mut self.mutator
    }

    /// Run one approximation step: spawn `max_threads` parallel hill climbs
    /// (0 means the detected hardware concurrency), pick the candidate with
    /// the globally lowest score and commit it at the given `alpha`.
    ///
    /// Each worker evaluates `shape_count` random candidates of the given
    /// kinds, each hill climbed for up to `max_mutations` consecutive failed
    /// mutations, against its own scratch canvas and its own deterministically
    /// seeded RNG. The returned vector is empty only for degenerate
    /// configurations (no kinds, zero candidates).
    pub fn step(
        &mut self,
        kinds: &[ShapeKind],
        alpha: u8,
        shape_count: u32,
        max_mutations: u32,
        max_threads: u32,
    ) -> Vec<ShapeResult> {
        use rayon::prelude::*;

        let threads = if max_threads == 0 {
            detected_threads()
        } else {
            max_threads as usize
        };

        // hand out the seed offsets up front, on this thread, so that task
        // scheduling cannot change which worker gets which seed
        let seeds: Vec<u32> = (0..threads)
            .map(|_| {
                self.base_seed
                    .wrapping_add(self.seed_offset.fetch_add(1, Ordering::SeqCst))
            })
            .collect();

        let (target, current) = (&self.target, &self.current);
        let (last_score, mutator) = (self.last_score, &self.mutator);

        let states: Vec<Option<State>> = seeds
            .into_par_iter()
            .map(|seed| {
                let mut rng = Pcg32::seed_from_u64(u64::from(seed));
                let mut buffer = current.clone();

                climb::best_hill_climb_state(
                    kinds,
                    alpha,
                    shape_count,
                    max_mutations,
                    target,
                    current,
                    &mut buffer,
                    last_score,
                    mutator,
                    &mut rng,
                )
            })
            .collect();

        // first minimum wins so that the merge order is deterministic
        let mut best: Option<State> = None;
        for state in states.into_iter().flatten() {
            let better = match best {
                None => true,
                Some(ref best) => state.score < best.score,
            };
            if better {
                best = Some(state);
            }
        }

        match best {
            Some(state) => vec![self.draw_shape(state.shape, alpha)],
            None => vec![],
        }
    }

    /// Commit a shape at the optimal color for the given `alpha`.
    pub fn draw_shape(&mut self, shape: Shape, alpha: u8) -> ShapeResult {
        let lines = shape.rasterize(self.width(), self.height());
        let color = core::compute_color(&self.target, &self.current, &lines, alpha);

        self.commit(shape, color, lines)
    }

    /// Commit a shape with a caller-chosen color.
    pub fn draw_shape_with_color(&mut self, shape: Shape, color: Rgba) -> ShapeResult {
        let lines = shape.rasterize(self.width(), self.height());

        self.commit(shape, color, lines)
    }

    fn commit(&mut self, shape: Shape, color: Rgba, lines: Vec<Scanline>) -> ShapeResult {
        // snapshot only the runs the shape covers, diff_partial reads nothing
        // else of the before image
        let mut before = Bitmap::new(self.width(), self.height(), Rgba::new(0, 0, 0, 0));
        raster::copy_lines(&mut before, &self.current, &lines);

        raster::draw_lines(&mut self.current, color, &lines);
        self.last_score =
            core::diff_partial(&self.target, &before, &self.current, self.last_score, &lines);

        ShapeResult {
            score: self.last_score,
            color,
            shape,
        }
    }
}

fn check_dimensions(target: &Bitmap) -> Result<(), Error> {
    if target.width() == 0 || target.height() == 0 {
        return Err(Error::EmptyBitmap {
            width: target.width(),
            height: target.height(),
        });
    }

    Ok(())
}

fn detected_threads() -> usize {
    let threads = rayon::current_num_threads();

    if threads == 0 {
        DEFAULT_MAX_THREADS
    } else {
        threads
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_target(width: u32, height: u32) -> Bitmap {
        let mut target = Bitmap::new(width, height, Rgba::new(0, 0, 0, 255));
        for y in 0..height {
            for x in 0..width {
                target.set_pixel(
                    x,
                    y,
                    Rgba::new((x * 255 / width) as u8, (y * 255 / height) as u8, 99, 255),
                );
            }
        }

        target
    }

    #[test]
    fn test_constructor_validation() {
        assert!(Model::new(Bitmap::new(0, 3, Rgba::new(0, 0, 0, 255))).is_err());

        let target = Bitmap::new(4, 4, Rgba::new(10, 10, 10, 255));
        let initial = Bitmap::new(4, 5, Rgba::new(0, 0, 0, 255));
        assert_eq!(
            Model::with_initial(target, initial).unwrap_err(),
            Error::DimensionMismatch {
                target_width: 4,
                target_height: 4,
                initial_width: 4,
                initial_height: 5,
            }
        );
    }

    #[test]
    fn test_new_starts_from_average_color() {
        let target = gradient_target(6, 6);
        let average = target.average_color();

        let model = Model::new(target).unwrap();

        assert_eq!(model.current().pixel(0, 0), average);
        assert_eq!(model.current().pixel(5, 5), average);
        assert!(
            (model.last_score() - core::diff_full(model.target(), model.current())).abs() < 1e-12
        );
    }

    #[test]
    fn test_zero_error_for_identical_target_and_initial() {
        let target = gradient_target(5, 5);
        let model = Model::with_initial(target.clone(), target).unwrap();

        assert_eq!(model.last_score(), 0.0);
    }

    #[test]
    fn test_reset_recomputes_score() {
        let target = gradient_target(6, 6);
        let mut model = Model::new(target).unwrap();

        model.step(&[ShapeKind::Triangle], 128, 10, 10, 1);
        model.reset(Rgba::new(0, 0, 0, 255));

        let expected = core::diff_full(model.target(), model.current());
        assert!((model.last_score() - expected).abs() < 1e-12);
        assert_eq!(model.current().pixel(3, 3), Rgba::new(0, 0, 0, 255));
    }

    #[test]
    fn test_step_improves_solid_target() {
        let target = Bitmap::new(10, 10, Rgba::new(200, 100, 50, 255));
        let initial = Bitmap::new(10, 10, Rgba::new(0, 0, 0, 255));

        let mut model = Model::with_initial(target, initial).unwrap();
        model.set_seed(42);

        let before = model.last_score();
        let results = model.step(&[ShapeKind::Rectangle], 128, 100, 100, 1);

        assert_eq!(results.len(), 1);
        assert!(results[0].score < before);
        assert!((results[0].score - model.last_score()).abs() < 1e-12);
        assert_eq!(results[0].shape.kind(), ShapeKind::Rectangle);

        // over a uniform black canvas the optimal color only depends on the
        // target color and the alpha: round((255 * t - 127 * 0) / 128) per
        // channel
        assert_eq!(results[0].color, Rgba::new(255, 199, 100, 128));
    }

    #[test]
    fn test_step_degenerate_configurations() {
        let mut model = Model::new(gradient_target(6, 6)).unwrap();
        let before = model.last_score();

        assert!(model.step(&[], 128, 10, 10, 2).is_empty());
        assert!(model.step(&[ShapeKind::Circle], 128, 0, 10, 2).is_empty());
        assert_eq!(model.last_score(), before);
    }

    #[test]
    fn test_score_stays_consistent_across_steps() {
        let mut model = Model::new(gradient_target(12, 9)).unwrap();
        model.set_seed(3);

        for _ in 0..3 {
            model.step(&ShapeKind::ALL, 130, 8, 8, 2);

            let expected = core::diff_full(model.target(), model.current());
            assert!(
                (model.last_score() - expected).abs() < 1e-6,
                "cached score drifted from the real one"
            );
        }
    }

    #[test]
    fn test_steps_are_deterministic() {
        let run = || {
            let mut model = Model::new(gradient_target(8, 8)).unwrap();
            model.set_seed(7);

            let mut committed = Vec::new();
            for _ in 0..2 {
                committed.extend(model.step(&ShapeKind::ALL, 128, 50, 20, 4));
            }

            let params: Vec<Vec<i32>> = committed.iter().map(|r| r.shape.params()).collect();
            let colors: Vec<Rgba> = committed.iter().map(|r| r.color).collect();

            (params, colors, model.current().data().to_vec())
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_draw_shape_with_color_uses_it() {
        let mut model = Model::with_background(
            gradient_target(6, 6),
            Rgba::new(0, 0, 0, 255),
        )
        .unwrap();

        let shape = Shape::Rectangle(crate::shape::Rect {
            x1: 0,
            y1: 0,
            x2: 6,
            y2: 6,
        });
        let result = model.draw_shape_with_color(shape, Rgba::new(9, 9, 9, 255));

        assert_eq!(result.color, Rgba::new(9, 9, 9, 255));
        assert_eq!(model.current().pixel(3, 3), Rgba::new(9, 9, 9, 255));
        assert!(
            (model.last_score() - core::diff_full(model.target(), model.current())).abs() < 1e-6
        );
    }
}
