//! Random-restart hill climbing over candidate shapes.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::bitmap::Bitmap;
use crate::core;
use crate::raster;
use crate::shape::{Shape, ShapeKind, ShapeMutator};

/// A candidate shape together with the score the canvas would have if the
/// shape were committed at its optimal color.
#[derive(Clone, Debug)]
pub struct State {
    /// The candidate shape.
    pub shape: Shape,
    /// Root mean square error after a hypothetical commit, lower is better.
    pub score: f64,
    /// The alpha the shape would be committed with.
    pub alpha: u8,
}

/// Score a shape without committing it.
///
/// The shape is drawn at its optimal color into `buffer`, a scratch copy of
/// `current` whose touched runs get restored first, and the new score is
/// derived incrementally from `last_score`.
pub fn energy(
    shape: &Shape,
    alpha: u8,
    target: &Bitmap,
    current: &Bitmap,
    buffer: &mut Bitmap,
    last_score: f64,
) -> f64 {
    let lines = shape.rasterize(target.width(), target.height());
    let color = core::compute_color(target, current, &lines, alpha);

    raster::copy_lines(buffer, current, &lines);
    raster::draw_lines(buffer, color, &lines);

    core::diff_partial(target, current, buffer, last_score, &lines)
}

/// First-improvement hill climbing: keep mutating a clone of the current
/// shape, accept on strict improvement, stop after `max_mutations`
/// consecutive failures.
pub fn hill_climb(
    start: State,
    max_mutations: u32,
    target: &Bitmap,
    current: &Bitmap,
    buffer: &mut Bitmap,
    last_score: f64,
    mutator: &ShapeMutator,
    rng: &mut Pcg32,
) -> State {
    let (width, height) = (target.width(), target.height());

    let mut state = start;
    let mut failed = 0;

    while failed < max_mutations {
        let mut candidate = state.shape.clone();
        mutator.mutate(&mut candidate, width, height, rng);

        let score = energy(&candidate, state.alpha, target, current, buffer, last_score);
        if score < state.score {
            state.shape = candidate;
            state.score = score;
            failed = 0;
        } else {
            failed += 1;
        }
    }

    state
}

/// Run `shape_count` independent hill climbs from random shapes of random
/// kinds and return the best final state, if any.
///
/// `None` is only possible for the degenerate configurations: an empty kind
/// set or a zero shape count.
pub fn best_hill_climb_state(
    kinds: &[ShapeKind],
    alpha: u8,
    shape_count: u32,
    max_mutations: u32,
    target: &Bitmap,
    current: &Bitmap,
    buffer: &mut Bitmap,
    last_score: f64,
    mutator: &ShapeMutator,
    rng: &mut Pcg32,
) -> Option<State> {
    if kinds.is_empty() {
        return None;
    }

    let (width, height) = (target.width(), target.height());
    let mut best: Option<State> = None;

    for _ in 0..shape_count {
        let kind = kinds[rng.gen_range(0..kinds.len())];
        let mut shape = Shape::new(kind);
        mutator.setup(&mut shape, width, height, rng);

        let score = energy(&shape, alpha, target, current, buffer, last_score);
        let state = hill_climb(
            State {
                shape,
                score,
                alpha,
            },
            max_mutations,
            target,
            current,
            buffer,
            last_score,
            mutator,
            rng,
        );

        let better = match best {
            None => true,
            Some(ref best) => state.score < best.score,
        };
        if better {
            best = Some(state);
        }
    }

    best
}
