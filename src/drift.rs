//! Sequential drift model.
//!
//! Walks the trajectory once, point by point, bending each step's heading by
//! a damped, decaying fraction of the local heading change. The feedback is
//! autoregressive: each offset depends on the magnitude of the previous one,
//! so curvature error compounds after turns and dies out on straight runs.

use crate::angle::{heading_between, wrap_heading_diff};
use crate::params::DriftParams;
use crate::point::Point;
use crate::SimError;

/// Applies accumulated heading drift to a planned trajectory.
///
/// Returns a new trajectory of the same length; the input is never mutated.
/// Each point after the first is re-emitted at its original distance from the
/// previous emitted point, but at a heading bent by the current drift offset.
pub fn simulate_sequential_drift(
    trajectory: &[Point],
    params: &DriftParams,
) -> Result<Vec<Point>, SimError> {
    if trajectory.len() < 2 {
        return Err(SimError::TooFewPoints {
            got: trajectory.len(),
        });
    }
    params.validate()?;

    // The origin anchor gives the first real step a predecessor segment; it
    // is dropped again before returning.
    let mut emitted = Vec::with_capacity(trajectory.len() + 1);
    emitted.push(Point::zero());
    emitted.push(trajectory[0]);

    let mut prev_offset = 0.0_f64;

    for point in &trajectory[1..] {
        let last = emitted[emitted.len() - 1];
        let second_last = emitted[emitted.len() - 2];

        let radius = last.distance_to(*point);
        let heading = heading_between(last, *point);
        let prev_heading = heading_between(second_last, last);
        let heading_diff = wrap_heading_diff(heading - prev_heading);

        let damping = damping_gain(params.damping_factor, prev_offset);
        let offset = damping * heading_diff * params.decay_factor;

        emitted.push(last.step_along(heading + offset, radius));
        prev_offset = offset;
    }

    Ok(emitted.split_off(1))
}

/// Saturating feedback gain in [-0.5, 0): exactly -0.5 with no accumulated
/// offset, approaching 0 as |prev_offset| grows. Bounds runaway feedback.
fn damping_gain(damping_factor: f64, prev_offset: f64) -> f64 {
    -1.0 / (1.0 + (damping_factor * prev_offset.abs()).exp())
}
