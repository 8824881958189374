//! Windowed oscillation model.
//!
//! Computes every segment heading up front, weights each heading change by a
//! saturating turn-sharpness curve, and superposes a decaying-oscillation
//! kernel along the local path normal wherever the path bends. Overlapping
//! windows add, so closely spaced turns ring harder, matching physical
//! resonance behavior.

use std::f64::consts::PI;

use crate::angle::{heading_between, unit_normal, wrap_heading_diff};
use crate::params::OscillationParams;
use crate::point::Point;
use crate::SimError;

/// Guard for peak-normalizing a kernel whose samples are all zero.
const KERNEL_PEAK_EPS: f64 = 1e-8;

/// Applies decaying-oscillation ringing to a planned trajectory.
///
/// Returns a new trajectory of the same length; the input is never mutated.
/// Each sharp turn triggers a one-shot kernel spread across the following
/// `window_length` points, displacing them along the local path normal. When
/// `window_length` is at least the number of segments the model injects
/// nothing and the output equals the input; that is a silent no-op, not an
/// error.
pub fn simulate_windowed_oscillation(
    trajectory: &[Point],
    params: &OscillationParams,
) -> Result<Vec<Point>, SimError> {
    if trajectory.len() < 2 {
        return Err(SimError::TooFewPoints {
            got: trajectory.len(),
        });
    }
    params.validate()?;

    let headings = segment_headings(trajectory);
    let weights = turn_weights(&headings, params.non_linearity);
    let kernel = oscillation_kernel(params);

    // One scalar offset per segment heading; the leading point gets a zero
    // offset when displacements are applied below.
    let mut offsets = vec![0.0_f64; headings.len()];
    let window = params.window_length;
    if offsets.len() > window {
        for i in 0..offsets.len() - window {
            for (t, k) in kernel.iter().enumerate() {
                offsets[i + t] += k * weights[i];
            }
        }
    }

    let result = trajectory
        .iter()
        .enumerate()
        .map(|(i, point)| {
            // The last point has no outgoing segment, hence a zero normal.
            let normal = if i < headings.len() {
                unit_normal(headings[i])
            } else {
                Point::zero()
            };
            let offset = if i == 0 { 0.0 } else { offsets[i - 1] };
            Point::new(point.x + normal.x * offset, point.y + normal.y * offset)
        })
        .collect();

    Ok(result)
}

/// Heading of every consecutive point pair; n-1 entries for n points.
fn segment_headings(trajectory: &[Point]) -> Vec<f64> {
    trajectory
        .windows(2)
        .map(|pair| heading_between(pair[0], pair[1]))
        .collect()
}

/// Turn-sharpness weight per interior point: the wrapped heading change,
/// normalized by pi, mapped through `0.5 + tanh(x * non_linearity) / 2` into
/// [0, 1]. Straight continuations sit at 0.5; sharp turns saturate toward 0
/// or 1 depending on turn direction.
fn turn_weights(headings: &[f64], non_linearity: f64) -> Vec<f64> {
    headings
        .windows(2)
        .map(|pair| {
            let normalized = wrap_heading_diff(pair[1] - pair[0]) / PI;
            0.5 + (normalized * non_linearity).tanh() / 2.0
        })
        .collect()
}

/// One-shot decaying-oscillation impulse response: exponential decay times a
/// sinusoid, peak-normalized and scaled by `-gain`.
fn oscillation_kernel(params: &OscillationParams) -> Vec<f64> {
    let raw: Vec<f64> = (0..params.window_length)
        .map(|t| {
            let t = t as f64;
            (-params.damping * t).exp() * (params.frequency * t).sin()
        })
        .collect();

    // raw(0) is always 0, so the peak is never negative.
    let peak = raw.iter().fold(0.0_f64, |acc, &v| acc.max(v));
    raw.into_iter()
        .map(|v| v / (peak + KERNEL_PEAK_EPS) * -params.gain)
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::{oscillation_kernel, simulate_windowed_oscillation};
    use crate::params::OscillationParams;
    use crate::point::Point;
    use crate::SimError;

    fn horizontal_line(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as f64, 0.0)).collect()
    }

    fn l_shape() -> Vec<Point> {
        let mut points = horizontal_line(12);
        for i in 1..=12 {
            points.push(Point::new(11.0, i as f64));
        }
        points
    }

    #[test]
    fn output_has_input_length() {
        let params = OscillationParams {
            window_length: 4,
            ..OscillationParams::default()
        };
        let out = simulate_windowed_oscillation(&l_shape(), &params).unwrap();
        assert_eq!(out.len(), l_shape().len());
    }

    #[test]
    fn oversized_window_is_a_noop() {
        // Default window (60) exceeds the segment count, so the accumulation
        // loop never runs.
        let input = l_shape();
        let out = simulate_windowed_oscillation(&input, &OscillationParams::default()).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let params = OscillationParams {
            window_length: 5,
            ..OscillationParams::default()
        };
        let a = simulate_windowed_oscillation(&l_shape(), &params).unwrap();
        let b = simulate_windowed_oscillation(&l_shape(), &params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn straight_line_matches_kernel_weighted_sum() {
        // On a horizontal line every turn weight is neutral (0.5) and every
        // normal is (0, 1), so the y column must equal the superposed kernel
        // scaled by 0.5.
        let n = 10;
        let params = OscillationParams {
            window_length: 3,
            ..OscillationParams::default()
        };
        let input = horizontal_line(n);
        let out = simulate_windowed_oscillation(&input, &params).unwrap();

        let kernel = oscillation_kernel(&params);
        let mut expected = vec![0.0_f64; n - 1];
        for i in 0..(n - 1) - params.window_length {
            for (t, k) in kernel.iter().enumerate() {
                expected[i + t] += k * 0.5;
            }
        }

        assert_eq!(out[0], input[0]);
        for i in 1..n {
            assert_abs_diff_eq!(out[i].y, expected[i - 1], epsilon = 1e-12);
            assert_abs_diff_eq!(out[i].x, input[i].x, epsilon = 1e-12);
        }
    }

    #[test]
    fn sharp_turn_rings_downstream() {
        let params = OscillationParams {
            window_length: 6,
            ..OscillationParams::default()
        };
        let input = l_shape();
        let out = simulate_windowed_oscillation(&input, &params).unwrap();
        let max_dev = out
            .iter()
            .zip(&input)
            .map(|(o, p)| o.distance_to(*p))
            .fold(0.0_f64, f64::max);
        assert!(max_dev > 0.1);
    }

    #[test]
    fn degenerate_kernel_stays_finite() {
        // frequency 0 zeroes every kernel sample; the epsilon guard keeps the
        // normalization finite and the model injects nothing.
        let params = OscillationParams {
            frequency: 0.0,
            window_length: 3,
            ..OscillationParams::default()
        };
        let input = horizontal_line(10);
        let out = simulate_windowed_oscillation(&input, &params).unwrap();
        assert!(out.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        assert_eq!(out, input);
    }

    #[test]
    fn rejects_short_trajectory() {
        let one_point = vec![Point::zero()];
        assert!(matches!(
            simulate_windowed_oscillation(&one_point, &OscillationParams::default()),
            Err(SimError::TooFewPoints { got: 1 })
        ));
    }

    #[test]
    fn rejects_zero_window() {
        let params = OscillationParams {
            window_length: 0,
            ..OscillationParams::default()
        };
        assert!(matches!(
            simulate_windowed_oscillation(&horizontal_line(4), &params),
            Err(SimError::InvalidWindowLength { got: 0 })
        ));
    }

    #[test]
    fn kernel_peak_is_normalized_to_gain() {
        let params = OscillationParams {
            window_length: 40,
            ..OscillationParams::default()
        };
        let kernel = oscillation_kernel(&params);
        assert_eq!(kernel.len(), 40);
        assert_eq!(kernel[0], 0.0);
        let min = kernel.iter().copied().fold(f64::INFINITY, f64::min);
        assert_abs_diff_eq!(min, -params.gain, epsilon = 1e-6);
    }
}
