//! pensim - deterministic pen-motion error simulation
//!
//! Injects mechanical/motor error into a planned 2-D drawing path, producing
//! the perturbed trajectory a real plotting head would actually trace. Two
//! independent, pure error models are provided:
//!
//! - [`simulate_sequential_drift`]: an autoregressive heading-feedback loop
//!   that bends each step by a damped fraction of the local heading change,
//!   giving compounding but self-limiting curvature error after turns.
//! - [`simulate_windowed_oscillation`]: a vectorized model that superposes a
//!   decaying-oscillation kernel along the local path normal wherever the
//!   path bends, giving localized ringing/overshoot after sharp turns.
//!
//! Both models are length-preserving and deterministic; repeated calls with
//! identical arguments return bit-identical trajectories.

pub mod angle;
pub mod drift;
pub mod oscillation;
pub mod params;
pub mod point;
pub mod sweep;

use thiserror::Error;

// Re-export main types
pub use drift::simulate_sequential_drift;
pub use oscillation::simulate_windowed_oscillation;
pub use params::{DriftParams, OscillationParams};
pub use point::Point;
pub use sweep::{
    generate_zigzag_path, run_sweep, summarize_sweep, trajectory_rows, SweepBatch, SweepConfig,
    SweepRunRecord, SweepSummary, TrajectoryRow, DEFAULT_SWEEP_RUNS,
};

/// Contract violations rejected before either model produces output.
///
/// There are no retries and no partial results: a call either returns a
/// complete trajectory or one of these.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("trajectory needs at least 2 points, got {got}")]
    TooFewPoints { got: usize },
    #[error("window_length must be at least 1, got {got}")]
    InvalidWindowLength { got: usize },
    #[error("parameter {name} must be finite and non-negative, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}
