//! Seeded batch runner over synthetic drawing paths.
//!
//! Generates reproducible zigzag test paths, pushes each through both error
//! models, and collects deviation metrics for CSV/JSON export. This is the
//! smoke-test surface; the error models themselves consume no randomness.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::Serialize;

use crate::drift::simulate_sequential_drift;
use crate::oscillation::simulate_windowed_oscillation;
use crate::params::{DriftParams, OscillationParams};
use crate::point::Point;
use crate::SimError;

pub const DEFAULT_SWEEP_RUNS: usize = 48;

/// Spacing of waypoints along the x axis.
const PATH_STEP: f64 = 0.25;
/// Waypoints per zigzag leg before the path folds back.
const LEG_LENGTH: usize = 12;

/// Sweep configuration
#[derive(Clone, Debug)]
pub struct SweepConfig {
    pub n_runs: usize,
    pub n_points: usize,
    pub seed: u64,
    /// Height of each zigzag leg above/below the centerline
    pub amplitude: f64,
    /// Standard deviation of the waypoint jitter
    pub jitter_sigma: f64,
    pub drift: DriftParams,
    pub oscillation: OscillationParams,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            n_runs: DEFAULT_SWEEP_RUNS,
            n_points: 240,
            seed: 2026,
            amplitude: 4.0,
            jitter_sigma: 0.05,
            drift: DriftParams::default(),
            oscillation: OscillationParams::default(),
        }
    }
}

/// Deviation metrics for one synthetic path
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SweepRunRecord {
    pub run_id: usize,
    pub n_points: usize,
    pub drift_peak_dev: f64,
    pub drift_rms_dev: f64,
    pub oscillation_peak_dev: f64,
    pub oscillation_rms_dev: f64,
}

/// Full sweep output: per-run records plus one example trajectory per model
#[derive(Clone, Debug)]
pub struct SweepBatch {
    pub records: Vec<SweepRunRecord>,
    pub example_planned: Vec<Point>,
    pub example_drift: Vec<Point>,
    pub example_oscillation: Vec<Point>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SweepSummary {
    pub n_runs: usize,
    pub n_points: usize,
    pub seed: u64,
    pub mean_drift_rms_dev: f64,
    pub mean_oscillation_rms_dev: f64,
    pub max_drift_peak_dev: f64,
    pub max_oscillation_peak_dev: f64,
}

/// Per-point CSV row pairing the planned path with both perturbed paths
#[derive(Clone, Debug, Serialize)]
pub struct TrajectoryRow {
    pub i: usize,
    pub planned_x: f64,
    pub planned_y: f64,
    pub drift_x: f64,
    pub drift_y: f64,
    pub oscillation_x: f64,
    pub oscillation_y: f64,
}

/// Builds a zigzag polyline with sharp direction reversals and normally
/// distributed waypoint jitter. Fully determined by the caller's rng state.
pub fn generate_zigzag_path(
    rng: &mut StdRng,
    n_points: usize,
    amplitude: f64,
    jitter_sigma: f64,
) -> Vec<Point> {
    let jitter = Normal::new(0.0, jitter_sigma).unwrap();

    (0..n_points)
        .map(|i| {
            let x = i as f64 * PATH_STEP;
            let y = if (i / LEG_LENGTH) % 2 == 0 {
                amplitude
            } else {
                -amplitude
            };
            Point::new(x + jitter.sample(rng), y + jitter.sample(rng))
        })
        .collect()
}

/// Runs both error models over `n_runs` seeded synthetic paths.
///
/// The same config (seed included) always produces the same batch. The
/// example trajectories are taken from the first run.
pub fn run_sweep(config: &SweepConfig) -> Result<SweepBatch, SimError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut records = Vec::with_capacity(config.n_runs);

    let mut example_planned = Vec::new();
    let mut example_drift = Vec::new();
    let mut example_oscillation = Vec::new();

    for run_id in 0..config.n_runs {
        let planned =
            generate_zigzag_path(&mut rng, config.n_points, config.amplitude, config.jitter_sigma);
        let drifted = simulate_sequential_drift(&planned, &config.drift)?;
        let oscillated = simulate_windowed_oscillation(&planned, &config.oscillation)?;

        let (drift_peak_dev, drift_rms_dev) = deviation_metrics(&planned, &drifted);
        let (oscillation_peak_dev, oscillation_rms_dev) =
            deviation_metrics(&planned, &oscillated);

        records.push(SweepRunRecord {
            run_id,
            n_points: config.n_points,
            drift_peak_dev,
            drift_rms_dev,
            oscillation_peak_dev,
            oscillation_rms_dev,
        });

        if run_id == 0 {
            example_planned = planned;
            example_drift = drifted;
            example_oscillation = oscillated;
        }
    }

    Ok(SweepBatch {
        records,
        example_planned,
        example_drift,
        example_oscillation,
    })
}

pub fn summarize_sweep(config: &SweepConfig, batch: &SweepBatch) -> SweepSummary {
    let mut sum_drift_rms = 0.0;
    let mut sum_oscillation_rms = 0.0;
    let mut max_drift_peak = 0.0_f64;
    let mut max_oscillation_peak = 0.0_f64;

    for record in &batch.records {
        sum_drift_rms += record.drift_rms_dev;
        sum_oscillation_rms += record.oscillation_rms_dev;
        max_drift_peak = max_drift_peak.max(record.drift_peak_dev);
        max_oscillation_peak = max_oscillation_peak.max(record.oscillation_peak_dev);
    }

    let n = batch.records.len().max(1) as f64;
    SweepSummary {
        n_runs: config.n_runs,
        n_points: config.n_points,
        seed: config.seed,
        mean_drift_rms_dev: sum_drift_rms / n,
        mean_oscillation_rms_dev: sum_oscillation_rms / n,
        max_drift_peak_dev: max_drift_peak,
        max_oscillation_peak_dev: max_oscillation_peak,
    }
}

pub fn trajectory_rows(batch: &SweepBatch) -> Vec<TrajectoryRow> {
    batch
        .example_planned
        .iter()
        .zip(&batch.example_drift)
        .zip(&batch.example_oscillation)
        .enumerate()
        .map(|(i, ((planned, drift), oscillation))| TrajectoryRow {
            i,
            planned_x: planned.x,
            planned_y: planned.y,
            drift_x: drift.x,
            drift_y: drift.y,
            oscillation_x: oscillation.x,
            oscillation_y: oscillation.y,
        })
        .collect()
}

/// Peak and RMS Euclidean deviation between a planned path and its
/// perturbed counterpart.
fn deviation_metrics(planned: &[Point], perturbed: &[Point]) -> (f64, f64) {
    let mut peak = 0.0_f64;
    let mut sum_sq = 0.0;
    for (p, q) in planned.iter().zip(perturbed) {
        let dev = p.distance_to(*q);
        peak = peak.max(dev);
        sum_sq += dev * dev;
    }
    let rms = (sum_sq / planned.len() as f64).sqrt();
    (peak, rms)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{generate_zigzag_path, run_sweep, summarize_sweep, trajectory_rows, SweepConfig};

    fn small_config() -> SweepConfig {
        SweepConfig {
            n_runs: 4,
            n_points: 100,
            ..SweepConfig::default()
        }
    }

    #[test]
    fn sweep_is_reproducible() {
        let config = small_config();
        let a = run_sweep(&config).unwrap();
        let b = run_sweep(&config).unwrap();
        assert_eq!(a.records, b.records);
        assert_eq!(a.example_drift, b.example_drift);
        assert_eq!(a.example_oscillation, b.example_oscillation);
    }

    #[test]
    fn different_seeds_differ() {
        let a = run_sweep(&small_config()).unwrap();
        let b = run_sweep(&SweepConfig {
            seed: 7,
            ..small_config()
        })
        .unwrap();
        assert_ne!(a.records, b.records);
    }

    #[test]
    fn zigzag_path_has_requested_length() {
        let mut rng = StdRng::seed_from_u64(1);
        let path = generate_zigzag_path(&mut rng, 100, 4.0, 0.05);
        assert_eq!(path.len(), 100);
    }

    #[test]
    fn records_cover_all_runs() {
        let config = small_config();
        let batch = run_sweep(&config).unwrap();
        assert_eq!(batch.records.len(), config.n_runs);

        let summary = summarize_sweep(&config, &batch);
        assert!(summary.max_drift_peak_dev >= summary.mean_drift_rms_dev);
    }

    #[test]
    fn trajectory_rows_align_with_example() {
        let batch = run_sweep(&small_config()).unwrap();
        let rows = trajectory_rows(&batch);
        assert_eq!(rows.len(), batch.example_planned.len());
        assert_eq!(rows[3].planned_x, batch.example_planned[3].x);
        assert_eq!(rows[3].drift_y, batch.example_drift[3].y);
    }

    #[test]
    fn zigzag_turns_produce_deviation_in_both_models() {
        let batch = run_sweep(&small_config()).unwrap();
        assert!(batch.records.iter().all(|r| r.drift_peak_dev > 0.0));
        assert!(batch.records.iter().all(|r| r.oscillation_peak_dev > 0.0));
    }
}
