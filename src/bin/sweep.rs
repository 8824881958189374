use std::env;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use csv::Writer;
use pensim::{
    run_sweep, summarize_sweep, trajectory_rows, DriftParams, OscillationParams, SweepConfig,
    DEFAULT_SWEEP_RUNS,
};

#[derive(Debug, Clone)]
struct CliConfig {
    runs: usize,
    points: usize,
    seed: u64,
    amplitude: f64,
    jitter_sigma: f64,
    drift: DriftParams,
    oscillation: OscillationParams,
}

impl Default for CliConfig {
    fn default() -> Self {
        let defaults = SweepConfig::default();
        Self {
            runs: defaults.n_runs,
            points: defaults.n_points,
            seed: defaults.seed,
            amplitude: defaults.amplitude,
            jitter_sigma: defaults.jitter_sigma,
            drift: defaults.drift,
            oscillation: defaults.oscillation,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = parse_args(env::args().skip(1))?;
    let output_dir = create_output_dir()?;
    let config = SweepConfig {
        n_runs: cli.runs,
        n_points: cli.points,
        seed: cli.seed,
        amplitude: cli.amplitude,
        jitter_sigma: cli.jitter_sigma,
        drift: cli.drift,
        oscillation: cli.oscillation,
    };
    let batch = run_sweep(&config)?;
    let summary = summarize_sweep(&config, &batch);

    write_rows_csv(&output_dir.join("results.csv"), &batch.records)?;
    write_rows_csv(
        &output_dir.join("example_trajectory.csv"),
        &trajectory_rows(&batch),
    )?;
    fs::write(
        output_dir.join("summary.json"),
        serde_json::to_string_pretty(&summary)?,
    )?;

    println!("Output directory: {}", output_dir.display());
    Ok(())
}

fn parse_args<I>(args: I) -> Result<CliConfig, Box<dyn Error>>
where
    I: IntoIterator<Item = String>,
{
    let mut cli = CliConfig::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--runs" => cli.runs = parse_value(args.next(), "--runs")?,
            "--points" => cli.points = parse_value(args.next(), "--points")?,
            "--seed" => cli.seed = parse_value(args.next(), "--seed")?,
            "--amplitude" => cli.amplitude = parse_value(args.next(), "--amplitude")?,
            "--jitter-sigma" => cli.jitter_sigma = parse_value(args.next(), "--jitter-sigma")?,
            "--damping-factor" => {
                cli.drift.damping_factor = parse_value(args.next(), "--damping-factor")?
            }
            "--decay-factor" => {
                cli.drift.decay_factor = parse_value(args.next(), "--decay-factor")?
            }
            "--gain" => cli.oscillation.gain = parse_value(args.next(), "--gain")?,
            "--damping" => cli.oscillation.damping = parse_value(args.next(), "--damping")?,
            "--frequency" => cli.oscillation.frequency = parse_value(args.next(), "--frequency")?,
            "--non-linearity" => {
                cli.oscillation.non_linearity = parse_value(args.next(), "--non-linearity")?
            }
            "--window-length" => {
                cli.oscillation.window_length = parse_value(args.next(), "--window-length")?
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                return Err(format!("unknown argument: {other}").into());
            }
        }
    }

    Ok(cli)
}

fn parse_value<T>(value: Option<String>, flag: &str) -> Result<T, Box<dyn Error>>
where
    T: std::str::FromStr,
    T::Err: Error + 'static,
{
    let raw = value.ok_or_else(|| format!("missing value for {flag}"))?;
    Ok(raw.parse()?)
}

fn print_help() {
    println!("Usage: cargo run --bin sweep -- [OPTIONS]");
    println!("  --runs <usize>            default: {DEFAULT_SWEEP_RUNS}");
    println!("  --points <usize>");
    println!("  --seed <u64>");
    println!("  --amplitude <f64>");
    println!("  --jitter-sigma <f64>");
    println!("  --damping-factor <f64>    sequential drift model");
    println!("  --decay-factor <f64>      sequential drift model");
    println!("  --gain <f64>              windowed oscillation model");
    println!("  --damping <f64>           windowed oscillation model");
    println!("  --frequency <f64>         windowed oscillation model");
    println!("  --non-linearity <f64>     windowed oscillation model");
    println!("  --window-length <usize>   windowed oscillation model");
}

fn create_output_dir() -> Result<PathBuf, Box<dyn Error>> {
    let output_root = repo_root().join("output-pensim");
    fs::create_dir_all(&output_root)?;

    let timestamp = timestamp_string()?;
    let output_dir = output_root.join(timestamp);
    fs::create_dir_all(&output_dir)?;
    Ok(output_dir)
}

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn timestamp_string() -> Result<String, Box<dyn Error>> {
    let output = Command::new("date").arg("+%Y%m%d_%H%M%S").output()?;
    if !output.status.success() {
        return Err("date command failed while building output path".into());
    }

    let timestamp = String::from_utf8(output.stdout)?.trim().to_string();
    if timestamp.is_empty() {
        return Err("date command returned an empty timestamp".into());
    }

    Ok(timestamp)
}

fn write_rows_csv<P: AsRef<Path>, T: serde::Serialize>(
    path: P,
    rows: &[T],
) -> Result<(), Box<dyn Error>> {
    let mut writer = Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
