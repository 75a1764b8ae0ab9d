//! Resample command implementation
//!
//! Builds an interpolator from an input CSV series and evaluates it at the
//! query timestamps.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::info;
use vectorinterp_core::kernels::{Akima, Kernel, Linear, Nearest};
use vectorinterp_core::sampling::compute_downsampling_indices;
use vectorinterp_core::{Interpolator, SlerpInterpolator};

use super::{read_records, write_records};
use crate::config::CliConfig;
use crate::Result;

/// Interpolation kernel selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KernelKind {
    /// Piecewise linear
    Linear,
    /// Nearest neighbour
    Nearest,
    /// Modified Akima spline
    Akima,
    /// Quaternion slerp over yaw/pitch/roll columns
    Slerp,
}

#[derive(Debug, Deserialize)]
struct ScalarRecord {
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
struct AttitudeRecord {
    x: f64,
    yaw: f64,
    pitch: f64,
    roll: f64,
}

#[derive(Debug, Deserialize)]
struct QueryRecord {
    x: f64,
}

#[derive(Debug, Serialize)]
struct ScalarOutput {
    x: f64,
    y: f64,
}

#[derive(Debug, Serialize)]
struct AttitudeOutput {
    x: f64,
    yaw: f64,
    pitch: f64,
    roll: f64,
}

/// Indices of the input rows kept after optional downsampling.
fn kept_indices(xs: &[f64], config: &CliConfig) -> Vec<usize> {
    compute_downsampling_indices(xs, config.downsample_interval, config.max_gap)
}

/// Evaluate a scalar kernel over the queries.
pub fn resample_scalar<K>(kernel: K, xs: &[f64], ys: &[f64], queries: &[f64], config: &CliConfig) -> Result<Vec<f64>>
where
    K: Kernel<f64, Value = f64>,
{
    let interp = Interpolator::with_kernel(xs, ys, config.extrapolation_mode, kernel)?;
    info!(interpolator = %interp, queries = queries.len(), "resampling");
    Ok(interp.interpolate_many(queries, config.effective_workers())?)
}

/// Evaluate attitudes over the queries as `[yaw, pitch, roll]`.
pub fn resample_attitude(xs: &[f64], ypr: &[[f64; 3]], queries: &[f64], config: &CliConfig) -> Result<Vec<[f64; 3]>> {
    let interp = SlerpInterpolator::from_ypr(xs, ypr, config.input_in_degrees, config.extrapolation_mode)?;
    info!(interpolator = %interp, queries = queries.len(), "resampling attitude");
    Ok(interp.ypr_many(queries, config.output_in_degrees, config.effective_workers())?)
}

/// Run the resample command
pub fn run(input: &str, query: &str, kernel: KernelKind, output: Option<&str>, config: &CliConfig) -> Result<()> {
    let queries: Vec<f64> = read_records::<QueryRecord>(query)?.into_iter().map(|q| q.x).collect();

    match kernel {
        KernelKind::Linear => run_scalar(Linear, input, &queries, output, config),
        KernelKind::Nearest => run_scalar(
            Nearest::new(config.nearest_average_halves),
            input,
            &queries,
            output,
            config,
        ),
        KernelKind::Akima => run_scalar(Akima::default(), input, &queries, output, config),
        KernelKind::Slerp => run_attitude(input, &queries, output, config),
    }
}

fn run_scalar<K>(kernel: K, input: &str, queries: &[f64], output: Option<&str>, config: &CliConfig) -> Result<()>
where
    K: Kernel<f64, Value = f64>,
{
    let records: Vec<ScalarRecord> = read_records(input)?;
    let xs: Vec<f64> = records.iter().map(|r| r.x).collect();
    let kept = kept_indices(&xs, config);
    let xs: Vec<f64> = kept.iter().map(|&i| records[i].x).collect();
    let ys: Vec<f64> = kept.iter().map(|&i| records[i].y).collect();
    info!(input_points = records.len(), kept = xs.len(), "loaded series");

    let values = resample_scalar(kernel, &xs, &ys, queries, config)?;
    let rows: Vec<ScalarOutput> = queries
        .iter()
        .zip(values)
        .map(|(&x, y)| ScalarOutput { x, y })
        .collect();
    write_records(output, &rows)
}

fn run_attitude(input: &str, queries: &[f64], output: Option<&str>, config: &CliConfig) -> Result<()> {
    let records: Vec<AttitudeRecord> = read_records(input)?;
    let xs: Vec<f64> = records.iter().map(|r| r.x).collect();
    let kept = kept_indices(&xs, config);
    let xs: Vec<f64> = kept.iter().map(|&i| records[i].x).collect();
    let ypr: Vec<[f64; 3]> = kept
        .iter()
        .map(|&i| [records[i].yaw, records[i].pitch, records[i].roll])
        .collect();
    info!(input_points = records.len(), kept = xs.len(), "loaded attitude series");

    let values = resample_attitude(&xs, &ypr, queries, config)?;
    let rows: Vec<AttitudeOutput> = queries
        .iter()
        .zip(values)
        .map(|(&x, [yaw, pitch, roll])| AttitudeOutput { x, yaw, pitch, roll })
        .collect();
    write_records(output, &rows)
}
