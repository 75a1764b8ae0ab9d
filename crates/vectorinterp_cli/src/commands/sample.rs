//! Sample command implementation
//!
//! Prints the X values kept by gap-aware downsampling, or the continuous
//! sections of the series.

use serde::Deserialize;
use tracing::info;
use vectorinterp_core::sampling::{downsample_values, get_sections};

use super::read_records;
use crate::config::CliConfig;
use crate::{CliError, Result};

#[derive(Debug, Deserialize)]
struct XRecord {
    x: f64,
}

/// Run the sample command
pub fn run(
    input: &str,
    interval: Option<f64>,
    max_gap: Option<f64>,
    sections: bool,
    config: &CliConfig,
) -> Result<()> {
    if let Some(value) = interval.filter(|v| !v.is_finite()) {
        return Err(CliError::InvalidArgument(format!("interval must be finite, got {}", value)));
    }
    let xs: Vec<f64> = read_records::<XRecord>(input)?.into_iter().map(|r| r.x).collect();
    let interval = interval.unwrap_or(config.downsample_interval);
    let max_gap = max_gap.unwrap_or(config.max_gap);

    if sections {
        let ranges = get_sections(&xs, max_gap);
        info!(points = xs.len(), sections = ranges.len(), "split series");
        for range in ranges {
            println!("{},{}", range.min, range.max);
        }
        return Ok(());
    }

    let sampled = downsample_values(&xs, interval, max_gap);
    info!(points = xs.len(), kept = sampled.len(), interval, "downsampled series");
    for x in sampled {
        println!("{}", x);
    }
    Ok(())
}
