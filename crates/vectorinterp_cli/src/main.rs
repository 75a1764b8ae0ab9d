//! vectorinterp CLI - Resampling of Navigation and Attitude Series
//!
//! # Commands
//!
//! - `vectorinterp resample --input <csv> --query <csv|-> --kernel <kind>` - Evaluate a series at query timestamps
//! - `vectorinterp sample --input <csv> --interval <f>` - Print downsampled X values
//! - `vectorinterp check` - Print the effective configuration
//!
//! # Configuration
//!
//! Settings come from `vectorinterp.toml` (or `--config`), then
//! `VECTORINTERP_*` environment variables, then command line flags.
//! `RUST_LOG` overrides the configured log level.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vectorinterp_core::ExtrapolationMode;

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::resample::KernelKind;
use config::CliConfig;

/// vectorinterp series interpolation CLI
#[derive(Parser)]
#[command(name = "vectorinterp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Behaviour outside the input domain (extrapolate, nearest, fail; default extrapolate)
    #[arg(short, long, global = true)]
    extrapolation: Option<ExtrapolationMode>,

    /// Worker threads for batch queries (0 = all cores)
    #[arg(short, long, global = true)]
    workers: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an input series at query timestamps
    Resample {
        /// Input CSV with columns x,y (or x,yaw,pitch,roll for slerp)
        #[arg(short, long)]
        input: String,

        /// Query CSV with column x, or - for stdin
        #[arg(short, long)]
        query: String,

        /// Interpolation kernel
        #[arg(short, long, value_enum, default_value = "linear")]
        kernel: KernelKind,

        /// Output CSV (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the X values kept by gap-aware downsampling
    Sample {
        /// Input CSV with column x
        #[arg(short, long)]
        input: String,

        /// Target spacing (defaults to the configured downsample_interval)
        #[arg(long)]
        interval: Option<f64>,

        /// Largest gap within one section (defaults to the configured max_gap)
        #[arg(long)]
        max_gap: Option<f64>,

        /// Print continuous sections as min,max instead
        #[arg(long)]
        sections: bool,
    },

    /// Print the effective configuration
    Check,
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::resolve(cli.config.as_deref())
        .context("failed to load configuration")?
        .with_overrides(cli.extrapolation, cli.workers, cli.verbose);
    config.validate().context("invalid configuration")?;

    init_tracing(&config.log_level);
    debug!(?config, "effective configuration");

    match cli.command {
        Commands::Resample {
            input,
            query,
            kernel,
            output,
        } => commands::resample::run(&input, &query, kernel, output.as_deref(), &config)
            .context("resample failed")?,
        Commands::Sample {
            input,
            interval,
            max_gap,
            sections,
        } => commands::sample::run(&input, interval, max_gap, sections, &config).context("sample failed")?,
        Commands::Check => commands::check::run(&config)?,
    }
    Ok(())
}
