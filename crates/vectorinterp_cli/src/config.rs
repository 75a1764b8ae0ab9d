//! CLI configuration management.
//!
//! Settings are read from a TOML file (every field optional), then
//! overridden by `VECTORINTERP_*` environment variables and finally by
//! command line flags.
//!
//! ```toml
//! log_level = "info"
//! extrapolation_mode = "nearest"
//! workers = 4
//! input_in_degrees = true
//! output_in_degrees = true
//! nearest_average_halves = false
//! downsample_interval = 0.0
//! max_gap = 0.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::warn;
use vectorinterp_core::ExtrapolationMode;

/// File picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "vectorinterp.toml";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const MAX_WORKERS: usize = 1024;

/// Effective CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,

    /// Behaviour for queries outside the input domain
    pub extrapolation_mode: ExtrapolationMode,

    /// Worker threads for batch queries; 0 uses every available core
    pub workers: usize,

    /// Attitude input columns are in degrees
    pub input_in_degrees: bool,

    /// Attitude output columns are in degrees
    pub output_in_degrees: bool,

    /// Nearest kernel averages both neighbours at an exact midpoint
    pub nearest_average_halves: bool,

    /// Downsample the input series to this spacing before building (0 disables)
    pub downsample_interval: f64,

    /// Largest gap inside one section (0 derives it from the interval)
    pub max_gap: f64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            extrapolation_mode: ExtrapolationMode::Extrapolate,
            workers: 0,
            input_in_degrees: true,
            output_in_degrees: true,
            nearest_average_halves: false,
            downsample_interval: 0.0,
            max_gap: 0.0,
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load `path`, or [`DEFAULT_CONFIG_FILE`] when present, then apply the environment.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        Ok(config.with_env_override())
    }

    /// Apply environment variable overrides.
    ///
    /// Unparseable values are reported and ignored.
    pub fn with_env_override(mut self) -> Self {
        if let Ok(log_level) = std::env::var("VECTORINTERP_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Ok(workers) = std::env::var("VECTORINTERP_WORKERS") {
            match workers.trim().parse() {
                Ok(workers) => self.workers = workers,
                Err(_) => warn!(value = %workers, "ignoring invalid VECTORINTERP_WORKERS"),
            }
        }

        if let Ok(mode) = std::env::var("VECTORINTERP_EXTRAPOLATION") {
            match mode.parse() {
                Ok(mode) => self.extrapolation_mode = mode,
                Err(e) => warn!(error = %e, "ignoring invalid VECTORINTERP_EXTRAPOLATION"),
            }
        }

        self
    }

    /// Apply command line flags, which take precedence over file and environment.
    pub fn with_overrides(
        mut self,
        extrapolation_mode: Option<ExtrapolationMode>,
        workers: Option<usize>,
        verbose: bool,
    ) -> Self {
        if let Some(mode) = extrapolation_mode {
            self.extrapolation_mode = mode;
        }
        if let Some(workers) = workers {
            self.workers = workers;
        }
        if verbose {
            self.log_level = "debug".to_string();
        }
        self
    }

    /// Worker count with `0` resolved to the number of available cores.
    pub fn effective_workers(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get()
        } else {
            self.workers
        }
    }

    /// Validate the configuration, collecting every problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if self.workers > MAX_WORKERS {
            errors.push(format!(
                "workers {} exceeds maximum allowed ({})",
                self.workers, MAX_WORKERS
            ));
        }

        if !self.downsample_interval.is_finite() || self.downsample_interval < 0.0 {
            errors.push(format!(
                "downsample_interval must be a finite value >= 0, got {}",
                self.downsample_interval
            ));
        }

        if !self.max_gap.is_finite() || self.max_gap < 0.0 {
            errors.push(format!("max_gap must be a finite value >= 0, got {}", self.max_gap));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

/// Configuration error type
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration could not be rendered
    #[error("Serialize error: {0}")]
    Serialize(String),

    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
