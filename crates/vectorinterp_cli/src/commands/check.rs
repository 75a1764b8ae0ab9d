//! Check command implementation
//!
//! Prints the effective configuration after file, environment and flag
//! overrides.

use tracing::info;
use vectorinterp_core::serialization::FORMAT_VERSION;

use crate::config::CliConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    info!("Checking configuration...");

    println!("vectorinterp {}", env!("CARGO_PKG_VERSION"));
    println!("serialisation format: V{}", FORMAT_VERSION);
    println!("parallel workers: {}", config.effective_workers());
    println!();
    print!("{}", config.to_toml()?);

    info!("Configuration OK");
    Ok(())
}
