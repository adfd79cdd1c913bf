//! Config command implementation

use crate::cli::error::CliError;
use crate::config::{CONFIG_FILENAME, Config, sample_config};
use std::path::Path;

/// Print a sample configuration file
pub fn handle_config_sample() -> Result<(), CliError> {
    print!("{}", sample_config());
    Ok(())
}

/// Print the effective configuration for a directory
pub fn handle_config_show(dir: &Path) -> Result<(), CliError> {
    let config = Config::load(dir)?;
    if !dir.join(CONFIG_FILENAME).exists() {
        eprintln!("No {} found, showing defaults", CONFIG_FILENAME);
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
