//! Validate config command implementation

use crate::cli::error::CliError;
use crate::config::MappingConfig;
use std::path::Path;

/// Load, check and print the effective workspace configuration
pub fn handle_validate_config(workspace: &Path) -> Result<(), CliError> {
    let config = MappingConfig::load(workspace)?;
    config.validate()?;

    println!("{}", config.to_toml()?);
    println!("Validation successful");
    Ok(())
}
