//! CLI command implementations

pub mod config;
pub mod generate;
pub mod remove;
pub mod rows;

use crate::cli::error::CliError;
use crate::config::MappingConfig;
use crate::models::MappingStore;
use std::path::Path;

/// Load the workspace configuration for a mapping store
///
/// Indicator generation is on when either the configuration or the store
/// asks for it.
pub fn load_config(workspace: &Path, store: &MappingStore) -> Result<MappingConfig, CliError> {
    let mut config = MappingConfig::load(workspace)?;
    if store.generate_indicators {
        config.mapping.generate_indicators = true;
    }
    config.validate()?;
    Ok(config)
}
