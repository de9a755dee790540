//! CLI commands

use ct_core::Configuration;
use std::path::Path;

use crate::error::{CliError, Result};

pub mod list_changed;
pub mod run;

/// Assemble the run configuration
///
/// The explicit config file (or the first `ct.yaml` found) is loaded, flags
/// are applied on top, then support files are located and the result is
/// validated.
pub fn load_config(
    config_file: Option<&Path>,
    apply_flags: impl FnOnce(&mut Configuration),
) -> Result<Configuration> {
    let mut config = match config_file {
        Some(path) if !path.is_file() => {
            return Err(CliError::config_with_help(
                format!("config file '{}' not found", path.display()),
                "pass an existing file to --config or unset CT_CONFIG",
            ));
        }
        Some(path) => Configuration::load_from(path)?,
        None => Configuration::discover()?,
    };

    apply_flags(&mut config);
    config.resolve_support_files();
    config.validate()?;

    if let Ok(yaml) = serde_yaml::to_string(&config) {
        tracing::debug!("Configuration:\n{}", yaml);
    }

    Ok(config)
}
