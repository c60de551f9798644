//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod process;

use mercadata_core::MercadataConfig;

/// Load configuration from an explicit path, the default location, or
/// fall back to built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<MercadataConfig> {
    if let Some(path) = config_path {
        return Ok(MercadataConfig::from_file(std::path::Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        return Ok(MercadataConfig::from_file(&default_path)?);
    }

    Ok(MercadataConfig::default())
}
