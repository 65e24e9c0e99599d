/*!
 * `ambkit init` - write a starter configuration file
 *
 * The file holds the region, default query network and client tuning.
 * Credentials are left to the AWS credential chain unless the caller
 * edits them in afterwards.
 */

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{AmbConfig, AmbConfigBuilder};

/// Options for [`run_init`]
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Target file; the platform config directory when `None`
    pub path: Option<PathBuf>,
    /// Replace an existing file
    pub force: bool,
    pub region: Option<String>,
    pub default_network: Option<String>,
    pub aws_profile: Option<String>,
}

/// Write the configuration and return where it went
pub fn run_init(options: &InitOptions) -> Result<PathBuf> {
    let config_path = match &options.path {
        Some(path) => path.clone(),
        None => AmbConfig::default_path().context("Could not determine config directory")?,
    };

    if config_path.exists() && !options.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    let config = starter_config(options)?;
    ensure_parent(&config_path)?;
    config
        .to_file(&config_path)
        .map_err(|e| anyhow::anyhow!("Failed to save configuration: {}", e))?;

    print_summary(&config_path, &config);
    Ok(config_path)
}

fn starter_config(options: &InitOptions) -> Result<AmbConfig> {
    let mut builder = AmbConfigBuilder::new();
    if let Some(region) = &options.region {
        builder = builder.region(region.clone());
    }
    if let Some(network) = &options.default_network {
        builder = builder.default_network(network.clone());
    }
    if let Some(profile) = &options.aws_profile {
        builder = builder.aws_profile(profile.clone());
    }
    builder
        .build()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    Ok(())
}

fn print_summary(path: &Path, config: &AmbConfig) {
    eprintln!("Configuration written to {}", path.display());
    eprintln!("  region:          {}", config.region);
    eprintln!("  default network: {}", config.default_network);
    if let Some(profile) = &config.aws_profile {
        eprintln!("  profile:         {}", profile);
    }
}
