//! Configuration resolution for the CLI.
//!
//! The configuration file is, in order: `--config`, `$OMNIDEX_CONFIG`, or
//! `<config dir>/omnidex/config.toml`. A missing default file means
//! built-in defaults. The tantivy index lives in `--index`, the file's
//! `index_path`, or `<data dir>/omnidex/index`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use omnidex_core::{IndexConfig, StoreBackend};

const PROJECT_NAME: &str = "omnidex";

/// Default configuration file location for this platform.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
}

/// Default index directory for this platform.
pub fn default_index_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(PROJECT_NAME).join("index"))
}

/// Load the effective configuration.
///
/// An explicit `config_path` must exist; the platform default may not.
pub fn load(config_path: Option<&Path>, index_override: Option<&Path>) -> Result<IndexConfig> {
    let mut config = match config_path {
        Some(path) => IndexConfig::load(path)?,
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => IndexConfig::load(&path)?,
            None => {
                log::debug!("No configuration file found, using defaults");
                IndexConfig::default()
            }
        },
    };

    if let Some(dir) = index_override {
        config.index_path = Some(dir.display().to_string());
    }
    if config.backend == StoreBackend::Tantivy && config.index_path.is_none() {
        let dir = default_index_path()
            .ok_or_else(|| anyhow!("Could not determine a data directory; pass --index"))?;
        config.index_path = Some(dir.display().to_string());
    }

    Ok(config)
}

/// Write a default configuration file, returning its path.
pub fn init(file: Option<&Path>, force: bool) -> Result<PathBuf> {
    let path = match file {
        Some(p) => p.to_path_buf(),
        None => default_config_path()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let toml_str = IndexConfig::default().to_toml_string()?;
    std::fs::write(&path, toml_str)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    log::info!("Wrote default configuration to {}", path.display());
    Ok(path)
}

// ============================================================================
// Tests
// ============================================================================
