//! Locating and reading the configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::path::PathResolver;
use super::schema::AppConfig;
use crate::error::{CaptureError, Result};

/// A configuration together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AppConfig,
    /// `None` when no file existed and defaults are in use.
    pub path: Option<PathBuf>,
}

/// Default config file location: `<config dir>/snapcrop/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("snapcrop").join("config.toml"))
}

/// Load configuration.
///
/// An explicit path (from `--config` or `SNAPCROP_CONFIG`) must exist. The
/// default location is optional; when it is missing defaults are used.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(CaptureError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        return load_file(path);
    }

    match default_config_path() {
        Some(path) if path.is_file() => load_file(&path),
        other => {
            debug!(path = ?other, "No config file, using defaults");
            Ok(LoadedConfig {
                config: AppConfig::default(),
                path: None,
            })
        }
    }
}

/// Read, parse and resolve a config file.
///
/// Relative paths inside the file are resolved against its directory.
pub fn load_file(path: &Path) -> Result<LoadedConfig> {
    let text = fs::read_to_string(path)?;
    let mut config = AppConfig::from_toml(&text).map_err(|e| match e {
        CaptureError::ConfigParse(msg) => {
            CaptureError::ConfigParse(format!("{}: {msg}", path.display()))
        }
        other => other,
    })?;

    let resolver = PathResolver::new(path)?;
    resolver.resolve_opt(&mut config.storage_root)?;
    resolver.resolve_opt(&mut config.camera_source)?;
    resolver.resolve_opt(&mut config.preview_path)?;

    info!(path = %path.display(), "Loaded config");
    Ok(LoadedConfig {
        config,
        path: Some(path.to_path_buf()),
    })
}
