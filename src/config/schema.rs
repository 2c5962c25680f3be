//! Configuration file schema.
//!
//! ```toml
//! app_id = "io.snapcrop.app"
//! storage_root = "~/sdcard"
//! camera_source = "stills/desk.png"
//! preview_path = "/tmp/snapcrop-preview.png"
//! thumbnail_size = 160
//!
//! [permissions]
//! camera = "granted"
//! storage = "ask"
//! ```

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{CaptureError, Result};
use crate::host::Capability;

pub const DEFAULT_APP_ID: &str = "io.snapcrop.app";

/// Longest side of the thumbnail the camera experience hands back.
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 160;

/// How the desktop host answers a permission query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionPolicy {
    /// Always granted, no prompt.
    Granted,
    /// Always refused when prompted.
    Denied,
    /// Prompt on the terminal.
    #[default]
    Ask,
}

impl fmt::Display for PermissionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Ask => "ask",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PermissionsConfig {
    pub camera: PermissionPolicy,
    pub storage: PermissionPolicy,
}

impl PermissionsConfig {
    pub const fn policy(&self, capability: Capability) -> PermissionPolicy {
        match capability {
            Capability::Camera => self.camera,
            Capability::StorageWrite => self.storage,
        }
    }

    pub const fn all_granted() -> Self {
        Self {
            camera: PermissionPolicy::Granted,
            storage: PermissionPolicy::Granted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Names the app-scoped storage directory.
    pub app_id: String,
    /// External storage root; the platform data dir when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_root: Option<PathBuf>,
    /// Still image the desktop camera experience "captures".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_source: Option<PathBuf>,
    /// Where the display surface writes a PNG of the cropped result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_path: Option<PathBuf>,
    pub thumbnail_size: u32,
    pub permissions: PermissionsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_id: DEFAULT_APP_ID.to_string(),
            storage_root: None,
            camera_source: None,
            preview_path: None,
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
            permissions: PermissionsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse a TOML document.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| CaptureError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CaptureError::Other(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.app_id.trim().is_empty() {
            return Err(CaptureError::ConfigInvalid("app_id must not be empty".to_string()));
        }
        if self
            .app_id
            .chars()
            .any(|c| !(c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-'))
        {
            return Err(CaptureError::ConfigInvalid(format!(
                "app_id '{}' may only contain letters, digits, '.', '_' and '-'",
                self.app_id
            )));
        }
        if self.thumbnail_size == 0 {
            return Err(CaptureError::ConfigInvalid(
                "thumbnail_size must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Storage root, falling back to the platform data directory.
    pub fn storage_root_or_default(&self) -> Option<PathBuf> {
        self.storage_root.clone().or_else(dirs::data_local_dir)
    }
}
