//! Error types for capture workflow operations.

use thiserror::Error;

use crate::host::Capability;

/// Primary error type for capture, storage and crop operations.
#[derive(Error, Debug)]
pub enum CaptureError {
    // Host capability errors
    #[error("Permission denied: {capability}")]
    PermissionDenied { capability: Capability },

    #[error("Host does not support {feature}: {reason}")]
    Unsupported { feature: &'static str, reason: String },

    // Image errors
    #[error("Image encoding failed: {0}")]
    Encode(String),

    #[error("Image processing failed: {0}")]
    ImageProcessing(String),

    #[error("Image file not found: {path}")]
    ImageNotFound { path: String },

    #[error("Unsupported image format: {0}")]
    ImageFormat(String),

    // Storage errors
    #[error("External storage unavailable: {root}")]
    StorageUnavailable { root: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    // Workflow outcome
    #[error("Workflow ended without a cropped image ({state})")]
    WorkflowIncomplete { state: String },

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl CaptureError {
    /// Returns true if the error is recoverable by the user.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied { .. }
                | Self::ImageNotFound { .. }
                | Self::StorageUnavailable { .. }
                | Self::ConfigNotFound { .. }
                | Self::ConfigInvalid(_)
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::PermissionDenied { .. } => {
                Some("Grant the permission in the config file or pass --yes")
            }
            Self::Unsupported { feature, .. } if *feature == "image capture" => {
                Some("Set camera_source in the config file or pass --source")
            }
            Self::StorageUnavailable { .. } => {
                Some("Point storage_root at an existing directory")
            }
            Self::ConfigNotFound { .. } => Some("Check the --config path or SNAPCROP_CONFIG"),
            _ => None,
        }
    }
}

/// Convenience type alias for Results using CaptureError.
pub type Result<T> = std::result::Result<T, CaptureError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CaptureError::Other(format!("{}: {e}", f().into())))
    }
}
