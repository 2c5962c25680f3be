//! Value types exchanged between the controller and the host.

use std::fmt;
use std::path::PathBuf;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// Thumbnail bitmap handed back by the camera experience.
pub type CapturedImage = DynamicImage;

/// Bitmap handed back by the crop experience.
pub type CroppedImage = DynamicImage;

/// Edge length of the square crop output, in pixels.
pub const CROP_OUTPUT_SIZE: u32 = 256;

/// Runtime-gated host capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Access to the camera experience
    Camera,
    /// Write access to external storage
    StorageWrite,
}

impl Capability {
    /// Order in which capabilities are requested.
    pub const ORDER: [Self; 2] = [Self::Camera, Self::StorageWrite];
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Camera => "camera",
            Self::StorageWrite => "storage write",
        })
    }
}

/// Transient user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    PermissionRequired,
    CaptureUnsupported,
    CaptureFailed,
    CropUnsupported,
    CropCancelled,
    CropSucceeded,
}

impl Notice {
    pub const fn message(self) -> &'static str {
        match self {
            Self::PermissionRequired => "Permission required",
            Self::CaptureUnsupported => "Device doesn't support image capture",
            Self::CaptureFailed => "Unable to capture image",
            Self::CropUnsupported => "Device doesn't support image crop",
            Self::CropCancelled => "Image crop cancelled",
            Self::CropSucceeded => "Image cropped successfully",
        }
    }

    pub const fn is_success(self) -> bool {
        matches!(self, Self::CropSucceeded)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Parameters handed to the crop experience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CropRequest {
    /// Stored capture to crop
    pub source: PathBuf,
    pub aspect_x: u32,
    pub aspect_y: u32,
    pub output_x: u32,
    pub output_y: u32,
    /// Return pixel data directly instead of writing a new file
    pub return_data: bool,
}

impl CropRequest {
    /// Square 256×256 crop returning pixel data.
    pub fn square(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            aspect_x: 1,
            aspect_y: 1,
            output_x: CROP_OUTPUT_SIZE,
            output_y: CROP_OUTPUT_SIZE,
            return_data: true,
        }
    }

    pub const fn aspect(&self) -> (u32, u32) {
        (self.aspect_x, self.aspect_y)
    }
}

/// Callback delivered by the host when a suspended step completes.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    PermissionResult { capability: Capability, granted: bool },
    /// `None` when the user backed out of the camera experience.
    CaptureResult(Option<CapturedImage>),
    /// `None` when the user backed out of the crop experience.
    CropResult(Option<CroppedImage>),
}

impl HostEvent {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::PermissionResult { .. } => "permission_result",
            Self::CaptureResult(_) => "capture_result",
            Self::CropResult(_) => "crop_result",
        }
    }
}
