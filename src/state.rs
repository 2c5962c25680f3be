//! Workflow state of the capture screen.
//!
//! Each `Awaiting*` variant is a point where control has been handed to the
//! host and the workflow resumes only through the matching callback.

use std::fmt;

use serde::Serialize;

use crate::host::Capability;
use crate::storage::StoredImageFile;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WorkflowState {
    /// Waiting for the user to trigger a capture.
    #[default]
    Idle,
    /// A permission prompt is open.
    AwaitingPermission { capability: Capability },
    /// The camera experience is open.
    AwaitingCapture,
    /// The crop experience is open on a stored capture.
    AwaitingCrop { file: StoredImageFile },
    /// A cropped image is on the display surface.
    Displayed,
    /// A permission was denied and the screen was closed.
    Finished,
}

impl WorkflowState {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingPermission { .. } => "awaiting_permission",
            Self::AwaitingCapture => "awaiting_capture",
            Self::AwaitingCrop { .. } => "awaiting_crop",
            Self::Displayed => "displayed",
            Self::Finished => "finished",
        }
    }

    /// True while a host experience is open.
    pub const fn is_suspended(&self) -> bool {
        matches!(
            self,
            Self::AwaitingPermission { .. } | Self::AwaitingCapture | Self::AwaitingCrop { .. }
        )
    }

    /// States from which the trigger action starts a new run.
    pub const fn accepts_trigger(&self) -> bool {
        matches!(self, Self::Idle | Self::Displayed)
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitingPermission { capability } => {
                write!(f, "{} ({capability})", self.name())
            }
            Self::AwaitingCrop { file } => write!(f, "{} ({})", self.name(), file.path.display()),
            _ => f.write_str(self.name()),
        }
    }
}
