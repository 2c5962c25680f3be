//! Output mode abstraction for robot and human output.
//!
//! Notices from the desktop host, workflow outcomes and command results all
//! flow through [`Output`], so the capture workflow never knows whether it is
//! talking to a person or a script.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::controller::WorkflowOutcome;
use crate::error::CaptureError;
use crate::host::Notice;
use crate::storage::StoredImageFile;

pub mod human;
pub mod robot;

pub use human::HumanOutput;
pub use robot::RobotOutput;

/// What the display surface currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplaySummary {
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<PathBuf>,
}

/// Build metadata for the `version` command.
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfo {
    pub version: &'static str,
    pub git_sha: &'static str,
    pub build_timestamp: &'static str,
    pub rustc: &'static str,
    pub target: &'static str,
}

/// JSON formatting options for robot mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotFormat {
    /// Pretty-printed JSON (default for --robot).
    Json,
    /// Single-line JSON (--format=json-compact).
    JsonCompact,
}

/// Determines how command output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// JSON output for scripting.
    Robot(RobotFormat),
    /// Styled terminal output; `true` enables color.
    Human(bool),
}

impl OutputMode {
    /// Create OutputMode from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.use_json() {
            let format = if cli.use_compact_json() {
                RobotFormat::JsonCompact
            } else {
                RobotFormat::Json
            };
            Self::Robot(format)
        } else {
            Self::Human(!cli.no_color && console::colors_enabled())
        }
    }

    /// Returns true if output should be JSON.
    pub const fn is_robot(&self) -> bool {
        matches!(self, Self::Robot(_))
    }

    /// Convert into the appropriate Output implementation.
    pub fn into_output(self) -> Box<dyn Output> {
        match self {
            Self::Robot(format) => Box::new(RobotOutput::new(format)),
            Self::Human(color) => Box::new(HumanOutput::new(color)),
        }
    }
}

/// Trait for all output operations.
pub trait Output {
    // Basic messages
    fn error(&self, error: &CaptureError);

    // Workflow
    fn notice(&self, notice: Notice);
    fn displayed(&self, summary: &DisplaySummary);
    fn outcome(&self, outcome: &WorkflowOutcome);

    // Commands
    fn history(&self, files: &[StoredImageFile]);
    fn config(&self, config: &AppConfig, path: Option<&Path>);
    fn version_info(&self, info: &VersionInfo);
}
