//! Human-friendly output implementation using console styles.

use std::path::Path;

use chrono::{DateTime, Local, Utc};
use tracing::{debug, instrument, trace};

use crate::config::AppConfig;
use crate::controller::WorkflowOutcome;
use crate::error::CaptureError;
use crate::host::{Capability, Notice};
use crate::state::WorkflowState;
use crate::storage::StoredImageFile;
use crate::theme::Theme;

use super::{DisplaySummary, Output, VersionInfo};

/// Styled terminal output implementation for human users.
pub struct HumanOutput {
    theme: Theme,
}

impl HumanOutput {
    pub fn new(color: bool) -> Self {
        debug!(color, "Creating HumanOutput");
        Self {
            theme: if color { Theme::default() } else { Theme::plain() },
        }
    }

    fn field(&self, label: &str, value: impl std::fmt::Display) {
        println!(
            "  {} {}",
            self.theme.label.apply_to(format!("{label:<16}")),
            self.theme.value.apply_to(value)
        );
    }

    /// One-line rendering of a notice, without trailing newline.
    pub fn format_notice(&self, notice: Notice) -> String {
        let tag = if notice.is_success() {
            self.theme.success.apply_to("[OK]")
        } else {
            self.theme.warning.apply_to("[!]")
        };
        format!("{tag} {notice}")
    }
}

fn local_time(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms).map_or_else(
        || timestamp_ms.to_string(),
        |t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
    )
}

impl Output for HumanOutput {
    #[instrument(skip(self))]
    fn error(&self, error: &CaptureError) {
        debug!(
            error = %error,
            recoverable = error.is_user_recoverable(),
            "Outputting error"
        );
        eprintln!("{} {error}", self.theme.error.apply_to("[ERR]"));
        if let Some(suggestion) = error.suggestion() {
            trace!(suggestion, "Adding suggestion");
            eprintln!("      {}", self.theme.muted.apply_to(suggestion));
        }
    }

    #[instrument(skip(self))]
    fn notice(&self, notice: Notice) {
        println!("{}", self.format_notice(notice));
    }

    #[instrument(skip(self))]
    fn displayed(&self, summary: &DisplaySummary) {
        println!(
            "{} {}x{} image on display",
            self.theme.accent.apply_to("[VIEW]"),
            summary.width,
            summary.height
        );
        if let Some(preview) = &summary.preview {
            self.field("Preview", preview.display());
        }
    }

    #[instrument(skip(self, outcome))]
    fn outcome(&self, outcome: &WorkflowOutcome) {
        match (&outcome.state, outcome.denied) {
            (WorkflowState::Displayed, _) => {}
            (WorkflowState::Finished, Some(capability)) => {
                let what = match capability {
                    Capability::Camera => "Camera",
                    Capability::StorageWrite => "Storage",
                };
                println!(
                    "{} {what} permission denied, screen closed",
                    self.theme.muted.apply_to("--")
                );
            }
            (state, _) => println!(
                "{} Workflow stopped: {state}",
                self.theme.muted.apply_to("--")
            ),
        }
        if let Some(saved) = &outcome.saved {
            self.field("Saved", saved.path.display());
        }
    }

    #[instrument(skip(self, files), fields(count = files.len()))]
    fn history(&self, files: &[StoredImageFile]) {
        if files.is_empty() {
            println!("{}", self.theme.muted.apply_to("No captures stored yet"));
            return;
        }
        println!("{}", self.theme.accent.apply_to("Stored captures:"));
        for file in files {
            println!(
                "  {}  {:>8} B  {}",
                local_time(file.timestamp_ms),
                file.size_bytes,
                self.theme.muted.apply_to(file.path.display())
            );
        }
    }

    #[instrument(skip(self, config))]
    fn config(&self, config: &AppConfig, path: Option<&Path>) {
        println!("{}", self.theme.accent.apply_to("Configuration"));
        self.field(
            "File",
            path.map_or_else(|| "(defaults)".to_string(), |p| p.display().to_string()),
        );
        self.field("App id", &config.app_id);
        self.field(
            "Storage root",
            config
                .storage_root_or_default()
                .map_or_else(|| "(unavailable)".to_string(), |p| p.display().to_string()),
        );
        self.field(
            "Camera source",
            config
                .camera_source
                .as_ref()
                .map_or_else(|| "(none)".to_string(), |p| p.display().to_string()),
        );
        self.field("Thumbnail size", config.thumbnail_size);
        self.field("Camera perm.", config.permissions.camera);
        self.field("Storage perm.", config.permissions.storage);
    }

    #[instrument(skip(self, info))]
    fn version_info(&self, info: &VersionInfo) {
        println!(
            "{} {}",
            self.theme.accent.apply_to("snapcrop"),
            info.version
        );
        self.field("Git SHA", info.git_sha);
        self.field("Built", info.build_timestamp);
        self.field("Rustc", info.rustc);
        self.field("Target", info.target);
    }
}
