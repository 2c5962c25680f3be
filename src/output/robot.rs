//! Robot mode JSON output implementation.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::config::AppConfig;
use crate::controller::WorkflowOutcome;
use crate::error::CaptureError;
use crate::host::Notice;
use crate::storage::StoredImageFile;

use super::{DisplaySummary, Output, RobotFormat, VersionInfo};

/// JSON output implementation for scripts.
///
/// Notices are streamed as single JSON lines; command results honour the
/// selected format.
pub struct RobotOutput {
    format: RobotFormat,
}

impl RobotOutput {
    pub fn new(format: RobotFormat) -> Self {
        debug!(?format, "Creating RobotOutput");
        Self { format }
    }

    /// Render any serializable value in the selected format.
    pub fn render<T: Serialize + ?Sized>(&self, data: &T) -> String {
        let json = match self.format {
            RobotFormat::Json => serde_json::to_string_pretty(data),
            RobotFormat::JsonCompact => serde_json::to_string(data),
        };
        json.unwrap_or_else(|e| format!(r#"{{"error":true,"message":"serialization failed: {e}"}}"#))
    }

    fn output_json<T: Serialize + ?Sized>(&self, data: &T) {
        let json = self.render(data);
        trace!(json_len = json.len(), "JSON serialized");
        println!("{json}");
    }

    /// Output single-line JSON (for streaming events).
    fn output_json_line<T: Serialize>(&self, data: &T) {
        match serde_json::to_string(data) {
            Ok(json) => println!("{json}"),
            Err(e) => debug!(error = %e, "Failed to serialize JSON line"),
        }
    }
}

impl Output for RobotOutput {
    #[instrument(skip(self))]
    fn error(&self, error: &CaptureError) {
        debug!(error = %error, "Robot: error");
        let json = serde_json::json!({
            "error": true,
            "message": error.to_string(),
            "suggestion": error.suggestion(),
            "recoverable": error.is_user_recoverable(),
        });
        eprintln!("{}", self.render(&json));
    }

    #[instrument(skip(self))]
    fn notice(&self, notice: Notice) {
        self.output_json_line(&serde_json::json!({
            "notice": notice,
            "message": notice.message(),
            "success": notice.is_success(),
        }));
    }

    #[instrument(skip(self))]
    fn displayed(&self, summary: &DisplaySummary) {
        self.output_json_line(&serde_json::json!({ "displayed": summary }));
    }

    #[instrument(skip(self, outcome))]
    fn outcome(&self, outcome: &WorkflowOutcome) {
        self.output_json(outcome);
    }

    #[instrument(skip(self, files), fields(count = files.len()))]
    fn history(&self, files: &[StoredImageFile]) {
        self.output_json(files);
    }

    #[instrument(skip(self, config))]
    fn config(&self, config: &AppConfig, path: Option<&Path>) {
        self.output_json(&serde_json::json!({
            "path": path.map(|p| p.display().to_string()),
            "config": config,
        }));
    }

    #[instrument(skip(self, info))]
    fn version_info(&self, info: &VersionInfo) {
        self.output_json(info);
    }
}
