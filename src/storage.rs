//! App-scoped image storage.
//!
//! Captures are written to
//! `<storage-root>/Android/data/<app-id>/Images/<unix-millis>.jpg`.
//! Availability of the storage root is re-queried on every save; nothing is
//! cached between captures.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::error::{CaptureError, Result, ResultExt};

/// Source of millisecond timestamps for capture file names.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// Root of the external storage volume.
///
/// The root counts as mounted when it exists and is a directory at the time
/// of the query.
#[derive(Debug, Clone)]
pub struct StorageRoot {
    path: Option<PathBuf>,
}

impl StorageRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A root that is never available.
    pub const fn unmounted() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Query availability of the volume.
    pub fn is_mounted(&self) -> bool {
        self.path.as_deref().is_some_and(Path::is_dir)
    }
}

/// A capture persisted to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredImageFile {
    pub path: PathBuf,
    pub timestamp_ms: i64,
    pub size_bytes: u64,
}

/// Writes captures into the app-scoped image directory.
pub struct ImageStore {
    root: StorageRoot,
    app_id: String,
    clock: Box<dyn Clock>,
}

impl ImageStore {
    pub fn new(root: StorageRoot, app_id: impl Into<String>) -> Self {
        Self::with_clock(root, app_id, Box::new(SystemClock))
    }

    pub fn with_clock(root: StorageRoot, app_id: impl Into<String>, clock: Box<dyn Clock>) -> Self {
        Self {
            root,
            app_id: app_id.into(),
            clock,
        }
    }

    pub const fn root(&self) -> &StorageRoot {
        &self.root
    }

    /// Directory the captures land in, if the root is configured at all.
    pub fn image_dir(&self) -> Option<PathBuf> {
        self.root.path().map(|root| {
            root.join("Android")
                .join("data")
                .join(&self.app_id)
                .join("Images")
        })
    }

    /// Ensure the image directory exists.
    ///
    /// Returns `None` when the volume is not mounted or the directory cannot
    /// be created.
    pub fn prepare_dir(&self) -> Option<PathBuf> {
        if !self.root.is_mounted() {
            warn!(root = ?self.root.path(), "External storage not mounted");
            return None;
        }
        let dir = self.image_dir()?;
        if !dir.is_dir() {
            if let Err(e) = fs::create_dir_all(&dir) {
                error!(dir = %dir.display(), error = %e, "Failed to create image directory");
                return None;
            }
            debug!(dir = %dir.display(), "Created image directory");
        }
        Some(dir)
    }

    /// Write encoded JPEG bytes to a new timestamp-named file.
    ///
    /// Storage being unavailable and write failures both yield `None`; write
    /// failures are logged and the partial file is removed. Two saves in the
    /// same millisecond share a name and the second overwrites the first.
    pub fn save_jpeg(&self, bytes: &[u8]) -> Option<StoredImageFile> {
        let dir = self.prepare_dir()?;
        let timestamp_ms = self.clock.now_millis();
        let path = dir.join(format!("{timestamp_ms}.jpg"));

        match write_file(&path, bytes) {
            Ok(()) => {
                info!(path = %path.display(), len = bytes.len(), "Saved capture");
                Some(StoredImageFile {
                    path,
                    timestamp_ms,
                    size_bytes: bytes.len() as u64,
                })
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to write capture");
                let _ = fs::remove_file(&path);
                None
            }
        }
    }

    /// List stored captures, oldest first.
    pub fn list(&self) -> Result<Vec<StoredImageFile>> {
        let Some(dir) = self.image_dir() else {
            return Err(CaptureError::StorageUnavailable {
                root: "<unset>".to_string(),
            });
        };
        if !self.root.is_mounted() {
            return Err(CaptureError::StorageUnavailable {
                root: self
                    .root
                    .path()
                    .map_or_else(String::new, |p| p.display().to_string()),
            });
        }
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        let entries =
            fs::read_dir(&dir).with_context(|| format!("reading {}", dir.display()))?;
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("jpg") {
                continue;
            }
            let Some(timestamp_ms) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<i64>().ok())
            else {
                continue;
            };
            files.push(StoredImageFile {
                timestamp_ms,
                size_bytes: entry.metadata()?.len(),
                path,
            });
        }
        files.sort_by_key(|f| f.timestamp_ms);
        Ok(files)
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
