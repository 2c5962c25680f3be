//! Desktop rendition of the host environment.
//!
//! - permission prompts follow the configured [`PermissionPolicy`], asking on
//!   the terminal for `ask`
//! - the camera experience "captures" a still image from a source file and
//!   hands back a thumbnail of it
//! - the crop experience centre-crops the stored file to the requested
//!   aspect and size and returns the pixels
//! - the display surface reports through [`Output`] and can write a PNG
//!   preview
//!
//! Every experience resolves immediately; its outcome is queued and handed
//! out through [`Host::next_event`].

use std::collections::{HashSet, VecDeque};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use console::Term;
use image::{GenericImageView, ImageFormat};
use tracing::{debug, info, warn};

use super::{Capability, CapturedImage, CropRequest, CroppedImage, Host, HostEvent, Notice};
use crate::config::{AppConfig, PermissionPolicy, PermissionsConfig, validate_image_path};
use crate::error::{CaptureError, Result};
use crate::image_ops::{crop_to_aspect, thumbnail};
use crate::output::{DisplaySummary, Output};

/// Asks the user a yes/no question.
pub trait Prompter {
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Prompter reading answers from the terminal.
pub struct TerminalPrompter {
    term: Term,
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self {
            term: Term::stderr(),
        }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        if !io::stdin().is_terminal() {
            return Err(CaptureError::Unsupported {
                feature: "permission prompt",
                reason: "stdin is not a terminal".to_string(),
            });
        }
        self.term.write_str(&format!("{question} [y/N] "))?;
        let answer = self.term.read_line()?;
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}

/// Host backed by files and the terminal.
pub struct DesktopHost {
    permissions: PermissionsConfig,
    session_grants: HashSet<Capability>,
    camera_source: Option<PathBuf>,
    thumbnail_size: u32,
    preview_path: Option<PathBuf>,
    prompter: Box<dyn Prompter>,
    output: Box<dyn Output>,
    pending: VecDeque<HostEvent>,
    finished: bool,
}

impl DesktopHost {
    pub fn new(config: &AppConfig, output: Box<dyn Output>) -> Self {
        Self {
            permissions: config.permissions.clone(),
            session_grants: HashSet::new(),
            camera_source: config.camera_source.clone(),
            thumbnail_size: config.thumbnail_size,
            preview_path: config.preview_path.clone(),
            prompter: Box::new(TerminalPrompter::default()),
            output,
            pending: VecDeque::new(),
            finished: false,
        }
    }

    /// Replace the terminal prompter.
    pub fn with_prompter(mut self, prompter: Box<dyn Prompter>) -> Self {
        self.prompter = prompter;
        self
    }

    /// Answer every `ask` prompt with yes.
    pub fn assume_yes(mut self) -> Self {
        for capability in Capability::ORDER {
            if self.permissions.policy(capability) == PermissionPolicy::Ask {
                self.session_grants.insert(capability);
            }
        }
        self
    }

    pub fn output(&self) -> &dyn Output {
        self.output.as_ref()
    }

    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    fn capture_thumbnail(&self, source: &Path) -> Option<CapturedImage> {
        if let Err(e) = validate_image_path(source) {
            warn!(source = %source.display(), error = %e, "Camera source unusable");
            return None;
        }
        match image::open(source) {
            Ok(img) => {
                let thumb = thumbnail(&img, self.thumbnail_size);
                debug!(
                    source = %source.display(),
                    dimensions = ?thumb.dimensions(),
                    "Captured thumbnail"
                );
                Some(thumb)
            }
            Err(e) => {
                warn!(source = %source.display(), error = %e, "Failed to read camera source");
                None
            }
        }
    }

    fn crop(request: &CropRequest) -> Option<CroppedImage> {
        let img = match image::open(&request.source) {
            Ok(img) => img,
            Err(e) => {
                warn!(source = %request.source.display(), error = %e, "Crop source unreadable");
                return None;
            }
        };
        match crop_to_aspect(&img, request.aspect(), request.output_x, request.output_y) {
            Ok(cropped) => Some(cropped),
            Err(e) => {
                warn!(error = %e, "Crop failed");
                None
            }
        }
    }
}

impl Host for DesktopHost {
    fn has_permission(&self, capability: Capability) -> bool {
        self.permissions.policy(capability) == PermissionPolicy::Granted
            || self.session_grants.contains(&capability)
    }

    fn request_permission(&mut self, capability: Capability) -> Result<()> {
        let granted = match self.permissions.policy(capability) {
            PermissionPolicy::Granted => true,
            PermissionPolicy::Denied => false,
            PermissionPolicy::Ask => self
                .prompter
                .confirm(&format!("Allow snapcrop to use {capability}?"))?,
        };
        info!(%capability, granted, "Permission answered");
        if granted {
            self.session_grants.insert(capability);
        }
        self.pending.push_back(HostEvent::PermissionResult {
            capability,
            granted,
        });
        Ok(())
    }

    fn launch_capture(&mut self) -> Result<()> {
        let Some(source) = self.camera_source.clone() else {
            return Err(CaptureError::Unsupported {
                feature: "image capture",
                reason: "no camera source configured".to_string(),
            });
        };
        let result = self.capture_thumbnail(&source);
        self.pending.push_back(HostEvent::CaptureResult(result));
        Ok(())
    }

    fn launch_crop(&mut self, request: &CropRequest) -> Result<()> {
        if !request.return_data {
            return Err(CaptureError::Unsupported {
                feature: "image crop",
                reason: "only returning pixel data is supported".to_string(),
            });
        }
        let result = Self::crop(request);
        self.pending.push_back(HostEvent::CropResult(result));
        Ok(())
    }

    fn notify(&mut self, notice: Notice) {
        info!(%notice, "Notice");
        self.output.notice(notice);
    }

    fn render(&mut self, image: &CroppedImage) {
        let (width, height) = image.dimensions();
        let preview = self.preview_path.as_ref().and_then(|path| {
            match image.save_with_format(path, ImageFormat::Png) {
                Ok(()) => Some(path.clone()),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to write preview");
                    None
                }
            }
        });
        self.output.displayed(&DisplaySummary {
            width,
            height,
            preview,
        });
    }

    fn finish(&mut self) {
        debug!("Closing screen");
        self.finished = true;
    }

    fn next_event(&mut self) -> Option<HostEvent> {
        self.pending.pop_front()
    }
}
