//! The capture screen controller.
//!
//! Drives permission → capture → save → crop → display as an explicit state
//! machine. Every host interaction that opens a modal experience leaves the
//! controller in an `Awaiting*` state; the matching callback resumes it.
//! Callbacks that do not match the current state are logged and dropped.

use serde::Serialize;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::host::{Capability, CapturedImage, CropRequest, CroppedImage, Host, HostEvent, Notice};
use crate::image_ops::{JPEG_QUALITY, encode_jpeg};
use crate::state::WorkflowState;
use crate::storage::{ImageStore, StoredImageFile};

/// Summary of a finished workflow run.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<Uuid>,
    pub state: WorkflowState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<StoredImageFile>,
    /// Capability whose denial closed the screen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub denied: Option<Capability>,
    pub displayed: bool,
}

pub struct CaptureController<H: Host> {
    host: H,
    store: ImageStore,
    state: WorkflowState,
    run_id: Option<Uuid>,
    last_saved: Option<StoredImageFile>,
    denied: Option<Capability>,
}

impl<H: Host> CaptureController<H> {
    pub fn new(host: H, store: ImageStore) -> Self {
        Self {
            host,
            store,
            state: WorkflowState::Idle,
            run_id: None,
            last_saved: None,
            denied: None,
        }
    }

    pub const fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub const fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub const fn store(&self) -> &ImageStore {
        &self.store
    }

    /// The capture file written by the current run, if any.
    pub const fn last_saved(&self) -> Option<&StoredImageFile> {
        self.last_saved.as_ref()
    }

    pub fn outcome(&self) -> WorkflowOutcome {
        WorkflowOutcome {
            run_id: self.run_id,
            state: self.state.clone(),
            saved: self.last_saved.clone(),
            denied: self.denied,
            displayed: self.state == WorkflowState::Displayed,
        }
    }

    /// Entry point for the trigger action.
    ///
    /// Ignored while a host experience is open or after the screen closed.
    pub fn request_capture(&mut self) {
        if !self.state.accepts_trigger() {
            debug!(state = %self.state, "Ignoring capture trigger");
            return;
        }
        let run_id = Uuid::new_v4();
        self.run_id = Some(run_id);
        self.last_saved = None;
        info!(%run_id, "Capture requested");
        self.advance();
    }

    /// Callback from a permission prompt.
    pub fn on_permission_result(&mut self, capability: Capability, granted: bool) {
        if self.state != (WorkflowState::AwaitingPermission { capability }) {
            warn!(state = %self.state, %capability, "Unexpected permission result");
            return;
        }
        if granted {
            debug!(%capability, "Permission granted");
            self.advance();
        } else {
            self.deny(capability);
        }
    }

    /// Callback from the camera experience.
    ///
    /// Saves the thumbnail and hands the stored file to the crop step.
    /// Returns the stored file, if one was written.
    pub fn on_capture_result(&mut self, image: Option<CapturedImage>) -> Option<StoredImageFile> {
        if self.state != WorkflowState::AwaitingCapture {
            warn!(state = %self.state, "Unexpected capture result");
            return None;
        }
        let file = match image {
            Some(image) => self.save_capture(&image),
            None => {
                info!("Capture returned no image");
                None
            }
        };
        self.last_saved.clone_from(&file);
        self.request_crop(file.clone());
        file
    }

    /// Encode a captured thumbnail and write it to storage.
    pub fn save_capture(&self, image: &CapturedImage) -> Option<StoredImageFile> {
        let bytes = match encode_jpeg(image, JPEG_QUALITY) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(error = %e, "Failed to encode capture");
                return None;
            }
        };
        self.store.save_jpeg(&bytes)
    }

    /// Open the crop experience on a stored capture.
    ///
    /// Without a file the crop is skipped and the user is told the capture
    /// failed.
    pub fn request_crop(&mut self, file: Option<StoredImageFile>) {
        let Some(file) = file else {
            self.abort(Notice::CaptureFailed);
            return;
        };

        let request = CropRequest::square(&file.path);
        self.transition(WorkflowState::AwaitingCrop { file });
        if let Err(e) = self.host.launch_crop(&request) {
            warn!(error = %e, "Crop experience unavailable");
            self.abort(Notice::CropUnsupported);
        }
    }

    /// Callback from the crop experience.
    pub fn on_crop_result(&mut self, image: Option<CroppedImage>) {
        if !matches!(self.state, WorkflowState::AwaitingCrop { .. }) {
            warn!(state = %self.state, "Unexpected crop result");
            return;
        }
        match image {
            Some(image) => {
                self.host.render(&image);
                self.host.notify(Notice::CropSucceeded);
                self.transition(WorkflowState::Displayed);
            }
            None => self.abort(Notice::CropCancelled),
        }
    }

    /// Dispatch a host callback.
    pub fn handle(&mut self, event: HostEvent) {
        debug!(event = event.kind(), state = %self.state, "Handling host event");
        match event {
            HostEvent::PermissionResult {
                capability,
                granted,
            } => self.on_permission_result(capability, granted),
            HostEvent::CaptureResult(image) => {
                self.on_capture_result(image);
            }
            HostEvent::CropResult(image) => self.on_crop_result(image),
        }
    }

    /// Move to the next gated step: a missing permission or the camera.
    fn advance(&mut self) {
        for capability in Capability::ORDER {
            if self.host.has_permission(capability) {
                continue;
            }
            self.transition(WorkflowState::AwaitingPermission { capability });
            if let Err(e) = self.host.request_permission(capability) {
                warn!(%capability, error = %e, "Permission prompt unavailable");
                self.deny(capability);
            }
            return;
        }

        self.transition(WorkflowState::AwaitingCapture);
        if let Err(e) = self.host.launch_capture() {
            warn!(error = %e, "Camera experience unavailable");
            self.abort(Notice::CaptureUnsupported);
        }
    }

    fn deny(&mut self, capability: Capability) {
        warn!(%capability, "Permission denied, closing screen");
        self.denied = Some(capability);
        self.host.notify(Notice::PermissionRequired);
        self.host.finish();
        self.transition(WorkflowState::Finished);
    }

    fn abort(&mut self, notice: Notice) {
        self.host.notify(notice);
        self.transition(WorkflowState::Idle);
    }

    fn transition(&mut self, next: WorkflowState) {
        debug!(from = %self.state, to = %next, "Workflow transition");
        self.state = next;
    }
}

/// Trigger the workflow once and pump host callbacks until none are pending.
///
/// Returns the state the workflow settled in.
pub fn run_workflow<H: Host>(controller: &mut CaptureController<H>) -> WorkflowState {
    controller.request_capture();
    while let Some(event) = controller.host_mut().next_event() {
        controller.handle(event);
    }
    if controller.state().is_suspended() {
        warn!(state = %controller.state(), "Host stopped responding mid-workflow");
    }
    controller.state().clone()
}
