//! Mock host implementation for unit testing.
//!
//! Records every host operation and lets tests script the outcome of each
//! suspension point, either by feeding callbacks to the controller by hand
//! or by letting the mock queue them for [`Host::next_event`].
//!
//! # Example
//!
//! ```rust,ignore
//! use snapcrop::host::mock::{HostOperation, MockHostBuilder};
//! use snapcrop::host::Capability;
//!
//! let host = MockHostBuilder::new()
//!     .answer_prompts(true)
//!     .capture_returns(None)
//!     .build();
//! ```

use std::cell::Cell;
use std::collections::{HashMap, HashSet, VecDeque};

use image::GenericImageView;
use tracing::{debug, trace};

use super::{Capability, CapturedImage, CropRequest, CroppedImage, Host, HostEvent, Notice};
use crate::error::{CaptureError, Result};

/// Recorded operation for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostOperation {
    RequestPermission { capability: Capability },
    LaunchCapture,
    LaunchCrop(CropRequest),
    Notify(Notice),
    Render { width: u32, height: u32 },
    Finish,
}

/// Mock host for testing without a real camera or crop tool.
#[derive(Debug, Default)]
pub struct MockHost {
    granted: HashSet<Capability>,
    prompt_answers: HashMap<Capability, bool>,
    capture_results: VecDeque<Option<CapturedImage>>,
    crop_results: VecDeque<Option<CroppedImage>>,
    capture_supported: bool,
    crop_supported: bool,
    pending: VecDeque<HostEvent>,
    operation_log: Vec<HostOperation>,
    rendered: Vec<CroppedImage>,
    permission_queries: Cell<usize>,
    finished: bool,
}

impl MockHost {
    /// Host with camera and crop available and no permissions granted.
    pub fn new() -> Self {
        Self {
            capture_supported: true,
            crop_supported: true,
            ..Default::default()
        }
    }

    // === Scripting ===

    /// Grant a capability up front.
    pub fn grant(&mut self, capability: Capability) {
        self.granted.insert(capability);
    }

    /// Queue a callback by hand.
    pub fn push_event(&mut self, event: HostEvent) {
        self.pending.push_back(event);
    }

    // === Assertions ===

    /// Get all recorded operations.
    pub fn operations(&self) -> &[HostOperation] {
        &self.operation_log
    }

    /// Number of recorded operations matching a predicate.
    pub fn count(&self, pred: impl Fn(&HostOperation) -> bool) -> usize {
        self.operation_log.iter().filter(|op| pred(op)).count()
    }

    /// Number of times the camera experience was launched.
    pub fn capture_launches(&self) -> usize {
        self.count(|op| matches!(op, HostOperation::LaunchCapture))
    }

    /// Number of times the crop experience was launched.
    pub fn crop_launches(&self) -> usize {
        self.count(|op| matches!(op, HostOperation::LaunchCrop(_)))
    }

    /// Notices shown, in order.
    pub fn notices(&self) -> Vec<Notice> {
        self.operation_log
            .iter()
            .filter_map(|op| match op {
                HostOperation::Notify(n) => Some(*n),
                _ => None,
            })
            .collect()
    }

    /// Bitmaps put on the display surface, in order.
    pub fn rendered(&self) -> &[CroppedImage] {
        &self.rendered
    }

    /// How often permissions were queried.
    pub fn permission_queries(&self) -> usize {
        self.permission_queries.get()
    }

    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Assert specific operations were performed.
    ///
    /// # Panics
    ///
    /// Panics if operations don't match exactly.
    pub fn assert_operations(&self, expected: &[HostOperation]) {
        assert_eq!(
            self.operation_log, expected,
            "Operation mismatch.\nExpected: {expected:#?}\nActual: {:#?}",
            self.operation_log
        );
    }

    /// Assert an operation was performed at least once.
    ///
    /// # Panics
    ///
    /// Panics if the operation is not found.
    pub fn assert_contains(&self, op: &HostOperation) {
        assert!(
            self.operation_log.contains(op),
            "Expected operation {op:?} not found in {:#?}",
            self.operation_log
        );
    }

    /// Clear the operation log.
    pub fn clear_operations(&mut self) {
        self.operation_log.clear();
    }

    fn record_op(&mut self, op: HostOperation) {
        trace!(?op, "Recording mock host operation");
        self.operation_log.push(op);
    }
}

impl Host for MockHost {
    fn has_permission(&self, capability: Capability) -> bool {
        self.permission_queries.set(self.permission_queries.get() + 1);
        self.granted.contains(&capability)
    }

    fn request_permission(&mut self, capability: Capability) -> Result<()> {
        self.record_op(HostOperation::RequestPermission { capability });
        if let Some(&granted) = self.prompt_answers.get(&capability) {
            if granted {
                self.granted.insert(capability);
            }
            self.pending.push_back(HostEvent::PermissionResult {
                capability,
                granted,
            });
        }
        Ok(())
    }

    fn launch_capture(&mut self) -> Result<()> {
        if !self.capture_supported {
            return Err(CaptureError::Unsupported {
                feature: "image capture",
                reason: "mock host has no camera".to_string(),
            });
        }
        self.record_op(HostOperation::LaunchCapture);
        if let Some(result) = self.capture_results.pop_front() {
            self.pending.push_back(HostEvent::CaptureResult(result));
        }
        Ok(())
    }

    fn launch_crop(&mut self, request: &CropRequest) -> Result<()> {
        if !self.crop_supported {
            return Err(CaptureError::Unsupported {
                feature: "image crop",
                reason: "mock host has no crop tool".to_string(),
            });
        }
        self.record_op(HostOperation::LaunchCrop(request.clone()));
        if let Some(result) = self.crop_results.pop_front() {
            self.pending.push_back(HostEvent::CropResult(result));
        }
        Ok(())
    }

    fn notify(&mut self, notice: Notice) {
        debug!(%notice, "Mock notice");
        self.record_op(HostOperation::Notify(notice));
    }

    fn render(&mut self, image: &CroppedImage) {
        let (width, height) = image.dimensions();
        self.record_op(HostOperation::Render { width, height });
        self.rendered.push(image.clone());
    }

    fn finish(&mut self) {
        self.record_op(HostOperation::Finish);
        self.finished = true;
    }

    fn next_event(&mut self) -> Option<HostEvent> {
        self.pending.pop_front()
    }
}

/// Builder for creating `MockHost` with common configurations.
#[derive(Debug)]
pub struct MockHostBuilder {
    host: MockHost,
}

impl Default for MockHostBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHostBuilder {
    pub fn new() -> Self {
        Self {
            host: MockHost::new(),
        }
    }

    /// Grant a capability before the first query.
    pub fn granted(mut self, capability: Capability) -> Self {
        self.host.granted.insert(capability);
        self
    }

    /// Grant every capability.
    pub fn all_granted(mut self) -> Self {
        self.host.granted.extend(Capability::ORDER);
        self
    }

    /// Answer the prompt for one capability.
    pub fn answer_prompt(mut self, capability: Capability, granted: bool) -> Self {
        self.host.prompt_answers.insert(capability, granted);
        self
    }

    /// Answer every prompt the same way.
    pub fn answer_prompts(mut self, granted: bool) -> Self {
        for capability in Capability::ORDER {
            self.host.prompt_answers.insert(capability, granted);
        }
        self
    }

    /// Queue the result of the next camera launch.
    pub fn capture_returns(mut self, image: Option<CapturedImage>) -> Self {
        self.host.capture_results.push_back(image);
        self
    }

    /// Queue the result of the next crop launch.
    pub fn crop_returns(mut self, image: Option<CroppedImage>) -> Self {
        self.host.crop_results.push_back(image);
        self
    }

    /// Host with no camera experience.
    pub fn without_camera(mut self) -> Self {
        self.host.capture_supported = false;
        self
    }

    /// Host with no crop experience.
    pub fn without_crop(mut self) -> Self {
        self.host.crop_supported = false;
        self
    }

    pub fn build(self) -> MockHost {
        self.host
    }
}
